//! Command execution against the mock API
//!
//! A [`Console`] plays the part of the view layer: it checks the session
//! guard, calls the mock API, and renders the results.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};
use visitor_core::{
    AccessKeyPatch, DashboardData, DataStore, DeviceRepository, GuardReaderMappingForm,
    KeyRepository, LoginForm, MockApi, NewAccessKey, NewPass, NewZone, Notifier, PassPatch,
    PassRepository, ReportRepository, Result, Route, SessionManager, SessionState,
    SessionStorage, UserRepository, VisitorRepository, ZonePatch, ZoneRepository,
};

use crate::cli::{
    nullable, Command, DevicesCommand, KeysCommand, PassesCommand, ReportCommand, UsersCommand,
    VisitorsCommand, ZonesCommand,
};

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print
    Rendered(String),
    /// The console moved to another view instead
    Navigate(Route),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rendered(text) => f.write_str(text),
            Outcome::Navigate(route) => write!(f, "-> {}", route),
        }
    }
}

pub struct Console<S, N> {
    store: DataStore,
    session: SessionManager<S, N>,
}

impl<S: SessionStorage, N: Notifier> Console<S, N> {
    pub fn new(store: DataStore, session: SessionManager<S, N>) -> Self {
        Self { store, session }
    }

    pub fn session(&self) -> &SessionManager<S, N> {
        &self.session
    }

    /// Run one command, surfacing failures as error notices
    pub fn run(&mut self, command: Command) -> Result<Outcome> {
        let notify = !matches!(command, Command::Login { .. });
        let result = self.execute(command);
        if let Err(e) = &result {
            if notify {
                self.session.notifier().show_error_message("Error", &e.notice());
            }
        }
        result
    }

    #[instrument(skip(self, command), fields(route = ?command.route()))]
    fn execute(&mut self, command: Command) -> Result<Outcome> {
        if let Some(route) = command.route() {
            if let Some(redirect) = self.session.verify_session() {
                return Ok(Outcome::Navigate(redirect));
            }
            let target = self.session.guard(route);
            if target != route {
                debug!(requested = %route, target = %target, "Navigation redirected");
                return Ok(Outcome::Navigate(target));
            }
        }

        match command {
            Command::Login { username, password } => self.login(username, password),
            Command::Logout => {
                let outcome = self.session.logout();
                if let Some(error) = outcome.error {
                    self.session.notifier().show_error_message("Logout Failed", &error);
                }
                Ok(Outcome::Navigate(outcome.redirect))
            }
            Command::Status => Ok(Outcome::Rendered(self.status())),
            Command::Users(cmd) => self.users(cmd),
            Command::Visitors(cmd) => self.visitors(cmd),
            Command::Zones(cmd) => self.zones(cmd),
            Command::Keys(cmd) => self.keys(cmd),
            Command::Passes(cmd) => self.passes(cmd),
            Command::Devices(cmd) => self.devices(cmd),
            Command::Dashboard => self.dashboard(),
            Command::Report(cmd) => self.report(cmd),
            Command::Shell => Ok(Outcome::Rendered("Already in the shell".to_string())),
        }
    }

    fn login(&mut self, username: String, password: String) -> Result<Outcome> {
        if let Some(route) = self.session.redirect_if_authenticated() {
            return Ok(Outcome::Navigate(route));
        }

        let mut form = LoginForm::new(username, password);
        let api = MockApi::new(&mut self.store);
        let route = self.session.login(&api, &mut form)?;
        Ok(Outcome::Navigate(route))
    }

    fn status(&mut self) -> String {
        if self.session.has_token() {
            self.session.verify_session();
        }
        match self.session.state() {
            SessionState::Valid(identity) => {
                let role = identity
                    .user_type
                    .map(|r| r.display_name())
                    .unwrap_or("unknown role");
                format!(
                    "Signed in as {} ({}), user id {}",
                    identity.username, role, identity.id
                )
            }
            _ => "Not signed in".to_string(),
        }
    }

    fn users(&mut self, command: UsersCommand) -> Result<Outcome> {
        let mut api = MockApi::new(&mut self.store);
        let rendered = match command {
            UsersCommand::List => render(&api.get_all_users()?)?,
            UsersCommand::Create(args) => render(&api.create_user(args.into())?)?,
            UsersCommand::Update { id, patch } => render(&api.update_user(id, patch.into())?)?,
            UsersCommand::Delete { id } => render(&api.delete_user(id)?)?,
            UsersCommand::ResetPassword { id } => {
                api.reset_user_password(id)?;
                self.session
                    .notifier()
                    .show_success_message("Success", "Password reset successfully");
                return Ok(Outcome::Rendered(format!("Password reset for user {}", id)));
            }
        };
        Ok(Outcome::Rendered(rendered))
    }

    fn visitors(&mut self, command: VisitorsCommand) -> Result<Outcome> {
        let page_size = self.store.page_size();
        let mut api = MockApi::new(&mut self.store);
        let rendered = match command {
            VisitorsCommand::List(args) => render(&api.get_visitors(&args.into_filter(page_size))?)?,
            VisitorsCommand::Create(args) => render(&api.create_visitor(args.into())?)?,
            VisitorsCommand::Update { id, patch } => {
                render(&api.update_visitor(id, patch.into())?)?
            }
            VisitorsCommand::Delete { id } => render(&api.delete_visitor(id)?)?,
        };
        Ok(Outcome::Rendered(rendered))
    }

    fn zones(&mut self, command: ZonesCommand) -> Result<Outcome> {
        let mut api = MockApi::new(&mut self.store);
        let rendered = match command {
            ZonesCommand::List => render(&api.get_zones()?)?,
            ZonesCommand::Create {
                name,
                description,
                inactive,
            } => {
                let zone = NewZone {
                    description,
                    is_active: !inactive,
                    ..NewZone::named(name)
                };
                render(&api.create_zone(zone)?)?
            }
            ZonesCommand::Update {
                id,
                name,
                description,
                clear_description,
                active,
            } => {
                let patch = ZonePatch {
                    name,
                    description: nullable(description, clear_description),
                    is_active: active,
                };
                render(&api.update_zone(id, patch)?)?
            }
            ZonesCommand::Delete { id } => render(&api.delete_zone(id)?)?,
        };
        Ok(Outcome::Rendered(rendered))
    }

    fn keys(&mut self, command: KeysCommand) -> Result<Outcome> {
        let mut api = MockApi::new(&mut self.store);
        let rendered = match command {
            KeysCommand::List => render(&api.get_keys()?)?,
            KeysCommand::Create {
                key_number,
                key_type,
                zone_id,
                status,
            } => render(&api.create_key(NewAccessKey {
                key_number,
                key_type,
                zone_id,
                status,
            })?)?,
            KeysCommand::Update {
                id,
                key_number,
                key_type,
                zone_id,
                clear_zone,
                status,
            } => render(&api.update_key(
                id,
                AccessKeyPatch {
                    key_number,
                    key_type,
                    zone_id: nullable(zone_id, clear_zone),
                    status,
                },
            )?)?,
            KeysCommand::Delete { id } => render(&api.delete_key(id)?)?,
        };
        Ok(Outcome::Rendered(rendered))
    }

    fn passes(&mut self, command: PassesCommand) -> Result<Outcome> {
        let mut api = MockApi::new(&mut self.store);
        let rendered = match command {
            PassesCommand::List => render(&api.get_passes()?)?,
            PassesCommand::Create {
                visitor_id,
                zone_id,
                pass_type,
                from,
                until,
            } => render(&api.create_pass(NewPass {
                visitor_id,
                zone_id,
                pass_type,
                valid_from: from,
                valid_until: until,
            })?)?,
            PassesCommand::Update {
                id,
                visitor_id,
                zone_id,
                pass_type,
                from,
                until,
            } => render(&api.update_pass(
                id,
                PassPatch {
                    visitor_id,
                    zone_id,
                    pass_type,
                    valid_from: from,
                    valid_until: until,
                },
            )?)?,
            PassesCommand::Delete { id } => render(&api.delete_pass(id)?)?,
        };
        Ok(Outcome::Rendered(rendered))
    }

    fn devices(&mut self, command: DevicesCommand) -> Result<Outcome> {
        let mut api = MockApi::new(&mut self.store);
        let rendered = match command {
            DevicesCommand::Readers => render(&api.get_readers()?)?,
            DevicesCommand::Adams => render(&api.get_adams()?)?,
            DevicesCommand::Mappings => render(&api.get_guard_reader_mappings()?)?,
            DevicesCommand::Map { user_id, reader_id } => {
                let form = GuardReaderMappingForm { user_id, reader_id };
                let mapping = api.create_guard_reader_mapping(&form)?;
                self.session
                    .notifier()
                    .show_success_message("Success", "Guard mapped to reader");
                render(&mapping)?
            }
        };
        Ok(Outcome::Rendered(rendered))
    }

    fn dashboard(&mut self) -> Result<Outcome> {
        let api = MockApi::new(&mut self.store);
        let data = DashboardData {
            pass_time_left: api.get_pass_time_left()?,
            today_visitor_visit: api.get_today_visitor_visit()?,
            weekly_visitor_visit: api.get_weekly_visitor_visit()?,
            visitor_in_zones: api.get_visitor_in_zones()?,
        };
        Ok(Outcome::Rendered(render(&data)?))
    }

    fn report(&mut self, command: ReportCommand) -> Result<Outcome> {
        let api = MockApi::new(&mut self.store);
        let rendered = match command {
            ReportCommand::Export { endpoint } => render(&api.get_report_data(&endpoint)?)?,
            ReportCommand::Sessions { user_id, range } => {
                render(&api.get_user_sessions(user_id, range.into())?)?
            }
            ReportCommand::ZoneTracking {
                visitor_id,
                zone_id,
                range,
            } => render(&api.get_visitor_zone_tracking(visitor_id, zone_id, range.into())?)?,
            ReportCommand::KeyAssigned { key_id, range } => {
                render(&api.get_key_assigned_report(key_id, range.into())?)?
            }
        };
        Ok(Outcome::Rendered(rendered))
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
