//! Command-line definitions

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use visitor_core::{
    DateRange, KeyStatus, NewUser, NewVisitor, Route, UserPatch, UserType, VisitorFilter,
    VisitorPatch,
};

#[derive(Parser)]
#[command(name = "visitor-console")]
#[command(about = "Visitor access management console")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep the session in memory instead of the session database
    #[arg(long)]
    pub ephemeral: bool,
}

/// One line typed into the interactive shell
#[derive(Parser)]
#[command(no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in; any password is accepted for a known username
    Login {
        username: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show who is signed in
    Status,

    /// Manage console users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Search and manage visitors
    #[command(subcommand)]
    Visitors(VisitorsCommand),

    /// Manage zones
    #[command(subcommand)]
    Zones(ZonesCommand),

    /// Manage access keys
    #[command(subcommand)]
    Keys(KeysCommand),

    /// Manage visitor passes
    #[command(subcommand)]
    Passes(PassesCommand),

    /// Readers, controllers and guard assignments
    #[command(subcommand)]
    Devices(DevicesCommand),

    /// Dashboard widgets
    Dashboard,

    /// Reports and exports
    #[command(subcommand)]
    Report(ReportCommand),

    /// Interactive shell keeping one data store alive
    Shell,
}

impl Command {
    /// Section a command belongs to; `None` for session commands
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } | Command::Logout | Command::Status | Command::Shell => None,
            Command::Users(_) => Some(Route::Users),
            Command::Visitors(_) => Some(Route::Visitors),
            Command::Zones(_) => Some(Route::Zones),
            Command::Keys(_) => Some(Route::Keys),
            Command::Passes(_) => Some(Route::Passes),
            Command::Devices(_) => Some(Route::Configure),
            Command::Dashboard => Some(Route::Home),
            Command::Report(_) => Some(Route::Reports),
        }
    }
}

fn parse_user_type(value: &str) -> Result<UserType, String> {
    UserType::from_name(value).ok_or_else(|| format!("unknown user type '{}'", value))
}

fn parse_key_status(value: &str) -> Result<KeyStatus, String> {
    KeyStatus::from_name(value).ok_or_else(|| format!("unknown key status '{}'", value))
}

/// Patch value for a nullable field: a new value, a clear, or untouched
pub fn nullable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UsersCommand {
    List,
    Create(NewUserArgs),
    Update {
        id: u64,
        #[command(flatten)]
        patch: UserPatchArgs,
    },
    Delete {
        id: u64,
    },
    ResetPassword {
        id: u64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct NewUserArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long, value_parser = parse_user_type)]
    pub user_type: UserType,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<NewUserArgs> for NewUser {
    fn from(args: NewUserArgs) -> Self {
        NewUser {
            username: args.username,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            user_type: args.user_type,
            image: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct UserPatchArgs {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long, value_parser = parse_user_type)]
    pub user_type: Option<UserType>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, conflicts_with = "email")]
    pub clear_email: bool,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, conflicts_with = "phone")]
    pub clear_phone: bool,
}

impl From<UserPatchArgs> for UserPatch {
    fn from(args: UserPatchArgs) -> Self {
        UserPatch {
            username: args.username,
            first_name: args.first_name,
            last_name: args.last_name,
            email: nullable(args.email, args.clear_email),
            phone: nullable(args.phone, args.clear_phone),
            user_type: args.user_type,
            image: None,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum VisitorsCommand {
    List(VisitorSearchArgs),
    Create(NewVisitorArgs),
    Update {
        id: u64,
        #[command(flatten)]
        patch: VisitorPatchArgs,
    },
    Delete {
        id: u64,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct VisitorSearchArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub gov_id: Option<String>,
    /// Only visitors registered at or after this instant (RFC 3339)
    #[arg(long)]
    pub after: Option<DateTime<Utc>>,
    #[arg(long)]
    pub before: Option<DateTime<Utc>>,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Page size; 0 uses the configured default
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

impl VisitorSearchArgs {
    pub fn into_filter(self, page_size: usize) -> VisitorFilter {
        let limit = if self.limit == 0 { page_size } else { self.limit };
        let mut filter = VisitorFilter::new()
            .created_between(self.after, self.before)
            .page(self.offset, limit);
        filter.first_name = self.first_name;
        filter.last_name = self.last_name;
        filter.phone = self.phone;
        filter.gov_id_no = self.gov_id;
        filter
    }
}

#[derive(Args, Debug, Clone)]
pub struct NewVisitorArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub gov_id: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, default_value = "Guest")]
    pub visitor_type: String,
}

impl From<NewVisitorArgs> for NewVisitor {
    fn from(args: NewVisitorArgs) -> Self {
        NewVisitor {
            first_name: args.first_name,
            last_name: args.last_name,
            phone_number: args.phone,
            gov_id_no: args.gov_id,
            email: args.email,
            address: args.address,
            visitor_type: args.visitor_type,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct VisitorPatchArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub gov_id: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, conflicts_with = "email")]
    pub clear_email: bool,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, conflicts_with = "address")]
    pub clear_address: bool,
    #[arg(long)]
    pub visitor_type: Option<String>,
}

impl From<VisitorPatchArgs> for VisitorPatch {
    fn from(args: VisitorPatchArgs) -> Self {
        VisitorPatch {
            first_name: args.first_name,
            last_name: args.last_name,
            phone_number: args.phone,
            gov_id_no: args.gov_id,
            email: nullable(args.email, args.clear_email),
            address: nullable(args.address, args.clear_address),
            visitor_type: args.visitor_type,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ZonesCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Create the zone disabled
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum KeysCommand {
    List,
    Create {
        #[arg(long)]
        key_number: String,
        #[arg(long, default_value = "RFID")]
        key_type: String,
        #[arg(long)]
        zone_id: Option<u64>,
        #[arg(long, value_parser = parse_key_status, default_value = "available")]
        status: KeyStatus,
    },
    Update {
        id: u64,
        #[arg(long)]
        key_number: Option<String>,
        #[arg(long)]
        key_type: Option<String>,
        #[arg(long)]
        zone_id: Option<u64>,
        /// Detach the key from its zone
        #[arg(long, conflicts_with = "zone_id")]
        clear_zone: bool,
        #[arg(long, value_parser = parse_key_status)]
        status: Option<KeyStatus>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PassesCommand {
    List,
    Create {
        #[arg(long)]
        visitor_id: u64,
        #[arg(long)]
        zone_id: u64,
        #[arg(long, default_value = "Day Pass")]
        pass_type: String,
        /// Start of validity (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,
        /// End of validity (RFC 3339)
        #[arg(long)]
        until: DateTime<Utc>,
    },
    Update {
        id: u64,
        #[arg(long)]
        visitor_id: Option<u64>,
        #[arg(long)]
        zone_id: Option<u64>,
        #[arg(long)]
        pass_type: Option<String>,
        #[arg(long)]
        from: Option<DateTime<Utc>>,
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DevicesCommand {
    Readers,
    Adams,
    /// List guard to reader assignments
    Mappings,
    /// Assign a guard to a reader
    Map {
        #[arg(long)]
        user_id: Option<u64>,
        #[arg(long)]
        reader_id: Option<u64>,
    },
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RangeArgs {
    /// Range start (RFC 3339)
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,
    /// Range end (RFC 3339)
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,
}

impl From<RangeArgs> for DateRange {
    fn from(args: RangeArgs) -> Self {
        DateRange {
            start: args.from,
            end: args.to,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportCommand {
    /// Export a collection: users, visitors, zones or keys
    Export { endpoint: String },
    /// Login history of a user
    Sessions {
        #[arg(long)]
        user_id: u64,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Zone entry and exit history
    ZoneTracking {
        #[arg(long)]
        visitor_id: u64,
        #[arg(long)]
        zone_id: u64,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Who held a key
    KeyAssigned {
        #[arg(long)]
        key_id: u64,
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }

    #[test]
    fn test_parse_visitor_search() {
        let line = ShellLine::try_parse_from(["visitors", "list", "--first-name", "ali", "--limit", "5"])
            .unwrap();
        let Command::Visitors(VisitorsCommand::List(args)) = line.command else {
            panic!("expected visitors list");
        };
        let filter = args.into_filter(10);
        assert_eq!(filter.first_name.as_deref(), Some("ali"));
        assert_eq!(filter.pagination.limit, 5);
    }

    #[test]
    fn test_zero_limit_uses_page_size() {
        let filter = VisitorSearchArgs::default().into_filter(25);
        assert_eq!(filter.pagination.limit, 25);
    }

    #[test]
    fn test_parse_user_type_names() {
        let line = ShellLine::try_parse_from([
            "users",
            "create",
            "--username",
            "guard3",
            "--first-name",
            "Gus",
            "--last-name",
            "Guard",
            "--user-type",
            "Security Guard",
        ])
        .unwrap();
        let Command::Users(UsersCommand::Create(args)) = line.command else {
            panic!("expected users create");
        };
        assert_eq!(args.user_type, UserType::SecurityGuard);
    }

    #[test]
    fn test_rejects_unknown_status() {
        let result = ShellLine::try_parse_from(["keys", "create", "--key-number", "K9", "--status", "stolen"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_flags() {
        let line = ShellLine::try_parse_from(["visitors", "update", "3", "--clear-address"]).unwrap();
        let Command::Visitors(VisitorsCommand::Update { patch, .. }) = line.command else {
            panic!("expected visitors update");
        };
        let patch = VisitorPatch::from(patch);
        assert_eq!(patch.address, Some(None));
        assert_eq!(patch.email, None);

        let conflicting =
            ShellLine::try_parse_from(["users", "update", "4", "--email", "a@b.c", "--clear-email"]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn test_routes() {
        assert_eq!(Command::Dashboard.route(), Some(Route::Home));
        assert_eq!(Command::Logout.route(), None);
        assert_eq!(
            Command::Devices(DevicesCommand::Readers).route(),
            Some(Route::Configure)
        );
    }
}
