//! Navigation targets and role-based section access

use std::fmt;

use crate::models::UserType;

/// A view the console can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Dashboard
    Home,
    Login,
    Users,
    Visitors,
    Zones,
    Keys,
    Passes,
    Reports,
    Configure,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Login,
        Route::Users,
        Route::Visitors,
        Route::Zones,
        Route::Keys,
        Route::Passes,
        Route::Reports,
        Route::Configure,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Users => "/users",
            Route::Visitors => "/visitors",
            Route::Zones => "/zones",
            Route::Keys => "/keys",
            Route::Passes => "/passes",
            Route::Reports => "/reports",
            Route::Configure => "/configure",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    /// Whether a role may open this section
    pub fn allows(&self, role: UserType) -> bool {
        match role {
            UserType::Admin => true,
            UserType::Receptionist => matches!(
                self,
                Route::Home
                    | Route::Login
                    | Route::Visitors
                    | Route::Passes
                    | Route::Keys
                    | Route::Reports
            ),
            UserType::SecurityGuard => {
                matches!(self, Route::Home | Route::Login | Route::Visitors)
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
