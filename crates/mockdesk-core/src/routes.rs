//! Route table and the authenticated/unauthenticated redirect gate.

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidInputError;
use crate::Error;

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Users,
    Settings,
    Info,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Login,
        Route::Signup,
        Route::Dashboard,
        Route::Users,
        Route::Settings,
        Route::Info,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::Users => "/user",
            Route::Settings => "/settings",
            Route::Info => "/info",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Dashboard => "Dashboard",
            Route::Users => "Users",
            Route::Settings => "Settings",
            Route::Info => "Info",
        }
    }

    /// Exact path lookup. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Everything except the login and signup pages.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::Signup)
    }

    /// Where a session lands when it has nowhere better to go.
    pub fn landing(authenticated: bool) -> Route {
        if authenticated {
            Route::Dashboard
        } else {
            Route::Login
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| {
            InvalidInputError::Other {
                message: format!("unknown route: {}", s),
            }
            .into()
        })
    }
}

/// What the shell does for a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// The page that ends up on screen.
    pub fn route(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }

    pub fn is_redirect(self) -> bool {
        matches!(self, Navigation::Redirect(_))
    }
}

/// Decide what to show for `path`.
///
/// Redirecting an authenticated session away from login never triggers
/// another login.
pub fn resolve(path: &str, authenticated: bool) -> Navigation {
    let Some(route) = Route::from_path(path) else {
        return Navigation::Redirect(Route::landing(authenticated));
    };

    match (route.requires_auth(), authenticated) {
        (true, false) => Navigation::Redirect(Route::Login),
        (false, true) => Navigation::Redirect(Route::Dashboard),
        _ => Navigation::Render(route),
    }
}

/// Side drawer entries, top to bottom.
pub fn drawer() -> [Route; 4] {
    [Route::Dashboard, Route::Users, Route::Settings, Route::Info]
}
