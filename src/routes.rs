//! Application route table.
//!
//! Public views: landing, login, register. Everything under `/app` is a
//! protected view and goes through the route guard.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;

/// Views nested under the authenticated `/app` shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppView {
    Dashboard,
    Predictions,
    Portfolio,
    Alerts,
    Social,
    Backtest,
    Education,
    Settings,
}

impl AppView {
    pub const ALL: [Self; 8] = [
        Self::Dashboard,
        Self::Predictions,
        Self::Portfolio,
        Self::Alerts,
        Self::Social,
        Self::Backtest,
        Self::Education,
        Self::Settings,
    ];

    fn segment(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Predictions => "predictions",
            Self::Portfolio => "portfolio",
            Self::Alerts => "alerts",
            Self::Social => "social",
            Self::Backtest => "backtest",
            Self::Education => "education",
            Self::Settings => "settings",
        }
    }
}

/// A navigation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    App(AppView),
}

impl Route {
    /// Default authenticated landing view.
    pub const DASHBOARD: Self = Self::App(AppView::Dashboard);

    /// Resolve a URL path. Trailing slashes are ignored and the bare `/app`
    /// shell resolves to its dashboard. Unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Landing),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/app" => Some(Self::DASHBOARD),
            other => {
                let segment = other.strip_prefix("/app/")?;
                AppView::ALL
                    .into_iter()
                    .find(|view| view.segment() == segment)
                    .map(Self::App)
            }
        }
    }

    /// Canonical path of the route.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::App(view) => match view {
                AppView::Dashboard => "/app/dashboard",
                AppView::Predictions => "/app/predictions",
                AppView::Portfolio => "/app/portfolio",
                AppView::Alerts => "/app/alerts",
                AppView::Social => "/app/social",
                AppView::Backtest => "/app/backtest",
                AppView::Education => "/app/education",
                AppView::Settings => "/app/settings",
            },
        }
    }

    /// Whether rendering this route needs an authenticated session.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::App(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
