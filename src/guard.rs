//! Route guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected view applies the same decision: render when signed in,
//! show a neutral loading indicator while startup resolution is pending, and
//! redirect to `/login` once the session is known to be absent.
//!
//! The redirect does not remember where the user was going. The dropped
//! target is carried in the decision and logged so that limitation stays
//! visible to callers.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::Route;
use crate::state::auth::SessionState;

/// What a view should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Startup resolution is still running; render a placeholder, do not redirect.
    Loading,
    /// Navigate to `to`; `discarded` is the requested route, not preserved.
    Redirect { to: Route, discarded: Route },
}

/// True once auth has loaded and no user is present.
#[must_use]
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    !state.is_loading() && state.user().is_none()
}

/// Decide how `target` may be rendered under `state`.
#[must_use]
pub fn evaluate(state: &SessionState, target: Route) -> GuardDecision {
    if !target.requires_auth() || state.is_authenticated() {
        return GuardDecision::Render;
    }
    if state.is_loading() {
        return GuardDecision::Loading;
    }
    tracing::debug!(requested = %target, "unauthenticated access; redirecting to login without return path");
    GuardDecision::Redirect { to: Route::Login, discarded: target }
}
