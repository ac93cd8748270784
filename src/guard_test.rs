use super::*;
use crate::net::types::{SubscriptionTier, User};
use crate::routes::AppView;

fn signed_in() -> SessionState {
    SessionState::authenticated(
        "t1",
        User {
            id: 1,
            username: "demo".to_owned(),
            email: "d@x.com".to_owned(),
            subscription_tier: SubscriptionTier::Pro,
        },
    )
}

// =============================================================
// should_redirect_unauth
// =============================================================

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    assert!(should_redirect_unauth(&SessionState::Unauthenticated));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&SessionState::Initializing));
}

#[test]
fn should_not_redirect_when_user_exists() {
    assert!(!should_redirect_unauth(&signed_in()));
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn protected_view_renders_when_authenticated() {
    for view in AppView::ALL {
        assert_eq!(evaluate(&signed_in(), Route::App(view)), GuardDecision::Render);
    }
}

#[test]
fn protected_view_shows_loading_while_initializing() {
    assert_eq!(evaluate(&SessionState::Initializing, Route::DASHBOARD), GuardDecision::Loading);
}

#[test]
fn protected_view_redirects_to_login_and_drops_target() {
    let target = Route::App(AppView::Portfolio);
    assert_eq!(
        evaluate(&SessionState::Unauthenticated, target),
        GuardDecision::Redirect { to: Route::Login, discarded: target }
    );
}

#[test]
fn public_views_always_render() {
    for state in [SessionState::Initializing, SessionState::Unauthenticated, signed_in()] {
        for route in [Route::Landing, Route::Login, Route::Register] {
            assert_eq!(evaluate(&state, route), GuardDecision::Render);
        }
    }
}
