use super::*;

#[test]
fn parse_public_routes() {
    assert_eq!(Route::parse("/"), Some(Route::Landing));
    assert_eq!(Route::parse(""), Some(Route::Landing));
    assert_eq!(Route::parse("/login"), Some(Route::Login));
    assert_eq!(Route::parse("/register/"), Some(Route::Register));
}

#[test]
fn parse_app_shell_resolves_to_dashboard() {
    assert_eq!(Route::parse("/app"), Some(Route::DASHBOARD));
    assert_eq!(Route::parse("/app/"), Some(Route::DASHBOARD));
}

#[test]
fn parse_every_app_view_round_trips_through_path() {
    for view in AppView::ALL {
        let route = Route::App(view);
        assert_eq!(Route::parse(route.path()), Some(route));
    }
}

#[test]
fn parse_ignores_query_and_fragment() {
    assert_eq!(Route::parse("/app/alerts?filter=active"), Some(Route::App(AppView::Alerts)));
    assert_eq!(Route::parse("/login#top"), Some(Route::Login));
}

#[test]
fn parse_unknown_paths() {
    assert_eq!(Route::parse("/forgot-password"), None);
    assert_eq!(Route::parse("/app/unknown"), None);
    assert_eq!(Route::parse("/app/dashboard/extra"), None);
    assert_eq!(Route::parse("/application"), None);
}

#[test]
fn only_app_routes_require_auth() {
    assert!(!Route::Landing.requires_auth());
    assert!(!Route::Login.requires_auth());
    assert!(!Route::Register.requires_auth());
    assert!(Route::App(AppView::Settings).requires_auth());
}

#[test]
fn display_is_canonical_path() {
    assert_eq!(Route::DASHBOARD.to_string(), "/app/dashboard");
    assert_eq!(Route::Landing.to_string(), "/");
}
