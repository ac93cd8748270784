use super::*;

#[test]
fn recording_ui_keeps_order() {
    let ui = RecordingUi::default();
    ui.notify(Toast::Success("Welcome back!".to_owned()));
    ui.navigate(Route::DASHBOARD);
    assert_eq!(
        ui.events(),
        vec![
            UiEvent::Notify(Toast::Success("Welcome back!".to_owned())),
            UiEvent::Navigate(Route::DASHBOARD),
        ]
    );
    assert_eq!(ui.last_route(), Some(Route::DASHBOARD));
    assert_eq!(ui.last_toast().map(|t| t.message().to_owned()), Some("Welcome back!".to_owned()));
}

#[test]
fn recording_ui_empty() {
    let ui = RecordingUi::default();
    assert!(ui.last_route().is_none());
    assert!(ui.last_toast().is_none());
}

#[tokio::test]
async fn channel_bridge_forwards_events() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tx.navigate(Route::Login);
    tx.notify(Toast::Error("Login failed".to_owned()));
    assert_eq!(rx.recv().await, Some(UiEvent::Navigate(Route::Login)));
    assert_eq!(rx.recv().await, Some(UiEvent::Notify(Toast::Error("Login failed".to_owned()))));
}

#[test]
fn channel_bridge_tolerates_closed_receiver() {
    let (tx, rx) = mpsc::unbounded_channel::<UiEvent>();
    drop(rx);
    tx.navigate(Route::Landing);
    tx.notify(Toast::Success("Logged out successfully".to_owned()));
}
