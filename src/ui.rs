//! Presentation capabilities handed to the session manager.
//!
//! The session logic never touches a router or toast widget directly. It
//! emits navigation targets and notifications through [`UiBridge`]; the
//! rendering surface decides what to do with them.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::routes::Route;

/// A transient user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

impl Toast {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}

/// Side effect requested by the session manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Navigate(Route),
    Notify(Toast),
}

/// Sink for navigation and notifications.
pub trait UiBridge: Send + Sync {
    fn navigate(&self, route: Route);
    fn notify(&self, toast: Toast);
}

/// Forward events to a UI task over a channel. A closed receiver drops them.
impl UiBridge for mpsc::UnboundedSender<UiEvent> {
    fn navigate(&self, route: Route) {
        if self.send(UiEvent::Navigate(route)).is_err() {
            tracing::debug!(%route, "ui channel closed; navigation dropped");
        }
    }

    fn notify(&self, toast: Toast) {
        if self.send(UiEvent::Notify(toast)).is_err() {
            tracing::debug!("ui channel closed; notification dropped");
        }
    }
}

/// Records every event in order. Used by headless callers and tests.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    #[must_use]
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Most recent navigation target, if any.
    #[must_use]
    pub fn last_route(&self) -> Option<Route> {
        self.events().into_iter().rev().find_map(|event| match event {
            UiEvent::Navigate(route) => Some(route),
            UiEvent::Notify(_) => None,
        })
    }

    /// Most recent notification, if any.
    #[must_use]
    pub fn last_toast(&self) -> Option<Toast> {
        self.events().into_iter().rev().find_map(|event| match event {
            UiEvent::Notify(toast) => Some(toast),
            UiEvent::Navigate(_) => None,
        })
    }

    fn push(&self, event: UiEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

impl UiBridge for RecordingUi {
    fn navigate(&self, route: Route) {
        self.push(UiEvent::Navigate(route));
    }

    fn notify(&self, toast: Toast) {
        self.push(UiEvent::Notify(toast));
    }
}
