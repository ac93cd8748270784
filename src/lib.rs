//! # stockpredictor-client
//!
//! Session and authentication core for the StockPredictor subscription
//! client. Establishes, persists, validates, attaches, and tears down the
//! user's authenticated identity, and gates the protected `/app` views.
//!
//! ARCHITECTURE
//! ============
//! `store` owns the durable token slot, `net` talks to the remote service and
//! decorates requests with the bearer token, `session` is the state machine
//! that keeps the three in step, and `guard` decides what a protected view
//! may render. Presentation is reached only through the `ui` capabilities.

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod guard;
pub mod net;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod ui;
