//! Networking modules for the remote subscription service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the auth calls and pass-through requests, `bearer` holds the
//! token every outbound request is decorated with, and `types` defines the
//! wire schema shared with the service.

pub mod api;
pub mod bearer;
pub mod types;
