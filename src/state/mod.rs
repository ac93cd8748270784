//! Shared client-side state models.
//!
//! DESIGN
//! ======
//! State is split by domain so views depend on small focused models. Only the
//! auth session lives here; business data is owned by the views that fetch it.

pub mod auth;
