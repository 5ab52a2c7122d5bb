//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls against the auth server and `types` defines the
//! shared wire schema.

pub mod api;
pub mod types;
