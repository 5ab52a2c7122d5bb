//! Client-side state containers.
//!
//! ARCHITECTURE
//! ============
//! State modules are plain Rust types with no DOM access; pages wrap them in
//! signals and translate their outputs into browser effects.

pub mod auth;
pub mod login_form;
