//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each form renders its own inputs and reports upward through callbacks;
//! `app::AuthPage` decides which one is visible and talks to the server.

pub mod login;
pub mod signup;
