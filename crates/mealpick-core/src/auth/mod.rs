//! Authentication module for managing user sessions and credentials.
//!
//! This module provides:
//! - `CredentialStore`: in-memory username to password mapping
//! - `Session`: who is signed in for the current run
//!
//! Passwords are held in plaintext and nothing is written to disk. Both live
//! only as long as the process.

pub mod credentials;
pub mod session;

pub use credentials::{CredentialStore, DEFAULT_PASSWORD, DEFAULT_USERNAME};
pub use session::Session;
