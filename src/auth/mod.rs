//! Credential context for the backend scan API.
//!
//! Replaces ambient token storage with an explicit store handed to the
//! HTTP backend at construction.

mod credentials;

pub use credentials::{CredentialStore, Credentials, MemoryCredentialStore};
