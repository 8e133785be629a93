//! Authentication primitives.
//!
//! Credential management and session issuance live in an upstream
//! identity service; this API only validates bearer tokens it receives.

pub mod jwt;
