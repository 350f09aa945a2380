//! Session handling.
//!
//! - [`jwt`] -- verifies the HS256 bearer tokens issued by the auth service.

pub mod jwt;
