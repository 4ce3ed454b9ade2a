//! # gantry-jwt
//!
//! Bearer token handling for the Gantry gateway.
//!
//! This crate provides functionality for:
//! - Verifying HMAC-signed bearer tokens (signature + expiry)
//! - Extracting identity claims (subject, role)
//! - The closed set of roles the gateway recognizes
//!
//! Verification is a pure function of the token string and the configured
//! secret: no network, no storage, no clock state beyond "now". Callers
//! that only need a yes/no answer use [`TokenValidator::validate`]; callers
//! that need the identity use [`TokenValidator::claims`].

pub mod claims;
pub mod error;
pub mod token;

pub use claims::{Claims, Role};
pub use error::TokenError;
pub use token::TokenValidator;
