//! Interception pipeline.
//!
//! Fixed order, outermost first: [`auth::authenticate`] installs the
//! request-scoped identity, [`audit::record_cycle`] wraps the rest of the
//! pipeline in an audit record, [`auth::require_authentication`] enforces
//! the route policy. The order matters: rejected requests are still
//! audited, and the audit record sees the identity decision's outcome.

pub mod audit;
pub mod auth;
