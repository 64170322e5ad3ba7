//! Assessment engine for amending submitted legal-aid claims.
//!
//! [`assessment`] holds the claim field model, the outcome rule engine, row
//! projection, totals and validation, plus the session service and HTTP router
//! that drive them.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
