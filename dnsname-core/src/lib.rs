//! dnsname Core
//!
//! Loosely-typed attribute values and the boundary conversion that turns them
//! into input for the Route 53 name normalizer

pub mod error;
pub mod value;
