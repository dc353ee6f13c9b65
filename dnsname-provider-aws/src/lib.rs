//! dnsname AWS Provider
//!
//! Route 53 name handling: the canonical API representation of domain names,
//! identifier cleanup, record IDs and name-aware drift detection

pub mod route53;
