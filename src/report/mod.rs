//! Report lifecycle management for Reportline.
//!
//! Reports are submitted anonymously, listed while open, closed by whoever
//! knows the password chosen at submission, and annotated with comments.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
