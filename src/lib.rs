//! Reportline: anonymous report submission and lifecycle tracking.
//!
//! This crate lets anyone submit a report, list the reports that are still
//! open, close a report with the password chosen at submission, and attach
//! comments to reports.
//!
//! # Architecture
//!
//! Reportline follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`report`]: Report lifecycle domain, persistence ports and services
//! - [`http`]: axum router exposing the lifecycle operations
//! - [`config`]: Environment-based server configuration
//! - [`telemetry`]: `tracing` subscriber setup

pub mod config;
pub mod http;
pub mod report;
pub mod telemetry;
