//! Adapter implementations for report lifecycle ports.

pub mod memory;
pub mod postgres;
