//! Step definitions for report lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
