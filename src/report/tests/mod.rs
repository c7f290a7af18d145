//! Unit tests for the report lifecycle module.
