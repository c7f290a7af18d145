//! In-memory adapters for report lifecycle persistence.

mod repository;

pub use repository::InMemoryReportRepository;
