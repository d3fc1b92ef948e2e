//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod catalog;
mod repository;

pub use catalog::TourCatalog;
pub use repository::RatingRepository;
