//! Domain models for the tour ratings service.

pub mod rating;
pub mod tour;

pub use rating::{CustomerId, NewRating, Rating, RatingId, average_score};
pub use tour::{Difficulty, Region, Tour, TourId};
