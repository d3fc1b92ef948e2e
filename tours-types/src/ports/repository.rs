//! Rating store port trait.
//!
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{CustomerId, NewRating, Rating, RatingId, TourId};
use crate::error::RepoError;

/// Durable storage for ratings.
///
/// The store owns the (tour, customer) uniqueness rule: inserting a second
/// rating for the same pair MUST fail with `RepoError::DataIntegrity`.
#[async_trait::async_trait]
pub trait RatingRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Inserts a single rating.
    async fn insert(&self, rating: NewRating) -> Result<Rating, RepoError>;

    /// Inserts every rating in one transaction.
    ///
    /// If any insert fails, none of them may remain visible.
    async fn insert_batch(&self, ratings: Vec<NewRating>) -> Result<Vec<Rating>, RepoError>;

    /// Persists the score and comment of an existing rating.
    async fn update(&self, rating: &Rating) -> Result<Rating, RepoError>;

    /// Removes a rating. Fails with `NotFound` if nothing was deleted.
    async fn delete(&self, id: RatingId) -> Result<(), RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, RepoError>;

    async fn find_by_tour_and_customer(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
    ) -> Result<Option<Rating>, RepoError>;

    /// All ratings in storage order.
    async fn find_all(&self) -> Result<Vec<Rating>, RepoError>;

    /// All ratings of one tour in storage order.
    async fn find_all_by_tour(&self, tour_id: TourId) -> Result<Vec<Rating>, RepoError>;
}
