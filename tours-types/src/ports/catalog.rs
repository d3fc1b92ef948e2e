//! Tour catalog port trait.

use crate::domain::{Tour, TourId};
use crate::dto::CreateTourRequest;
use crate::error::RepoError;

/// Source of tour identity. The rating service only reads from it to check
/// that a tour exists.
#[async_trait::async_trait]
pub trait TourCatalog: Send + Sync + 'static {
    /// Stores a new tour and returns it with its assigned id.
    async fn create_tour(&self, req: CreateTourRequest) -> Result<Tour, RepoError>;

    /// Gets a tour by ID.
    async fn get_tour(&self, id: TourId) -> Result<Option<Tour>, RepoError>;

    /// Lists all tours.
    async fn list_tours(&self) -> Result<Vec<Tour>, RepoError>;

    /// Returns true if a tour with this ID exists.
    async fn tour_exists(&self, id: TourId) -> Result<bool, RepoError> {
        Ok(self.get_tour(id).await?.is_some())
    }
}
