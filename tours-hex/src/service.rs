//! Tour Rating Application Service
//!
//! Orchestrates rating lifecycle and aggregation through the catalog and
//! rating store ports. Contains NO infrastructure logic - pure business
//! orchestration.

use tours_types::{
    AppError, CreateTourRequest, CustomerId, NewRating, Rating, RatingId, RatingRepository, Tour,
    TourCatalog, TourId, average_score,
};

/// Application service for tour ratings.
///
/// Generic over `T: TourCatalog` and `R: RatingRepository` - the adapters are
/// injected at compile time. The service is the only component allowed to
/// create, change or delete ratings; the (tour, customer) uniqueness rule is
/// left to the store so that racing creates cannot both succeed.
pub struct TourRatingService<T: TourCatalog, R: RatingRepository> {
    tours: T,
    ratings: R,
}

impl<T: TourCatalog, R: RatingRepository> TourRatingService<T, R> {
    /// Creates a new service over the given catalog and rating store.
    pub fn new(tours: T, ratings: R) -> Self {
        Self { tours, ratings }
    }

    /// Returns a reference to the underlying rating store.
    pub fn ratings(&self) -> &R {
        &self.ratings
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Tour Catalog
    // ─────────────────────────────────────────────────────────────────────────────

    /// Adds a tour to the catalog.
    pub async fn create_tour(&self, req: CreateTourRequest) -> Result<Tour, AppError> {
        Tour::validate(&req.title, req.price)?;
        self.tours.create_tour(req).await.map_err(Into::into)
    }

    /// Gets a tour by ID.
    pub async fn lookup_tour(&self, tour_id: TourId) -> Result<Tour, AppError> {
        self.tours
            .get_tour(tour_id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| tour_not_found(tour_id)))
    }

    /// Lists all tours.
    pub async fn lookup_tours(&self) -> Result<Vec<Tour>, AppError> {
        self.tours.list_tours().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────────

    /// All ratings across all tours, in storage order.
    pub async fn lookup_all(&self) -> Result<Vec<Rating>, AppError> {
        self.ratings.find_all().await.map_err(Into::into)
    }

    /// The rating with this internal id, if any.
    pub async fn lookup_rating_by_id(&self, id: RatingId) -> Result<Option<Rating>, AppError> {
        self.ratings.find_by_id(id).await.map_err(Into::into)
    }

    /// All ratings of an existing tour.
    pub async fn lookup_ratings_for_tour(&self, tour_id: TourId) -> Result<Vec<Rating>, AppError> {
        self.verify_tour(tour_id).await?;
        self.ratings
            .find_all_by_tour(tour_id)
            .await
            .map_err(Into::into)
    }

    /// The unique rating for a (tour, customer) pair.
    ///
    /// Fails with `NotFound` if the customer has not rated the tour.
    pub async fn verify_tour_rating(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
    ) -> Result<Rating, AppError> {
        self.ratings
            .find_by_tour_and_customer(tour_id, customer_id)
            .await
            .map_err(Into::into)
            .and_then(|opt| {
                opt.ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Tour-Rating pair for request ({} for customer {})",
                        tour_id, customer_id
                    ))
                })
            })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a customer's rating of a tour.
    ///
    /// Fails with `NotFound` for an unknown tour and with `DataIntegrity` if
    /// the customer already rated it.
    pub async fn create_new(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
        score: i32,
        comment: Option<String>,
    ) -> Result<Rating, AppError> {
        self.verify_tour(tour_id).await?;

        self.ratings
            .insert(NewRating::new(tour_id, customer_id, score, comment))
            .await
            .map_err(Into::into)
    }

    /// Gives the same score to a tour on behalf of several customers.
    ///
    /// All or nothing: if any of the ratings is rejected, none is stored and
    /// the first `DataIntegrity` failure is returned. Returns the number of
    /// ratings created.
    pub async fn rate_many(
        &self,
        tour_id: TourId,
        score: i32,
        customer_ids: &[CustomerId],
    ) -> Result<usize, AppError> {
        self.verify_tour(tour_id).await?;

        if customer_ids.is_empty() {
            return Ok(0);
        }

        let batch = customer_ids
            .iter()
            .map(|&customer_id| NewRating::new(tour_id, customer_id, score, None))
            .collect();

        let stored = self.ratings.insert_batch(batch).await.map_err(|e| {
            tracing::warn!(tour_id = %tour_id, error = %e, "rating batch rolled back");
            AppError::from(e)
        })?;

        Ok(stored.len())
    }

    /// Replaces the score and comment of an existing rating.
    pub async fn update(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
        score: i32,
        comment: Option<String>,
    ) -> Result<Rating, AppError> {
        let mut rating = self.verify_tour_rating(tour_id, customer_id).await?;
        rating.revise(score, comment);

        self.ratings.update(&rating).await.map_err(Into::into)
    }

    /// Changes only the fields that are provided.
    pub async fn update_some(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
        score: Option<i32>,
        comment: Option<String>,
    ) -> Result<Rating, AppError> {
        let mut rating = self.verify_tour_rating(tour_id, customer_id).await?;
        let score = score.unwrap_or(rating.score);
        let comment = comment.or_else(|| rating.comment.take());
        rating.revise(score, comment);

        self.ratings.update(&rating).await.map_err(Into::into)
    }

    /// Permanently removes a customer's rating of a tour.
    pub async fn delete(&self, tour_id: TourId, customer_id: CustomerId) -> Result<(), AppError> {
        let rating = self.verify_tour_rating(tour_id, customer_id).await?;

        self.ratings.delete(rating.id).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Aggregation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Mean score of a tour, computed from the ratings stored right now.
    ///
    /// Fails with `NotFound` when the tour has no ratings.
    pub async fn get_average_score(&self, tour_id: TourId) -> Result<f64, AppError> {
        let ratings = self.ratings.find_all_by_tour(tour_id).await?;

        average_score(&ratings)
            .ok_or_else(|| AppError::NotFound(format!("Tour {} has no ratings", tour_id)))
    }

    async fn verify_tour(&self, tour_id: TourId) -> Result<(), AppError> {
        if self.tours.tour_exists(tour_id).await? {
            Ok(())
        } else {
            Err(tour_not_found(tour_id))
        }
    }
}

fn tour_not_found(tour_id: TourId) -> AppError {
    AppError::NotFound(format!("Tour does not exist {}", tour_id))
}
