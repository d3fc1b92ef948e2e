//! Database row types and error mapping shared by the SQLite and PostgreSQL adapters.

use sqlx::FromRow;
use sqlx::error::ErrorKind;

use tours_types::{
    CustomerId, Difficulty, Rating, RatingId, Region, RepoError, Tour, TourId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Tour row from database.
#[derive(FromRow)]
pub struct DbTour {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub duration: String,
    pub package_code: String,
    pub difficulty: String,
    pub region: String,
}

/// Rating row from database.
#[derive(FromRow)]
pub struct DbRating {
    pub id: i64,
    pub tour_id: i64,
    pub customer_id: i64,
    pub score: i32,
    pub comment: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

impl DbTour {
    /// Convert database row to domain Tour.
    pub fn into_domain(self) -> Result<Tour, RepoError> {
        let difficulty: Difficulty = self.difficulty.parse().map_err(RepoError::Domain)?;
        let region = Region::find_by_label(&self.region).map_err(RepoError::Domain)?;

        Ok(Tour {
            id: TourId(self.id),
            title: self.title,
            description: self.description,
            price: self.price,
            duration: self.duration,
            package_code: self.package_code,
            difficulty,
            region,
        })
    }
}

impl DbRating {
    /// Convert database row to domain Rating.
    pub fn into_domain(self) -> Rating {
        Rating::from_parts(
            RatingId(self.id),
            TourId(self.tour_id),
            CustomerId(self.customer_id),
            self.score,
            self.comment,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a sqlx error, reporting constraint violations as `DataIntegrity`.
pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::CheckViolation
            | ErrorKind::NotNullViolation => {
                return RepoError::DataIntegrity(db_err.message().to_string());
            }
            _ => {}
        }
    }
    RepoError::Database(err.to_string())
}

/// Rejects tour fields the domain does not accept before they hit the database.
///
/// The service validates too; adapters repeat the check so they stay safe to
/// call directly.
pub fn validate_tour(title: &str, price: i64) -> Result<(), RepoError> {
    Tour::validate(title, price).map_err(RepoError::Domain)
}
