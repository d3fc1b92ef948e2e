//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use tours_types::{
    CreateTourRequest, CustomerId, NewRating, Rating, RatingId, RatingRepository, RepoError, Tour,
    TourCatalog, TourId,
};

use crate::types::{DbRating, DbTour, map_sqlx_error, validate_tour};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tours_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_tour_ratings_pg.sql"),
        "0002",
    )
    .await?;

    tracing::debug!("applied postgres migrations");
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

async fn insert_rating(
    conn: &mut PgConnection,
    rating: &NewRating,
) -> Result<RatingId, RepoError> {
    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO tour_ratings (tour_id, customer_id, score, comment) VALUES ($1, $2, $3, $4) RETURNING id"#,
    )
    .bind(rating.tour_id.get())
    .bind(rating.customer_id.get())
    .bind(rating.score)
    .bind(rating.comment.clone())
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    Ok(RatingId(id))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tour catalog
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TourCatalog for PostgresRepo {
    async fn create_tour(&self, req: CreateTourRequest) -> Result<Tour, RepoError> {
        validate_tour(&req.title, req.price)?;

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO tours (title, description, price, duration, package_code, difficulty, region)
               VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id"#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.duration)
        .bind(&req.package_code)
        .bind(req.difficulty.name())
        .bind(req.region.label())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Tour {
            id: TourId(id),
            title: req.title,
            description: req.description,
            price: req.price,
            duration: req.duration,
            package_code: req.package_code,
            difficulty: req.difficulty,
            region: req.region,
        })
    }

    async fn get_tour(&self, id: TourId) -> Result<Option<Tour>, RepoError> {
        let row: Option<DbTour> = sqlx::query_as(
            r#"SELECT id, title, description, price, duration, package_code, difficulty, region
               FROM tours WHERE id = $1"#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(DbTour::into_domain).transpose()
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, RepoError> {
        let rows: Vec<DbTour> = sqlx::query_as(
            r#"SELECT id, title, description, price, duration, package_code, difficulty, region
               FROM tours ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(DbTour::into_domain).collect()
    }

    async fn tour_exists(&self, id: TourId) -> Result<bool, RepoError> {
        let found: Option<i64> = sqlx::query_scalar(r#"SELECT id FROM tours WHERE id = $1"#)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(found.is_some())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rating store
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RatingRepository for PostgresRepo {
    async fn insert(&self, rating: NewRating) -> Result<Rating, RepoError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = insert_rating(&mut conn, &rating).await?;
        Ok(rating.into_rating(id))
    }

    async fn insert_batch(&self, ratings: Vec<NewRating>) -> Result<Vec<Rating>, RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        let mut stored = Vec::with_capacity(ratings.len());
        for rating in ratings {
            // Postgres aborts the transaction on the first failed statement; dropping it rolls back.
            let id = insert_rating(&mut db_tx, &rating).await?;
            stored.push(rating.into_rating(id));
        }

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        tracing::debug!(count = stored.len(), "committed rating batch");
        Ok(stored)
    }

    async fn update(&self, rating: &Rating) -> Result<Rating, RepoError> {
        let result = sqlx::query(r#"UPDATE tour_ratings SET score = $1, comment = $2 WHERE id = $3"#)
            .bind(rating.score)
            .bind(&rating.comment)
            .bind(rating.id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(rating.clone())
    }

    async fn delete(&self, id: RatingId) -> Result<(), RepoError> {
        let result = sqlx::query(r#"DELETE FROM tour_ratings WHERE id = $1"#)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, RepoError> {
        let row: Option<DbRating> = sqlx::query_as(
            r#"SELECT id, tour_id, customer_id, score, comment FROM tour_ratings WHERE id = $1"#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DbRating::into_domain))
    }

    async fn find_by_tour_and_customer(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
    ) -> Result<Option<Rating>, RepoError> {
        let row: Option<DbRating> = sqlx::query_as(
            r#"SELECT id, tour_id, customer_id, score, comment FROM tour_ratings
               WHERE tour_id = $1 AND customer_id = $2"#,
        )
        .bind(tour_id.get())
        .bind(customer_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DbRating::into_domain))
    }

    async fn find_all(&self) -> Result<Vec<Rating>, RepoError> {
        let rows: Vec<DbRating> = sqlx::query_as(
            r#"SELECT id, tour_id, customer_id, score, comment FROM tour_ratings ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(DbRating::into_domain).collect())
    }

    async fn find_all_by_tour(&self, tour_id: TourId) -> Result<Vec<Rating>, RepoError> {
        let rows: Vec<DbRating> = sqlx::query_as(
            r#"SELECT id, tour_id, customer_id, score, comment FROM tour_ratings
               WHERE tour_id = $1 ORDER BY id"#,
        )
        .bind(tour_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(DbRating::into_domain).collect())
    }
}
