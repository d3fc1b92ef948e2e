//! HTTP request handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use tours_types::{
    AppError, AverageScoreResponse, CreateTourRequest, CustomerId, PatchRatingRequest,
    RateManyRequest, RateManyResponse, RatingId, RatingRepository, RatingRequest, TourCatalog,
    TourId,
};

use super::assembler::RatingAssembler;
use crate::TourRatingService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<T: TourCatalog, R: RatingRepository> {
    pub service: TourRatingService<T, R>,
    pub assembler: RatingAssembler,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DataIntegrity(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_id<I: FromStr>(raw: &str, what: &str) -> Result<I, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(AppError::BadRequest(format!("Invalid {} ID", what))))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document for the whole API.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tours
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(title = %req.title))]
pub async fn create_tour<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Json(req): Json<CreateTourRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state.service.create_tour(req).await?;
    tracing::info!(tour_id = %tour.id, "tour created");
    Ok((StatusCode::CREATED, Json(tour)))
}

/// List all tours.
#[tracing::instrument(skip(state))]
pub async fn list_tours<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let tours = state.service.lookup_tours().await?;
    Ok(Json(tours))
}

/// Get tour by ID.
#[tracing::instrument(skip(state), fields(tour_id = %id))]
pub async fn get_tour<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let tour = state.service.lookup_tour(tour_id).await?;
    Ok(Json(tour))
}

// ─────────────────────────────────────────────────────────────────────────────
// Ratings
// ─────────────────────────────────────────────────────────────────────────────

/// List every rating of every tour.
#[tracing::instrument(skip(state))]
pub async fn list_ratings<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let ratings = state.service.lookup_all().await?;
    Ok(Json(state.assembler.to_collection(ratings, "/ratings")))
}

/// Get rating by its internal ID.
#[tracing::instrument(skip(state), fields(rating_id = %id))]
pub async fn get_rating<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rating_id: RatingId = parse_id(&id, "rating")?;

    let rating = state
        .service
        .lookup_rating_by_id(rating_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rating {} not found", rating_id)))?;

    Ok(Json(state.assembler.to_model(rating)))
}

#[tracing::instrument(skip(state), fields(tour_id = %id, customer_id = %req.customer_id))]
pub async fn create_rating<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
    Json(req): Json<RatingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let rating = state
        .service
        .create_new(tour_id, req.customer_id, req.score, req.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(state.assembler.to_model(rating))))
}

/// List the ratings of one tour.
#[tracing::instrument(skip(state), fields(tour_id = %id))]
pub async fn list_tour_ratings<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let ratings = state.service.lookup_ratings_for_tour(tour_id).await?;
    let path = format!("/tours/{}/ratings", tour_id);
    Ok(Json(state.assembler.to_collection(ratings, &path)))
}

/// Replace score and comment of a customer's rating.
#[tracing::instrument(skip(state), fields(tour_id = %id, customer_id = %req.customer_id))]
pub async fn update_rating<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
    Json(req): Json<RatingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let rating = state
        .service
        .update(tour_id, req.customer_id, req.score, req.comment)
        .await?;

    Ok(Json(state.assembler.to_model(rating)))
}

/// Change only the supplied fields of a customer's rating.
#[tracing::instrument(skip(state), fields(tour_id = %id, customer_id = %req.customer_id))]
pub async fn patch_rating<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
    Json(req): Json<PatchRatingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let rating = state
        .service
        .update_some(tour_id, req.customer_id, req.score, req.comment)
        .await?;

    Ok(Json(state.assembler.to_model(rating)))
}

#[tracing::instrument(skip(state), fields(tour_id = %tour, customer_id = %customer))]
pub async fn delete_rating<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path((tour, customer)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&tour, "tour")?;
    let customer_id: CustomerId = parse_id(&customer, "customer")?;

    state.service.delete(tour_id, customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rate a tour with the same score for several customers, all or nothing.
#[tracing::instrument(skip(state, req), fields(tour_id = %id, customers = req.customers.len()))]
pub async fn rate_many<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
    Json(req): Json<RateManyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let created = state
        .service
        .rate_many(tour_id, req.score, &req.customers)
        .await?;

    Ok((StatusCode::CREATED, Json(RateManyResponse { created })))
}

#[tracing::instrument(skip(state), fields(tour_id = %id))]
pub async fn average_score<T: TourCatalog, R: RatingRepository>(
    State(state): State<Arc<AppState<T, R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tour_id: TourId = parse_id(&id, "tour")?;

    let average = state.service.get_average_score(tour_id).await?;
    Ok(Json(AverageScoreResponse { tour_id, average }))
}
