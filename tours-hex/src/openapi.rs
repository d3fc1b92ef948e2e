//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use tours_types::domain::{CustomerId, Difficulty, RatingId, Region, Tour, TourId};
use tours_types::dto::{
    AverageScoreResponse, CollectionLinks, CreateTourRequest, EmbeddedRatings, Link,
    PatchRatingRequest, RateManyRequest, RateManyResponse, RatingCollection, RatingDto,
    RatingLinks, RatingRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Add a tour to the catalog
#[utoipa::path(
    post,
    path = "/tours",
    tag = "tours",
    request_body = CreateTourRequest,
    responses(
        (status = 201, description = "Tour created", body = Tour),
        (status = 400, description = "Blank title or negative price")
    )
)]
async fn create_tour() {}

/// List all tours
#[utoipa::path(
    get,
    path = "/tours",
    tag = "tours",
    responses(
        (status = 200, description = "All tours", body = Vec<Tour>)
    )
)]
async fn list_tours() {}

/// Get tour by ID
#[utoipa::path(
    get,
    path = "/tours/{tour_id}",
    tag = "tours",
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Tour details", body = Tour),
        (status = 404, description = "Tour not found")
    )
)]
async fn get_tour() {}

/// List every rating
#[utoipa::path(
    get,
    path = "/ratings",
    tag = "ratings",
    responses(
        (status = 200, description = "All ratings", body = RatingCollection)
    )
)]
async fn list_ratings() {}

/// Get rating by its internal ID
#[utoipa::path(
    get,
    path = "/ratings/{id}",
    tag = "ratings",
    params(
        ("id" = RatingId, Path, description = "Rating ID")
    ),
    responses(
        (status = 200, description = "Rating", body = RatingDto),
        (status = 404, description = "Rating not found")
    )
)]
async fn get_rating() {}

/// Rate a tour
#[utoipa::path(
    post,
    path = "/tours/{tour_id}/ratings",
    tag = "ratings",
    request_body = RatingRequest,
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 201, description = "Rating created", body = RatingDto),
        (status = 404, description = "Tour not found"),
        (status = 409, description = "Customer already rated this tour")
    )
)]
async fn create_rating() {}

/// List the ratings of a tour
#[utoipa::path(
    get,
    path = "/tours/{tour_id}/ratings",
    tag = "ratings",
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Ratings of the tour", body = RatingCollection),
        (status = 404, description = "Tour not found")
    )
)]
async fn list_tour_ratings() {}

/// Replace a customer's rating
#[utoipa::path(
    put,
    path = "/tours/{tour_id}/ratings",
    tag = "ratings",
    request_body = RatingRequest,
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Rating updated", body = RatingDto),
        (status = 404, description = "No rating for this tour and customer")
    )
)]
async fn update_rating() {}

/// Change some fields of a customer's rating
#[utoipa::path(
    patch,
    path = "/tours/{tour_id}/ratings",
    tag = "ratings",
    request_body = PatchRatingRequest,
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Rating updated", body = RatingDto),
        (status = 404, description = "No rating for this tour and customer")
    )
)]
async fn patch_rating() {}

/// Delete a customer's rating
#[utoipa::path(
    delete,
    path = "/tours/{tour_id}/ratings/{customer_id}",
    tag = "ratings",
    params(
        ("tour_id" = TourId, Path, description = "Tour ID"),
        ("customer_id" = CustomerId, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 404, description = "No rating for this tour and customer")
    )
)]
async fn delete_rating() {}

/// Rate a tour for several customers at once
#[utoipa::path(
    post,
    path = "/tours/{tour_id}/ratings/batch",
    tag = "ratings",
    request_body = RateManyRequest,
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 201, description = "All ratings created", body = RateManyResponse),
        (status = 404, description = "Tour not found"),
        (status = 409, description = "A customer already rated this tour; nothing was stored")
    )
)]
async fn rate_many() {}

/// Average score of a tour
#[utoipa::path(
    get,
    path = "/tours/{tour_id}/ratings/average",
    tag = "ratings",
    params(
        ("tour_id" = TourId, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Average score", body = AverageScoreResponse),
        (status = 404, description = "Tour has no ratings")
    )
)]
async fn average_score() {}

/// OpenAPI documentation for the Tour Ratings API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tour Ratings Service API",
        version = "1.0.0",
        description = "Customers rate tours. One rating per customer and tour; batch ratings are all or nothing.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_tour,
        list_tours,
        get_tour,
        list_ratings,
        get_rating,
        create_rating,
        list_tour_ratings,
        update_rating,
        patch_rating,
        delete_rating,
        rate_many,
        average_score,
    ),
    components(
        schemas(
            Tour,
            TourId,
            RatingId,
            CustomerId,
            Difficulty,
            Region,
            CreateTourRequest,
            RatingRequest,
            PatchRatingRequest,
            RateManyRequest,
            RateManyResponse,
            AverageScoreResponse,
            Link,
            RatingLinks,
            RatingDto,
            EmbeddedRatings,
            CollectionLinks,
            RatingCollection,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tours", description = "Tour catalog"),
        (name = "ratings", description = "Tour ratings and aggregates"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_rating_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/tours/{tour_id}/ratings/batch"));
        assert!(paths.contains_key("/tours/{tour_id}/ratings/{customer_id}"));
        assert!(paths.contains_key("/ratings/{id}"));
    }
}
