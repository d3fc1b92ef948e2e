//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CustomerId, Difficulty, Region, TourId};

// ─────────────────────────────────────────────────────────────────────────────
// Tour DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to add a tour to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTourRequest {
    #[schema(example = "Big Sur Retreat")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Price in whole currency units
    #[schema(example = 750)]
    pub price: i64,
    #[serde(default)]
    #[schema(example = "3 days")]
    pub duration: String,
    #[schema(example = "BC")]
    pub package_code: String,
    pub difficulty: Difficulty,
    pub region: Region,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rating DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create or fully replace a customer's rating of a tour.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingRequest {
    pub customer_id: CustomerId,
    /// Star score, 0-5 by convention
    #[schema(example = 4)]
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Great views")]
    pub comment: Option<String>,
}

/// Request to change some fields of an existing rating.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatchRatingRequest {
    pub customer_id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request to give the same score to a tour on behalf of several customers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateManyRequest {
    #[schema(example = 5)]
    pub score: i32,
    #[schema(example = json!([100, 101, 102]))]
    pub customers: Vec<CustomerId>,
}

/// Response after a batch of ratings was stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateManyResponse {
    /// Number of ratings created
    pub created: usize,
}

/// Average score of a tour.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageScoreResponse {
    pub tour_id: TourId,
    #[schema(example = 4.5)]
    pub average: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Hypermedia
// ─────────────────────────────────────────────────────────────────────────────

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    #[schema(example = "http://localhost:3000/ratings/1")]
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Links attached to a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub tour: Link,
}

/// A rating as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingDto {
    pub score: i32,
    pub comment: Option<String>,
    pub customer_id: CustomerId,
    #[serde(rename = "_links")]
    pub links: RatingLinks,
}

/// Embedded ratings of a collection response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddedRatings {
    pub ratings: Vec<RatingDto>,
}

/// Links attached to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// A list of ratings as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedRatings,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

impl RatingCollection {
    /// Number of ratings in the collection.
    pub fn len(&self) -> usize {
        self.embedded.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embedded.ratings.is_empty()
    }
}
