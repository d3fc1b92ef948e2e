//! # Tours Client SDK
//!
//! A typed Rust client for the Tour Ratings API.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tours_types::{
    AverageScoreResponse, CreateTourRequest, CustomerId, PatchRatingRequest, RateManyRequest,
    RateManyResponse, RatingCollection, RatingDto, RatingId, RatingRequest, Tour, TourId,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Tour Ratings API client.
pub struct ToursClient {
    base_url: String,
    http: Client,
}

impl ToursClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Tours
    // ─────────────────────────────────────────────────────────────────────────────

    /// Adds a tour to the catalog.
    pub async fn create_tour(&self, req: &CreateTourRequest) -> Result<Tour, ClientError> {
        self.send(Method::POST, "/tours", Some(req)).await
    }

    pub async fn get_tour(&self, id: TourId) -> Result<Tour, ClientError> {
        self.get(&format!("/tours/{}", id)).await
    }

    pub async fn list_tours(&self) -> Result<Vec<Tour>, ClientError> {
        self.get("/tours").await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Ratings
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every rating of every tour.
    pub async fn list_ratings(&self) -> Result<RatingCollection, ClientError> {
        self.get("/ratings").await
    }

    pub async fn get_rating(&self, id: RatingId) -> Result<RatingDto, ClientError> {
        self.get(&format!("/ratings/{}", id)).await
    }

    /// Lists the ratings of one tour.
    pub async fn ratings_for_tour(&self, tour_id: TourId) -> Result<RatingCollection, ClientError> {
        self.get(&format!("/tours/{}/ratings", tour_id)).await
    }

    /// Rates a tour on behalf of a customer.
    pub async fn create_rating(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
        score: i32,
        comment: Option<String>,
    ) -> Result<RatingDto, ClientError> {
        let req = RatingRequest {
            customer_id,
            score,
            comment,
        };
        self.send(Method::POST, &format!("/tours/{}/ratings", tour_id), Some(&req))
            .await
    }

    /// Rates a tour with one score for several customers; returns the count created.
    pub async fn rate_many(
        &self,
        tour_id: TourId,
        score: i32,
        customers: Vec<CustomerId>,
    ) -> Result<usize, ClientError> {
        let req = RateManyRequest { score, customers };
        let resp: RateManyResponse = self
            .send(
                Method::POST,
                &format!("/tours/{}/ratings/batch", tour_id),
                Some(&req),
            )
            .await?;
        Ok(resp.created)
    }

    /// Replaces score and comment of a customer's rating.
    pub async fn update_rating(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
        score: i32,
        comment: Option<String>,
    ) -> Result<RatingDto, ClientError> {
        let req = RatingRequest {
            customer_id,
            score,
            comment,
        };
        self.send(Method::PUT, &format!("/tours/{}/ratings", tour_id), Some(&req))
            .await
    }

    /// Changes only the given fields of a customer's rating.
    pub async fn patch_rating(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
        score: Option<i32>,
        comment: Option<String>,
    ) -> Result<RatingDto, ClientError> {
        let req = PatchRatingRequest {
            customer_id,
            score,
            comment,
        };
        self.send(Method::PATCH, &format!("/tours/{}/ratings", tour_id), Some(&req))
            .await
    }

    pub async fn delete_rating(
        &self,
        tour_id: TourId,
        customer_id: CustomerId,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/tours/{}/ratings/{}", tour_id, customer_id)))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(api_error(resp).await)
        }
    }

    /// Average score of a tour.
    pub async fn average_score(&self, tour_id: TourId) -> Result<f64, ClientError> {
        let resp: AverageScoreResponse = self
            .get(&format!("/tours/{}/ratings/average", tour_id))
            .await?;
        Ok(resp.average)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    async fn send<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(resp).await)
        }
    }
}

async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Extracts `error` from a JSON error body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ToursClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ToursClient::new("http://localhost:3000/");
        assert_eq!(client.url("/tours/1"), "http://localhost:3000/tours/1");
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"error":"Tour does not exist 9","code":404}"#.to_string();
        assert_eq!(error_message(body), "Tour does not exist 9");
    }

    #[test]
    fn test_error_message_falls_back_to_text() {
        assert_eq!(error_message("bad gateway".into()), "bad gateway");
    }

    #[test]
    fn test_error_status() {
        let err = ClientError::Api {
            status: 409,
            message: "duplicate".into(),
        };
        assert_eq!(err.status(), Some(409));
    }
}
