//! # Tours Hex
//!
//! Rating service and HTTP adapter for the tour ratings service.
//!
//! ## Architecture
//!
//! - `service` - Application service (rating rules, batch and aggregation)
//! - `inbound/` - HTTP adapter (Axum server, hypermedia assembler)
//! - `openapi` - OpenAPI document served by the HTTP adapter
//!
//! The service is generic over `T: TourCatalog` and `R: RatingRepository`,
//! allowing different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use inbound::{HttpServer, RatingAssembler};
pub use service::TourRatingService;
