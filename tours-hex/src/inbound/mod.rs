//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod assembler;
mod handlers;
mod server;

pub use assembler::RatingAssembler;
pub use server::HttpServer;
