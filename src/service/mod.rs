//! Tutor service integration
//!
//! The tutor service generates quiz questions, grades submissions, and owns
//! durable progress. This module holds the HTTP client, the request/response
//! models, and the error types for that boundary.

pub mod client;
pub mod error;
pub mod models;

pub use client::TutorClient;
pub use error::ServiceError;
