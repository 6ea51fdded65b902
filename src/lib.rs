//! Typed client for the Radarr v3 REST API.
//!
//! Requests are validated locally, assembled into a deterministic URL and
//! query string, and sent through a [`Transport`]. Responses come back as
//! `serde_json::Value` records, unchanged.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod radarr;

pub use client::ArrClient;
pub use config::Configuration;
pub use error::{ArrError, Result};
pub use http::{ApiRequest, ApiResponse, HttpClient, Transport};
pub use models::{
    AddMovieOptions, DeleteMovieOptions, DeleteQueueOptions, Ids, MinimumAvailability, MovieId,
    QueueOptions, RadarrEventType, RadarrSortKey, Sort, SortDirection,
};
pub use query::QueryParams;
pub use radarr::RadarrClient;
