//! HTTP seam between the dashboard and the farm advisory backend.

pub mod http;
pub mod wire;

pub use http::HttpBackend;

use crate::models::{Recommendations, YieldMetadata, YieldPrediction, YieldRequest};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use wire::{
    ChatReply, ChatRequest, ForecastResponse, GeoPoint, InsightsRequest, InsightsResponse,
    LocationQuery, MarketRecordWire, WeatherAnalysisRequest, WeatherAnalysisResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not find coordinates for location: {0}")]
    NoGeocodingResult(String),

    #[error("backend returned no data")]
    EmptyPayload,
}

impl BackendError {
    /// Message suitable for showing to the farmer.
    ///
    /// A backend-supplied `detail` wins; everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Every remote call the dashboard makes.
#[async_trait]
pub trait FarmBackend: Send + Sync {
    async fn market_rates(&self, query: &LocationQuery)
        -> Result<Vec<MarketRecordWire>, BackendError>;

    async fn general_insights(
        &self,
        request: &InsightsRequest,
    ) -> Result<InsightsResponse, BackendError>;

    async fn weather_analysis(
        &self,
        request: &WeatherAnalysisRequest,
    ) -> Result<WeatherAnalysisResponse, BackendError>;

    async fn yield_metadata(&self) -> Result<YieldMetadata, BackendError>;

    async fn yield_prediction(&self, request: &YieldRequest)
        -> Result<YieldPrediction, BackendError>;

    async fn crop_recommendations(
        &self,
        query: &LocationQuery,
    ) -> Result<Recommendations, BackendError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;

    async fn geocode(&self, place: &str) -> Result<GeoPoint, BackendError>;

    async fn forecast(&self, point: GeoPoint) -> Result<ForecastResponse, BackendError>;
}

/// Turns a status code and body into a typed payload or a [`BackendError`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, BackendError> {
    if !(200..300).contains(&status) {
        return Err(BackendError::Status {
            status,
            detail: extract_detail(body),
        });
    }

    if body.trim().is_empty() {
        return Err(BackendError::EmptyPayload);
    }

    Ok(serde_json::from_str(body)?)
}

/// Pulls the `detail` field out of an error body.
///
/// Handles plain string details as well as validation error lists, whose
/// `msg` entries are joined.
pub fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return String::new();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.trim().to_string(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    }
}
