use super::wire::{
    ChatReply, ChatRequest, ForecastResponse, GeoPoint, GeocodingResponse, InsightsRequest,
    InsightsResponse, LocationQuery, MarketRecordWire, WeatherAnalysisRequest,
    WeatherAnalysisResponse,
};
use super::{decode_response, BackendError, FarmBackend};
use crate::config::AppConfig;
use crate::models::{Recommendations, YieldMetadata, YieldPrediction, YieldRequest};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// [`FarmBackend`] over reqwest, talking to the advisory API and Open-Meteo.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
    geocoding_url: String,
    forecast_url: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!("krishi-mate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(%url, status, bytes = text.len(), "response");
        decode_response(status, &text)
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(%url, status, bytes = text.len(), "response");
        decode_response(status, &text)
    }
}

#[async_trait]
impl FarmBackend for HttpBackend {
    async fn market_rates(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<MarketRecordWire>, BackendError> {
        self.post_json("/api/market-rates", query).await
    }

    async fn general_insights(
        &self,
        request: &InsightsRequest,
    ) -> Result<InsightsResponse, BackendError> {
        self.post_json("/api/general-insights", request).await
    }

    async fn weather_analysis(
        &self,
        request: &WeatherAnalysisRequest,
    ) -> Result<WeatherAnalysisResponse, BackendError> {
        self.post_json("/api/weather-analysis", request).await
    }

    async fn yield_metadata(&self) -> Result<YieldMetadata, BackendError> {
        let url = self.endpoint("/api/yield-metadata");
        self.get_json(&url, &[]).await
    }

    async fn yield_prediction(
        &self,
        request: &YieldRequest,
    ) -> Result<YieldPrediction, BackendError> {
        self.post_json("/api/yield-prediction", request).await
    }

    async fn crop_recommendations(
        &self,
        query: &LocationQuery,
    ) -> Result<Recommendations, BackendError> {
        self.post_json("/api/crop-recommendations", query).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        self.post_json("/api/chat", request).await
    }

    async fn geocode(&self, place: &str) -> Result<GeoPoint, BackendError> {
        let query = [
            ("name", place.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        let response: GeocodingResponse = self.get_json(&self.geocoding_url, &query).await?;

        response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| BackendError::NoGeocodingResult(place.to_string()))
    }

    async fn forecast(&self, point: GeoPoint) -> Result<ForecastResponse, BackendError> {
        let query = [
            ("latitude", point.latitude.to_string()),
            ("longitude", point.longitude.to_string()),
            (
                "daily",
                "weathercode,temperature_2m_max,precipitation_sum".to_string(),
            ),
            (
                "current",
                "temperature_2m,relativehumidity_2m,rain,windspeed_10m".to_string(),
            ),
            ("timezone", "auto".to_string()),
        ];
        self.get_json(&self.forecast_url, &query).await
    }
}
