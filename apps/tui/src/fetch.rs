//! One fetcher per data domain, plus the form and chat calls.
//!
//! Cached domains never fail: any backend problem is logged and replaced by
//! synthesized data. Yield prediction and crop recommendations instead hand
//! the error text back, since made-up numbers there would mislead.

use crate::backend::wire::{
    ChatRequest, ForecastResponse, InsightsRequest, InsightsResponse, LocationQuery,
    MarketRecordWire, WeatherAnalysisRequest, WeatherAnalysisResponse,
};
use crate::backend::{BackendError, FarmBackend};
use crate::fallback::{
    count_alerts, fallback_insights, fallback_market_records, fallback_weather,
    fallback_weather_analysis, rain_alerts, simulate_history, simulate_previous,
};
use crate::location::{parse_location, primary_place};
use crate::models::{
    AnalysisInsight, ChatMessage, CropPrice, CurrentConditions, DailyForecast, DataSource,
    DomainData, FarmerProfile, ForecastDay, Insight, InsightKind, InsightsView, MarketRecord,
    MarketView, Priority, Recommendations, WeatherAnalysis, WeatherView, YieldMetadata,
    YieldPrediction, YieldRequest, DEMO_DATA_LABEL,
};
use crate::DataDomain;
use base64::Engine as _;
use chrono::{Local, NaiveDate};
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;

/// Most price cards the market tab shows.
pub const MAX_MARKET_CARDS: usize = 12;
const FORECAST_DAYS: usize = 7;

pub const CHAT_FAILURE_REPLY: &str = "I'm having trouble connecting to my knowledge base. Please check your internet or try again later. 🌱";
pub const IMAGE_REPLY: &str = "I can see the image of your crop! 📸 The leaves look healthy. Based on visual analysis, there are no immediate signs of disease. I've noted this in your farm profile.";

/// Inputs shared by every cached fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchContext {
    pub location: String,
    pub crop: String,
    pub insights_count: u32,
}

/// Runs the fetcher for `domain`. Always resolves to displayable data.
pub async fn fetch_domain(
    backend: &dyn FarmBackend,
    domain: DataDomain,
    context: &FetchContext,
) -> DomainData {
    match domain {
        DataDomain::Weather => DomainData::Weather(fetch_weather(backend, &context.location).await),
        DataDomain::Market => DomainData::Market(fetch_market(backend, &context.location).await),
        DataDomain::Insights => DomainData::Insights(
            fetch_insights(backend, &context.location, context.insights_count).await,
        ),
        DataDomain::WeatherAnalysis => DomainData::WeatherAnalysis(
            fetch_weather_analysis(backend, &context.location, &context.crop).await,
        ),
    }
}

/// Placeholder data for `domain` without touching the backend. Used when a
/// fetch task dies before reporting.
pub fn fallback_domain(domain: DataDomain, context: &FetchContext) -> DomainData {
    match domain {
        DataDomain::Weather => DomainData::Weather(fallback_weather(&context.location, today())),
        DataDomain::Market => DomainData::Market(build_market_view(
            Vec::new(),
            &context.location,
            today(),
            &mut rand::thread_rng(),
        )),
        DataDomain::Insights => DomainData::Insights(fallback_insights()),
        DataDomain::WeatherAnalysis => DomainData::WeatherAnalysis(fallback_weather_analysis(
            &context.location,
            &context.crop,
            today(),
        )),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn fetch_weather(backend: &dyn FarmBackend, location: &str) -> WeatherView {
    match try_fetch_weather(backend, location).await {
        Ok(view) => view,
        Err(error) => {
            tracing::warn!(%location, %error, "weather fetch failed, using fallback");
            fallback_weather(location, today())
        }
    }
}

async fn try_fetch_weather(
    backend: &dyn FarmBackend,
    location: &str,
) -> Result<WeatherView, BackendError> {
    let place = primary_place(location);
    if place.is_empty() {
        return Err(BackendError::NoGeocodingResult(location.to_string()));
    }

    let point = backend.geocode(place).await?;
    let forecast = backend.forecast(point).await?;
    build_weather_view(place, &forecast)
}

/// WMO weather code to a short condition name.
pub const fn weather_condition(code: i32) -> &'static str {
    match code {
        2 | 3 => "Clouds",
        45 | 48 => "Fog",
        51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => "Rain",
        71 | 73 | 75 | 77 | 85 | 86 => "Snow",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Clear",
    }
}

fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |parsed| parsed.format("%a").to_string())
}

pub fn build_weather_view(
    place: &str,
    forecast: &ForecastResponse,
) -> Result<WeatherView, BackendError> {
    let daily = &forecast.daily;
    if daily.time.is_empty() {
        return Err(BackendError::EmptyPayload);
    }

    let weekly: Vec<DailyForecast> = daily
        .time
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(index, date)| {
            let code = daily.weathercode.get(index).copied().flatten().unwrap_or(0);
            DailyForecast {
                day: day_label(date),
                temp_max: daily
                    .temperature_2m_max
                    .get(index)
                    .copied()
                    .flatten()
                    .unwrap_or_default()
                    .round(),
                rain: (daily
                    .precipitation_sum
                    .get(index)
                    .copied()
                    .flatten()
                    .unwrap_or_default()
                    * 10.0)
                    .round()
                    / 10.0,
                condition: weather_condition(code).to_string(),
            }
        })
        .collect();

    let current = &forecast.current;
    let first_code = daily.weathercode.first().copied().flatten().unwrap_or(0);
    let alerts = rain_alerts(&weekly);

    Ok(WeatherView {
        place: place.to_string(),
        current: CurrentConditions {
            temperature: current.temperature_2m.unwrap_or_default().round(),
            humidity: current.relativehumidity_2m.unwrap_or_default(),
            wind_speed: current.windspeed_10m.unwrap_or_default().trunc(),
            rainfall: current.rain.unwrap_or_default(),
            condition: weather_condition(first_code).to_string(),
        },
        weekly,
        alerts,
        source: DataSource::Live,
    })
}

/// Market request body for a free-text location.
pub fn market_query(location: &str) -> LocationQuery {
    let parsed = parse_location(location);
    LocationQuery {
        state: parsed.state,
        district: parsed.district,
    }
}

pub async fn fetch_market(backend: &dyn FarmBackend, location: &str) -> MarketView {
    let query = market_query(location);
    let records = match backend.market_rates(&query).await {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!(%location, %error, "market rates fetch failed, using fallback");
            Vec::new()
        }
    };

    build_market_view(records, location, today(), &mut rand::thread_rng())
}

/// Turns raw rows into price cards, or demo cards when nothing usable came back.
pub fn build_market_view<R: Rng + ?Sized>(
    records: Vec<MarketRecordWire>,
    location: &str,
    today: NaiveDate,
    rng: &mut R,
) -> MarketView {
    let live = usable_records(records);

    if live.is_empty() {
        tracing::info!(%location, "no market records, showing demo prices");
        let prices = fallback_market_records(location, today)
            .iter()
            .map(|record| to_crop_price(record, DEMO_DATA_LABEL, today, rng))
            .collect();
        return MarketView {
            prices,
            source: DataSource::Demo,
        };
    }

    let prices = live
        .iter()
        .map(|record| to_crop_price(record, &record.arrival_date, today, rng))
        .collect();

    MarketView {
        prices,
        source: DataSource::Live,
    }
}

fn usable_records(records: Vec<MarketRecordWire>) -> Vec<MarketRecord> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter_map(|record| {
            let price = record.modal_price.filter(|p| p.is_finite() && *p > 0.0)?;
            let commodity = record.commodity.trim().to_string();
            if commodity.is_empty() || !seen.insert(commodity.to_lowercase()) {
                return None;
            }
            Some(MarketRecord {
                commodity,
                market: record.market.trim().to_string(),
                modal_price: price,
                arrival_date: record.arrival_date,
            })
        })
        .take(MAX_MARKET_CARDS)
        .collect()
}

fn to_crop_price<R: Rng + ?Sized>(
    record: &MarketRecord,
    last_updated: &str,
    today: NaiveDate,
    rng: &mut R,
) -> CropPrice {
    CropPrice {
        id: record.commodity.to_lowercase().replace(' ', "-"),
        name: record.commodity.clone(),
        current_price: record.modal_price,
        previous_price: simulate_previous(record.modal_price, rng),
        unit: "quintal".to_string(),
        mandi: if record.market.is_empty() {
            "Local Mandi".to_string()
        } else {
            record.market.clone()
        },
        last_updated: last_updated.to_string(),
        price_history: simulate_history(record.modal_price, today, rng),
    }
}

pub async fn fetch_insights(backend: &dyn FarmBackend, location: &str, count: u32) -> InsightsView {
    let request = InsightsRequest {
        location: location.to_string(),
        count,
    };

    match backend.general_insights(&request).await {
        Ok(response) if !response.insights.is_empty() => build_insights_view(response),
        Ok(_) => {
            tracing::info!(%location, "backend returned no insights, using fallback");
            fallback_insights()
        }
        Err(error) => {
            tracing::warn!(%location, %error, "insights fetch failed, using fallback");
            fallback_insights()
        }
    }
}

pub fn build_insights_view(response: InsightsResponse) -> InsightsView {
    let insights: Vec<Insight> = response
        .insights
        .into_iter()
        .map(|insight| Insight {
            kind: InsightKind::parse(&insight.kind),
            title: insight.title,
            description: insight.description,
            priority: Priority::parse(&insight.priority),
        })
        .collect();

    let active_alerts = response
        .stats
        .and_then(|stats| stats.active_alerts)
        .unwrap_or_else(|| count_alerts(&insights));

    InsightsView {
        insights,
        active_alerts,
        source: DataSource::Live,
    }
}

pub async fn fetch_weather_analysis(
    backend: &dyn FarmBackend,
    location: &str,
    crop: &str,
) -> WeatherAnalysis {
    let request = WeatherAnalysisRequest {
        location: location.to_string(),
        crop: crop.to_string(),
    };

    match backend.weather_analysis(&request).await {
        Ok(response) if !response.forecast.is_empty() => build_weather_analysis(crop, response),
        Ok(_) => {
            tracing::info!(%location, "weather analysis had no forecast, using fallback");
            fallback_weather_analysis(location, crop, today())
        }
        Err(error) => {
            tracing::warn!(%location, %error, "weather analysis failed, using fallback");
            fallback_weather_analysis(location, crop, today())
        }
    }
}

pub fn build_weather_analysis(crop: &str, response: WeatherAnalysisResponse) -> WeatherAnalysis {
    let current = response.current_weather;

    WeatherAnalysis {
        crop: crop.to_string(),
        current: CurrentConditions {
            temperature: current.temperature,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            rainfall: current.rainfall,
            condition: current.condition,
        },
        forecast: response
            .forecast
            .into_iter()
            .map(|day| ForecastDay {
                day: day.day,
                temp: day.temp,
                rain: day.rain,
                condition: day.condition,
            })
            .collect(),
        insights: response
            .insights
            .into_iter()
            .map(|insight| AnalysisInsight {
                kind: insight.kind,
                message: insight.message,
                action: insight.action,
            })
            .collect(),
        source: DataSource::Live,
    }
}

pub async fn load_yield_metadata(backend: &dyn FarmBackend) -> Result<YieldMetadata, String> {
    backend.yield_metadata().await.map_err(|error| {
        tracing::warn!(%error, "yield metadata unavailable");
        "Could not load form data. Please try again later.".to_string()
    })
}

pub async fn predict_yield(
    backend: &dyn FarmBackend,
    request: &YieldRequest,
) -> Result<YieldPrediction, String> {
    backend.yield_prediction(request).await.map_err(|error| {
        tracing::warn!(%error, crop = %request.crop, "yield prediction failed");
        error.user_message("Prediction failed")
    })
}

pub async fn fetch_recommendations(
    backend: &dyn FarmBackend,
    location: &str,
) -> Result<Recommendations, String> {
    let query = market_query(location);
    backend
        .crop_recommendations(&query)
        .await
        .map_err(|error| {
            tracing::warn!(%location, %error, "crop recommendations failed");
            error.user_message("Could not fetch crop recommendations. Please try again.")
        })
}

/// Sends one chat turn and returns the bot's answer.
///
/// Failures become an apology message so the conversation keeps flowing.
pub async fn send_chat(backend: &dyn FarmBackend, profile: &FarmerProfile, text: &str) -> ChatMessage {
    let location = if profile.location.trim().is_empty() {
        "Unknown".to_string()
    } else {
        profile.location.clone()
    };
    let request = ChatRequest {
        message: text.to_string(),
        state: parse_location(&location).state,
        location,
    };

    match backend.chat(&request).await {
        Ok(reply) if !reply.reply.trim().is_empty() => ChatMessage::bot(reply.reply),
        Ok(_) => ChatMessage::bot(CHAT_FAILURE_REPLY),
        Err(error) => {
            tracing::warn!(%error, "chat request failed");
            ChatMessage::bot(CHAT_FAILURE_REPLY)
        }
    }
}

/// Opening message for an empty conversation.
pub fn welcome_message(profile: &FarmerProfile) -> ChatMessage {
    let mut message = ChatMessage::bot(format!(
        "Namaste {}! 🙏 I'm your Krishi-Mate AI assistant. I'm aware of your location in {}. Ask me anything about your farm - crops, weather, pests, or market prices!",
        profile.display_name(),
        profile.display_location()
    ));
    message.id = "welcome".to_string();
    message
}

/// Reads an image file into a `data:` URL for a chat attachment.
pub fn image_data_url(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::wire::{
        ChatReply, CurrentWeatherWire, ForecastCurrent, ForecastDaily, ForecastDayWire,
        GeoPoint, InsightStats, InsightWire,
    };
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scriptable backend that counts calls and records market payloads.
    #[derive(Default)]
    pub struct MockBackend {
        pub market: Mutex<Option<Result<Vec<MarketRecordWire>, u16>>>,
        pub market_queries: Mutex<Vec<LocationQuery>>,
        pub market_calls: AtomicUsize,
        pub insights_calls: AtomicUsize,
        pub analysis_calls: AtomicUsize,
        pub geocode_calls: AtomicUsize,
        pub prediction_error: Option<(u16, String)>,
        pub insights_panic: bool,
        pub chat_reply: Option<String>,
        pub chat_requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockBackend {
        pub fn with_market(records: Vec<MarketRecordWire>) -> Self {
            Self {
                market: Mutex::new(Some(Ok(records))),
                ..Self::default()
            }
        }

        pub fn calls(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FarmBackend for MockBackend {
        async fn market_rates(
            &self,
            query: &LocationQuery,
        ) -> Result<Vec<MarketRecordWire>, BackendError> {
            self.market_calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut queries) = self.market_queries.lock() {
                queries.push(query.clone());
            }
            let scripted = self.market.lock().ok().and_then(|guard| guard.clone());
            match scripted {
                Some(Ok(records)) => Ok(records),
                Some(Err(status)) => Err(BackendError::Status {
                    status,
                    detail: String::new(),
                }),
                None => Ok(Vec::new()),
            }
        }

        async fn general_insights(
            &self,
            _request: &InsightsRequest,
        ) -> Result<InsightsResponse, BackendError> {
            self.insights_calls.fetch_add(1, Ordering::SeqCst);
            assert!(!self.insights_panic, "insights backend crashed");
            Err(BackendError::EmptyPayload)
        }

        async fn weather_analysis(
            &self,
            _request: &WeatherAnalysisRequest,
        ) -> Result<WeatherAnalysisResponse, BackendError> {
            self.analysis_calls.fetch_add(1, Ordering::SeqCst);
            Err(BackendError::EmptyPayload)
        }

        async fn yield_metadata(&self) -> Result<YieldMetadata, BackendError> {
            Ok(YieldMetadata::default())
        }

        async fn yield_prediction(
            &self,
            request: &YieldRequest,
        ) -> Result<YieldPrediction, BackendError> {
            if let Some((status, body)) = &self.prediction_error {
                return crate::backend::decode_response(*status, body);
            }
            Ok(YieldPrediction {
                predicted_yield: 2.5,
                predicted_production: 2.5 * request.area,
            })
        }

        async fn crop_recommendations(
            &self,
            _query: &LocationQuery,
        ) -> Result<Recommendations, BackendError> {
            Err(BackendError::Status {
                status: 503,
                detail: String::new(),
            })
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
            if let Ok(mut requests) = self.chat_requests.lock() {
                requests.push(request.clone());
            }
            self.chat_reply
                .clone()
                .map(|reply| ChatReply { reply })
                .ok_or(BackendError::EmptyPayload)
        }

        async fn geocode(&self, place: &str) -> Result<GeoPoint, BackendError> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            Err(BackendError::NoGeocodingResult(place.to_string()))
        }

        async fn forecast(&self, _point: GeoPoint) -> Result<ForecastResponse, BackendError> {
            Err(BackendError::EmptyPayload)
        }
    }

    fn wire(commodity: &str, market: &str, price: Option<f64>) -> MarketRecordWire {
        MarketRecordWire {
            commodity: commodity.to_string(),
            market: market.to_string(),
            modal_price: price,
            arrival_date: "15/10/2026".to_string(),
            ..MarketRecordWire::default()
        }
    }

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap_or_default()
    }

    #[tokio::test]
    async fn market_payload_uses_parsed_location() {
        let backend = MockBackend::with_market(vec![wire("Onion", "Pune", Some(1850.0))]);

        let view = fetch_market(&backend, "Pune, Maharashtra").await;

        let queries = backend.market_queries.lock().map(|q| q.clone()).unwrap_or_default();
        assert_eq!(
            queries,
            vec![LocationQuery {
                state: "Maharashtra".to_string(),
                district: "Pune".to_string(),
            }]
        );
        assert_eq!(view.source, DataSource::Live);
        assert_eq!(view.prices[0].last_updated, "15/10/2026");
    }

    #[tokio::test]
    async fn location_without_comma_sends_blank_query_and_falls_back() {
        let backend = MockBackend::default();

        let view = fetch_market(&backend, "Unknown").await;

        let queries = backend.market_queries.lock().map(|q| q.clone()).unwrap_or_default();
        assert_eq!(queries, vec![LocationQuery::default()]);
        assert_eq!(view.source, DataSource::Demo);
        assert!(!view.prices.is_empty());
    }

    #[test]
    fn empty_market_response_engages_demo_data() {
        let mut rng = StdRng::seed_from_u64(1);
        let view = build_market_view(Vec::new(), "Pune, Maharashtra", fixed_day(), &mut rng);

        assert!(view.source.is_demo());
        assert!(!view.prices.is_empty());
        assert!(view
            .prices
            .iter()
            .all(|price| price.last_updated == DEMO_DATA_LABEL));
        assert!(view.prices.iter().all(|price| price.current_price > 0.0));
    }

    #[tokio::test]
    async fn market_transport_error_engages_demo_data() {
        let backend = MockBackend {
            market: Mutex::new(Some(Err(500))),
            ..MockBackend::default()
        };

        let view = fetch_market(&backend, "Karnal, Haryana").await;
        assert!(view.source.is_demo());
        assert_eq!(view.prices[0].mandi, "Karnal Mandi");
    }

    #[test]
    fn unusable_rows_are_dropped_and_duplicates_merged() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = vec![
            wire("Onion", "Pune", Some(1850.0)),
            wire("onion", "Pune", Some(1900.0)),
            wire("Garlic", "Pune", None),
            wire("Tomato", "", Some(-4.0)),
            wire("Potato", "", Some(1200.0)),
        ];

        let view = build_market_view(records, "Pune, Maharashtra", fixed_day(), &mut rng);

        let names: Vec<&str> = view.prices.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Onion", "Potato"]);
        assert_eq!(view.prices[1].mandi, "Local Mandi");
        assert!(view
            .prices
            .iter()
            .all(|price| price.price_history.last().map(|p| p.price) == Some(price.current_price)));
    }

    #[test]
    fn sub_rupee_live_price_keeps_history_and_change_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        let view = build_market_view(
            vec![wire("Coriander", "Nashik", Some(0.5))],
            "Nashik, Maharashtra",
            fixed_day(),
            &mut rng,
        );

        assert_eq!(view.source, DataSource::Live);
        let card = &view.prices[0];
        assert!((card.current_price - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            card.price_history.last().map(|point| point.price),
            Some(card.current_price)
        );
        assert!((0.47..=0.53).contains(&card.previous_price), "{}", card.previous_price);
    }

    #[test]
    fn market_cards_are_capped() {
        let mut rng = StdRng::seed_from_u64(9);
        let records = (0..30)
            .map(|i| wire(&format!("Crop {i}"), "Indore", Some(1000.0 + f64::from(i))))
            .collect();

        let view = build_market_view(records, "Indore, Madhya Pradesh", fixed_day(), &mut rng);
        assert_eq!(view.prices.len(), MAX_MARKET_CARDS);
    }

    #[tokio::test]
    async fn weather_without_geocoding_result_falls_back() {
        let backend = MockBackend::default();
        let view = fetch_weather(&backend, "Atlantis, Nowhere").await;
        assert!(view.source.is_demo());
        assert_eq!(MockBackend::calls(&backend.geocode_calls), 1);
    }

    #[tokio::test]
    async fn blank_location_skips_geocoding() {
        let backend = MockBackend::default();
        let view = fetch_weather(&backend, "  ").await;
        assert!(view.source.is_demo());
        assert_eq!(MockBackend::calls(&backend.geocode_calls), 0);
    }

    #[test]
    fn forecast_maps_codes_and_days() -> Result<(), BackendError> {
        let forecast = ForecastResponse {
            current: ForecastCurrent {
                temperature_2m: Some(27.6),
                relativehumidity_2m: Some(61.0),
                rain: Some(0.0),
                windspeed_10m: Some(9.7),
            },
            daily: ForecastDaily {
                time: vec!["2026-10-16".to_string(), "2026-10-17".to_string()],
                weathercode: vec![3, 63].into_iter().map(Some).collect(),
                temperature_2m_max: vec![Some(30.4), None],
                precipitation_sum: vec![Some(0.0), Some(12.34)],
            },
        };

        let view = build_weather_view("Bhopal", &forecast)?;
        assert_eq!(view.current.temperature, 28.0);
        assert_eq!(view.current.wind_speed, 9.0);
        assert_eq!(view.current.condition, "Clouds");
        assert_eq!(view.weekly[0].day, "Fri");
        assert_eq!(view.weekly[1].condition, "Rain");
        assert_eq!(view.weekly[1].rain, 12.3);
        assert_eq!(view.alerts.len(), 1);
        Ok(())
    }

    #[test]
    fn forecast_without_days_is_empty_payload() {
        let result = build_weather_view("Bhopal", &ForecastResponse::default());
        assert!(matches!(result, Err(BackendError::EmptyPayload)));
    }

    #[test]
    fn weather_codes_cover_wmo_groups() {
        assert_eq!(weather_condition(0), "Clear");
        assert_eq!(weather_condition(48), "Fog");
        assert_eq!(weather_condition(81), "Rain");
        assert_eq!(weather_condition(86), "Snow");
        assert_eq!(weather_condition(99), "Thunderstorm");
        assert_eq!(weather_condition(1234), "Clear");
    }

    #[tokio::test]
    async fn insights_failure_uses_fallback() {
        let backend = MockBackend::default();
        let view = fetch_insights(&backend, "Pune, Maharashtra", 5).await;
        assert!(view.source.is_demo());
        assert!(!view.insights.is_empty());
    }

    #[test]
    fn insights_stats_override_counted_alerts() {
        let response = InsightsResponse {
            insights: vec![InsightWire {
                kind: "warning".to_string(),
                title: "Pest Alert".to_string(),
                description: "Aphids nearby.".to_string(),
                priority: "HIGH".to_string(),
            }],
            stats: Some(InsightStats {
                active_alerts: Some(4),
            }),
        };

        let view = build_insights_view(response);
        assert_eq!(view.active_alerts, 4);
        assert_eq!(view.insights[0].priority, Priority::High);
        assert_eq!(view.insights[0].kind, InsightKind::Warning);
    }

    #[test]
    fn weather_analysis_maps_bundle() {
        let response = WeatherAnalysisResponse {
            current_weather: CurrentWeatherWire {
                temperature: 31.0,
                humidity: 70.0,
                rainfall: 2.0,
                wind_speed: 8.0,
                condition: "Clouds".to_string(),
            },
            forecast: vec![ForecastDayWire {
                day: "Fri".to_string(),
                temp: 31.0,
                rain: 2.0,
                condition: "Rain".to_string(),
            }],
            insights: Vec::new(),
        };

        let analysis = build_weather_analysis("Rice", response);
        assert_eq!(analysis.crop, "Rice");
        assert_eq!(analysis.forecast.len(), 1);
        assert_eq!(analysis.source, DataSource::Live);
    }

    #[tokio::test]
    async fn yield_bad_request_surfaces_backend_detail() {
        let backend = MockBackend {
            prediction_error: Some((
                400,
                r#"{"detail":"Unknown crop 'Kiwi' for the selected district"}"#.to_string(),
            )),
            ..MockBackend::default()
        };
        let request = YieldRequest {
            state: "Maharashtra".to_string(),
            district: "Pune".to_string(),
            season: "Kharif".to_string(),
            crop: "Kiwi".to_string(),
            area: 2.0,
        };

        let result = predict_yield(&backend, &request).await;
        assert_eq!(
            result,
            Err("Unknown crop 'Kiwi' for the selected district".to_string())
        );
    }

    #[tokio::test]
    async fn recommendations_error_is_surfaced_not_faked() {
        let backend = MockBackend::default();
        let result = fetch_recommendations(&backend, "Pune, Maharashtra").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn chat_sends_parsed_state_and_apologizes_on_failure() {
        let backend = MockBackend::default();
        let profile = FarmerProfile {
            name: "Ravi".to_string(),
            location: "Nashik, Maharashtra".to_string(),
            ..FarmerProfile::default()
        };

        let reply = send_chat(&backend, &profile, "Best crop for this season?").await;
        assert_eq!(reply.content, CHAT_FAILURE_REPLY);

        let requests = backend.chat_requests.lock().map(|r| r.clone()).unwrap_or_default();
        assert_eq!(requests[0].state, "Maharashtra");
        assert_eq!(requests[0].location, "Nashik, Maharashtra");
    }

    #[tokio::test]
    async fn chat_without_location_says_unknown() {
        let backend = MockBackend {
            chat_reply: Some("Sow mustard now.".to_string()),
            ..MockBackend::default()
        };

        let reply = send_chat(&backend, &FarmerProfile::default(), "hi").await;
        assert_eq!(reply.content, "Sow mustard now.");

        let requests = backend.chat_requests.lock().map(|r| r.clone()).unwrap_or_default();
        assert_eq!(requests[0].location, "Unknown");
        assert_eq!(requests[0].state, "");
    }

    #[test]
    fn welcome_names_farmer_and_place() {
        let profile = FarmerProfile {
            name: "Asha".to_string(),
            location: "Pune, Maharashtra".to_string(),
            ..FarmerProfile::default()
        };
        let message = welcome_message(&profile);
        assert_eq!(message.id, "welcome");
        assert!(message.content.contains("Asha"));
        assert!(message.content.contains("Pune, Maharashtra"));
    }

    #[test]
    fn image_attachment_becomes_data_url() -> std::io::Result<()> {
        let path = std::env::temp_dir().join(format!("krishi-leaf-{}.png", std::process::id()));
        std::fs::write(&path, [0x89, b'P', b'N', b'G'])?;

        let url = image_data_url(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(url, "data:image/png;base64,iVBORw==");
        Ok(())
    }
}
