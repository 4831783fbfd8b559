use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The signed-in farmer, stored locally as a single JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub name: String,
    pub mobile: String,
    /// Free text, normally "District, State".
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_crop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<String>,
}

impl FarmerProfile {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Farmer"
        } else {
            &self.name
        }
    }

    pub fn display_location(&self) -> &str {
        if self.location.trim().is_empty() {
            "your area"
        } else {
            &self.location
        }
    }
}

/// Where a view model's data came from.
///
/// Demo data is a normal, non-error outcome and is rendered with a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Demo,
}

impl DataSource {
    pub const fn is_demo(self) -> bool {
        matches!(self, Self::Demo)
    }
}

/// Marker written into `last_updated` for synthesized market rows.
pub const DEMO_DATA_LABEL: &str = "Demo data";

/// One mandi price row as the dashboard understands it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRecord {
    pub commodity: String,
    pub market: String,
    pub modal_price: f64,
    pub arrival_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Chart-ready price card derived from a [`MarketRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropPrice {
    pub id: String,
    pub name: String,
    pub current_price: f64,
    pub previous_price: f64,
    pub unit: String,
    pub mandi: String,
    pub last_updated: String,
    pub price_history: Vec<PricePoint>,
}

impl CropPrice {
    pub fn change(&self) -> f64 {
        self.current_price - self.previous_price
    }

    pub fn change_percent(&self) -> f64 {
        if self.previous_price <= 0.0 {
            return 0.0;
        }
        self.change() / self.previous_price * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketView {
    pub prices: Vec<CropPrice>,
    pub source: DataSource,
}

/// Gainers, losers and the best performer across a market view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub gainers: usize,
    pub losers: usize,
    pub avg_gain_percent: f64,
    pub avg_loss_percent: f64,
    pub best: Option<(String, f64)>,
}

impl MarketView {
    pub fn summary(&self) -> MarketSummary {
        let changes: Vec<(&str, f64)> = self
            .prices
            .iter()
            .map(|price| (price.name.as_str(), price.change_percent()))
            .collect();

        let gains: Vec<f64> = changes.iter().map(|(_, p)| *p).filter(|p| *p > 0.0).collect();
        let losses: Vec<f64> = changes.iter().map(|(_, p)| *p).filter(|p| *p < 0.0).collect();

        let best = changes
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, pct)| ((*name).to_string(), *pct));

        MarketSummary {
            gainers: gains.len(),
            losers: losses.len(),
            avg_gain_percent: mean(&gains),
            avg_loss_percent: mean(&losses),
            best,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub rainfall: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub day: String,
    pub temp_max: f64,
    pub rain: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub place: String,
    pub current: CurrentConditions,
    pub weekly: Vec<DailyForecast>,
    pub alerts: Vec<String>,
    pub source: DataSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Tip,
    Success,
    Warning,
}

impl InsightKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "success" => Self::Success,
            "warning" | "alert" => Self::Warning,
            _ => Self::Tip,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tip => "Tip",
            Self::Success => "Success",
            Self::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsView {
    pub insights: Vec<Insight>,
    pub active_alerts: u32,
    pub source: DataSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub day: String,
    pub temp: f64,
    pub rain: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisInsight {
    pub kind: String,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAnalysis {
    pub crop: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub insights: Vec<AnalysisInsight>,
    pub source: DataSource,
}

/// Result of one cached domain fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainData {
    Weather(WeatherView),
    Market(MarketView),
    Insights(InsightsView),
    WeatherAnalysis(WeatherAnalysis),
}

impl DomainData {
    pub const fn domain(&self) -> crate::DataDomain {
        match self {
            Self::Weather(_) => crate::DataDomain::Weather,
            Self::Market(_) => crate::DataDomain::Market,
            Self::Insights(_) => crate::DataDomain::Insights,
            Self::WeatherAnalysis(_) => crate::DataDomain::WeatherAnalysis,
        }
    }

    pub const fn source(&self) -> DataSource {
        match self {
            Self::Weather(view) => view.source,
            Self::Market(view) => view.source,
            Self::Insights(view) => view.source,
            Self::WeatherAnalysis(view) => view.source,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct YieldMetadata {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub state_district_map: BTreeMap<String, Vec<String>>,
}

impl YieldMetadata {
    pub fn districts_for(&self, state: &str) -> &[String] {
        self.state_district_map
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldRequest {
    pub state: String,
    pub district: String,
    pub season: String,
    pub crop: String,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct YieldPrediction {
    pub predicted_yield: f64,
    pub predicted_production: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CropAdvice {
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Recommendations {
    #[serde(default)]
    pub favorable: Vec<CropAdvice>,
    #[serde(default)]
    pub unfavorable: Vec<CropAdvice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    /// Attached image as a `data:` URL.
    pub image: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, image: Option<String>) -> Self {
        Self::new(MessageKind::User, content.into(), image)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot, content.into(), None)
    }

    fn new(kind: MessageKind, content: String, image: Option<String>) -> Self {
        let timestamp = Local::now();
        Self {
            id: timestamp.timestamp_nanos_opt().unwrap_or_default().to_string(),
            kind,
            content,
            image,
            timestamp,
        }
    }
}

/// A static sensor card on the sensors tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub range: (f64, f64),
    pub history: Vec<(String, f64)>,
}

impl SensorReading {
    pub fn status(&self) -> &'static str {
        let (min, max) = self.range;
        let span = max - min;
        if span <= 0.0 {
            return "unknown";
        }
        let ratio = (self.value - min) / span;
        if ratio < 0.2 {
            "low"
        } else if ratio > 0.85 {
            "high"
        } else {
            "optimal"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProgress {
    pub name: String,
    pub stage: String,
    pub progress: u16,
    pub days_to_harvest: u32,
    pub health: String,
}
