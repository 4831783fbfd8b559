//! Request and response bodies exactly as they travel over HTTP.

use serde::{Deserialize, Deserializer, Serialize};

/// `{state, district}` body for market rates; `{district, state}` for
/// crop recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub state: String,
    pub district: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketRecordWire {
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub market: String,
    #[serde(default, deserialize_with = "price_from_any")]
    pub modal_price: Option<f64>,
    #[serde(default)]
    pub arrival_date: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub variety: Option<String>,
    #[serde(default, deserialize_with = "price_from_any")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "price_from_any")]
    pub max_price: Option<f64>,
}

/// Mandi prices arrive as numbers from some sources and strings from others.
fn price_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightsRequest {
    pub location: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InsightWire {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InsightStats {
    #[serde(rename = "activeAlerts", default)]
    pub active_alerts: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub insights: Vec<InsightWire>,
    #[serde(default)]
    pub stats: Option<InsightStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherAnalysisRequest {
    pub location: String,
    pub crop: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeatherWire {
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastDayWire {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub rain: f64,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisInsightWire {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAnalysisResponse {
    pub current_weather: CurrentWeatherWire,
    #[serde(default)]
    pub forecast: Vec<ForecastDayWire>,
    #[serde(default)]
    pub insights: Vec<AnalysisInsightWire>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub location: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeoPoint>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastCurrent {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relativehumidity_2m: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
    #[serde(default)]
    pub windspeed_10m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastDaily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: ForecastCurrent,
    #[serde(default)]
    pub daily: ForecastDaily,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_prices_accept_strings_and_numbers() -> Result<(), serde_json::Error> {
        let records: Vec<MarketRecordWire> = serde_json::from_str(
            r#"[
                {"commodity":"Onion","market":"Pune","modal_price":"1,850","arrival_date":"15/10/2026","state":"Maharashtra","district":"Pune","variety":"Red","grade":"FAQ","min_price":"1500","max_price":"2100"},
                {"commodity":"Wheat","market":"Karnal","modal_price":2275,"arrival_date":"15/10/2026"},
                {"commodity":"Garlic","market":"Indore","modal_price":"NR","arrival_date":"15/10/2026"}
            ]"#,
        )?;

        assert_eq!(records[0].modal_price, Some(1850.0));
        assert_eq!(records[0].min_price, Some(1500.0));
        assert_eq!(records[1].modal_price, Some(2275.0));
        assert_eq!(records[2].modal_price, None);
        Ok(())
    }

    #[test]
    fn location_query_serializes_state_and_district() -> Result<(), serde_json::Error> {
        let query = LocationQuery {
            state: "Maharashtra".to_string(),
            district: "Pune".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&query)?,
            serde_json::json!({"state": "Maharashtra", "district": "Pune"})
        );
        Ok(())
    }

    #[test]
    fn insights_response_tolerates_missing_stats() -> Result<(), serde_json::Error> {
        let response: InsightsResponse = serde_json::from_str(
            r#"{"insights":[{"type":"warning","title":"Pest Alert","description":"Aphids nearby.","priority":"high"}]}"#,
        )?;
        assert_eq!(response.insights.len(), 1);
        assert_eq!(response.insights[0].kind, "warning");
        assert!(response.stats.is_none());
        Ok(())
    }

    #[test]
    fn forecast_tolerates_null_entries() -> Result<(), serde_json::Error> {
        let response: ForecastResponse = serde_json::from_str(
            r#"{"current":{"temperature_2m":27.4,"relativehumidity_2m":61,"rain":0.0,"windspeed_10m":9.7},
                "daily":{"time":["2026-10-16","2026-10-17"],"weathercode":[61,null],"temperature_2m_max":[30.1,null],"precipitation_sum":[4.2,null]}}"#,
        )?;
        assert_eq!(response.daily.weathercode, vec![Some(61), None]);
        assert_eq!(response.current.relativehumidity_2m, Some(61.0));
        Ok(())
    }
}
