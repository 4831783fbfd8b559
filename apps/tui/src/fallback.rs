//! Placeholder data shown when the backend fails or has nothing to say.
//!
//! Shapes are fixed; only price noise is random, and noisy values are always
//! clamped to finite, strictly positive numbers.

use crate::location::{parse_location, primary_place};
use crate::models::{
    AnalysisInsight, CropProgress, CurrentConditions, DailyForecast, DataSource, ForecastDay,
    Insight, InsightKind, InsightsView, MarketRecord, PricePoint, Priority, SensorReading,
    WeatherAnalysis, WeatherView,
};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Number of points in a simulated price history.
pub const HISTORY_POINTS: usize = 6;
/// Days between simulated history points.
pub const HISTORY_STEP_DAYS: i64 = 5;

const MIN_PRICE: f64 = 1.0;
const HISTORY_NOISE: f64 = 0.08;
const PREVIOUS_NOISE: f64 = 0.05;

const FALLBACK_COMMODITIES: [(&str, f64); 8] = [
    ("Wheat", 2275.0),
    ("Rice", 3200.0),
    ("Onion", 1800.0),
    ("Potato", 1200.0),
    ("Tomato", 1500.0),
    ("Soybean", 4350.0),
    ("Cotton", 6800.0),
    ("Maize", 1962.0),
];

/// Keeps any finite positive price as is; anything else becomes `MIN_PRICE`.
fn sanitize_price(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        MIN_PRICE
    }
}

/// Whole rupees for mandi-scale prices, paise below that, never under `floor`.
fn round_noisy(value: f64, floor: f64) -> f64 {
    let rounded = if value >= 100.0 {
        value.round()
    } else {
        (value * 100.0).round() / 100.0
    };
    rounded.max(floor)
}

/// Mandi rows for a location, dated today.
pub fn fallback_market_records(location: &str, today: NaiveDate) -> Vec<MarketRecord> {
    let parsed = parse_location(location);
    let market = if parsed.district.is_empty() {
        "Local Mandi".to_string()
    } else {
        format!("{} Mandi", parsed.district)
    };
    let arrival_date = today.format("%d/%m/%Y").to_string();

    FALLBACK_COMMODITIES
        .iter()
        .map(|(commodity, price)| MarketRecord {
            commodity: (*commodity).to_string(),
            market: market.clone(),
            modal_price: *price,
            arrival_date: arrival_date.clone(),
        })
        .collect()
}

/// Price the commodity plausibly traded at in the previous session.
pub fn simulate_previous<R: Rng + ?Sized>(current: f64, rng: &mut R) -> f64 {
    let current = sanitize_price(current);
    let factor = 1.0 + rng.gen_range(-PREVIOUS_NOISE..=PREVIOUS_NOISE);
    round_noisy(current * factor, current * 0.5)
}

/// Six dated points ending today at exactly `current`.
pub fn simulate_history<R: Rng + ?Sized>(
    current: f64,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<PricePoint> {
    let current = sanitize_price(current);
    let floor = current * 0.5;

    (0..HISTORY_POINTS)
        .map(|index| {
            #[allow(clippy::cast_possible_wrap)]
            let days_back = (HISTORY_POINTS - 1 - index) as i64 * HISTORY_STEP_DAYS;
            let date = today - Duration::days(days_back);
            let price = if days_back == 0 {
                current
            } else {
                let factor = 1.0 + rng.gen_range(-HISTORY_NOISE..=HISTORY_NOISE);
                round_noisy(current * factor, floor)
            };
            PricePoint { date, price }
        })
        .collect()
}

/// Calm, dry week used when geocoding or the forecast call fails.
pub fn fallback_weather(location: &str, today: NaiveDate) -> WeatherView {
    let pattern = [
        (28.0, 0.0, "Clear"),
        (30.0, 0.0, "Clear"),
        (26.0, 0.0, "Clouds"),
        (24.0, 6.5, "Rain"),
        (22.0, 4.0, "Rain"),
        (25.0, 0.0, "Clouds"),
        (27.0, 0.0, "Clear"),
    ];

    let weekly: Vec<DailyForecast> = pattern
        .iter()
        .enumerate()
        .map(|(offset, (temp, rain, condition))| {
            #[allow(clippy::cast_possible_wrap)]
            let date = today + Duration::days(offset as i64);
            DailyForecast {
                day: date.format("%a").to_string(),
                temp_max: *temp,
                rain: *rain,
                condition: (*condition).to_string(),
            }
        })
        .collect();

    let alerts = rain_alerts(&weekly);
    let place = primary_place(location);

    WeatherView {
        place: if place.is_empty() {
            "Your farm".to_string()
        } else {
            place.to_string()
        },
        current: CurrentConditions {
            temperature: 28.0,
            humidity: 45.0,
            wind_speed: 12.0,
            rainfall: 0.0,
            condition: "Clear".to_string(),
        },
        weekly,
        alerts,
        source: DataSource::Demo,
    }
}

/// Irrigation hints for any rainy day in a forecast.
pub fn rain_alerts(weekly: &[DailyForecast]) -> Vec<String> {
    let rainy: Vec<&str> = weekly
        .iter()
        .filter(|day| day.rain >= 1.0 || day.condition == "Rain" || day.condition == "Thunderstorm")
        .map(|day| day.day.as_str())
        .collect();

    if rainy.is_empty() {
        return Vec::new();
    }

    vec![format!(
        "Rain expected on {}. Consider irrigation planning.",
        rainy.join(", ")
    )]
}

pub fn fallback_insights() -> InsightsView {
    let insights = vec![
        Insight {
            kind: InsightKind::Tip,
            title: "Optimal Fertilizer Timing".to_string(),
            description: "Apply nitrogen fertilizer in split doses. First dose now, second after 3 weeks, so the crop takes it up as it tillers.".to_string(),
            priority: Priority::High,
        },
        Insight {
            kind: InsightKind::Warning,
            title: "Pest Surveillance".to_string(),
            description: "Regularly monitor your fields for early signs of aphids or stem borers. Early detection prevents significant crop damage and reduces chemical usage.".to_string(),
            priority: Priority::High,
        },
        Insight {
            kind: InsightKind::Tip,
            title: "Soil Moisture Conservation".to_string(),
            description: "Use organic mulch to retain soil moisture during dry spells. This reduces water dependency and improves yield stability.".to_string(),
            priority: Priority::Medium,
        },
        Insight {
            kind: InsightKind::Tip,
            title: "Water Conservation".to_string(),
            description: "Switch to drip irrigation for vegetable beds to save around 30% water during the dry season.".to_string(),
            priority: Priority::Medium,
        },
        Insight {
            kind: InsightKind::Success,
            title: "Soil Quality Report".to_string(),
            description: "Adding crop residues steadily raises soil organic matter. Continue this practice after harvest.".to_string(),
            priority: Priority::Low,
        },
    ];

    let active_alerts = count_alerts(&insights);

    InsightsView {
        insights,
        active_alerts,
        source: DataSource::Demo,
    }
}

pub fn count_alerts(insights: &[Insight]) -> u32 {
    let count = insights
        .iter()
        .filter(|insight| insight.kind == InsightKind::Warning)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

pub fn fallback_weather_analysis(location: &str, crop: &str, today: NaiveDate) -> WeatherAnalysis {
    let weather = fallback_weather(location, today);
    let forecast = weather
        .weekly
        .iter()
        .map(|day| ForecastDay {
            day: day.day.clone(),
            temp: day.temp_max,
            rain: day.rain,
            condition: day.condition.clone(),
        })
        .collect();

    WeatherAnalysis {
        crop: crop.to_string(),
        current: weather.current,
        forecast,
        insights: vec![
            AnalysisInsight {
                kind: "info".to_string(),
                message: "Good conditions for spraying".to_string(),
                action: format!(
                    "Dry, calm weather today suits pesticide or foliar spraying on {crop}. Spray in the early morning to limit drift."
                ),
            },
            AnalysisInsight {
                kind: "warning".to_string(),
                message: "Rain expected mid-week".to_string(),
                action: "Delay irrigation until after the rain and cover seedbeds before the showers arrive.".to_string(),
            },
        ],
        source: DataSource::Demo,
    }
}

pub fn sensor_readings() -> Vec<SensorReading> {
    let times = ["6AM", "9AM", "12PM", "3PM", "6PM", "9PM"];
    let series = |values: [f64; 6]| -> Vec<(String, f64)> {
        times
            .iter()
            .zip(values)
            .map(|(time, value)| ((*time).to_string(), value))
            .collect()
    };

    vec![
        SensorReading {
            label: "Temperature".to_string(),
            value: 28.0,
            unit: "°C".to_string(),
            range: (15.0, 40.0),
            history: series([22.0, 25.0, 30.0, 32.0, 28.0, 24.0]),
        },
        SensorReading {
            label: "Soil Moisture".to_string(),
            value: 72.0,
            unit: "%".to_string(),
            range: (0.0, 100.0),
            history: series([75.0, 73.0, 70.0, 68.0, 72.0, 74.0]),
        },
        SensorReading {
            label: "Humidity".to_string(),
            value: 65.0,
            unit: "%".to_string(),
            range: (0.0, 100.0),
            history: series([70.0, 68.0, 60.0, 55.0, 62.0, 68.0]),
        },
        SensorReading {
            label: "Soil Nutrients (NPK)".to_string(),
            value: 85.0,
            unit: "%".to_string(),
            range: (0.0, 100.0),
            history: series([85.0, 85.0, 84.0, 84.0, 85.0, 85.0]),
        },
    ]
}

pub fn crop_progress() -> Vec<CropProgress> {
    [
        ("Wheat", "Growing", 65, 45, "Excellent"),
        ("Rice", "Flowering", 80, 25, "Good"),
        ("Tomatoes", "Fruiting", 90, 10, "Excellent"),
        ("Potatoes", "Seedling", 25, 80, "Growing"),
    ]
    .into_iter()
    .map(|(name, stage, progress, days, health)| CropProgress {
        name: name.to_string(),
        stage: stage.to_string(),
        progress,
        days_to_harvest: days,
        health: health.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap_or_default()
    }

    #[test]
    fn market_records_are_dated_today_and_positive() {
        let records = fallback_market_records("Pune, Maharashtra", today());
        assert!(!records.is_empty());
        for record in &records {
            assert!(record.modal_price > 0.0);
            assert_eq!(record.arrival_date, "16/10/2026");
            assert_eq!(record.market, "Pune Mandi");
        }
    }

    #[test]
    fn unknown_location_uses_local_mandi() {
        let records = fallback_market_records("Unknown", today());
        assert!(records.iter().all(|record| record.market == "Local Mandi"));
    }

    #[test]
    fn history_is_ordered_positive_and_ends_at_current() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for current in [0.5, 1.0, 12.5, 2275.0, 98_000.0] {
                let history = simulate_history(current, today(), &mut rng);
                assert_eq!(history.len(), HISTORY_POINTS);
                assert!(history.windows(2).all(|pair| pair[0].date <= pair[1].date));
                assert!(history.iter().all(|point| point.price.is_finite() && point.price > 0.0));

                let last = history.last().map(|point| (point.date, point.price));
                assert_eq!(last, Some((today(), current)));
            }
        }
    }

    #[test]
    fn noise_never_produces_bad_prices_from_bad_input() {
        let mut rng = StdRng::seed_from_u64(7);
        for current in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let history = simulate_history(current, today(), &mut rng);
            assert!(history.iter().all(|point| point.price.is_finite() && point.price > 0.0));
            let previous = simulate_previous(current, &mut rng);
            assert!(previous.is_finite() && previous > 0.0);
        }
    }

    #[test]
    fn sub_rupee_prices_are_not_raised() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let previous = simulate_previous(0.4, &mut rng);
            assert!((0.38..=0.42).contains(&previous), "{previous}");
        }
    }

    #[test]
    fn previous_price_stays_near_current() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let previous = simulate_previous(2000.0, &mut rng);
            assert!((1900.0..=2100.0).contains(&previous), "{previous}");
        }
    }

    #[test]
    fn fallback_weather_flags_rainy_days() {
        let weather = fallback_weather("Bhopal, Madhya Pradesh", today());
        assert_eq!(weather.place, "Bhopal");
        assert_eq!(weather.weekly.len(), 7);
        assert_eq!(weather.alerts.len(), 1);
        assert!(weather.source.is_demo());
    }

    #[test]
    fn rain_alerts_empty_for_dry_week() {
        let dry = vec![DailyForecast {
            day: "Mon".to_string(),
            temp_max: 30.0,
            rain: 0.0,
            condition: "Clear".to_string(),
        }];
        assert!(rain_alerts(&dry).is_empty());
    }

    #[test]
    fn fallback_insights_count_warnings_as_alerts() {
        let view = fallback_insights();
        assert!(!view.insights.is_empty());
        assert_eq!(view.active_alerts, 1);
    }

    #[test]
    fn fallback_analysis_mentions_crop() {
        let analysis = fallback_weather_analysis("Pune, Maharashtra", "Cotton", today());
        assert_eq!(analysis.crop, "Cotton");
        assert_eq!(analysis.forecast.len(), 7);
        assert!(analysis.insights[0].action.contains("Cotton"));
    }
}
