//! Plain-text and JSON rendering for command output.

use crate::error::Result;
use crate::logic::classifier::Model;
use crate::logic::rules::RecommendationEngine;
use crate::logic::{Assessment, CityOverview, ConnectionStatus};
use crate::models::{
    ClassificationResult, Feature, PredictionRecord, Recommendation, Station, StationReading,
};
use serde::Serialize;
use std::fmt::Write;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn classification(result: &ClassificationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Air quality: {} ({})",
        result.category,
        result.category.vi_label()
    );
    let _ = writeln!(out, "Confidence:  {:.1}%", result.confidence_percent());
    let features: Vec<String> = Feature::ALL
        .iter()
        .map(|f| format!("{}={}", f, result.features.get(*f)))
        .collect();
    let _ = writeln!(out, "Features:    {}", features.join(" "));
    let _ = writeln!(out, "Rules:");
    for rule in &result.rules {
        let _ = writeln!(out, "  {}", rule);
    }
    out
}

pub fn recommendations(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "No recommendations\n".to_string();
    }

    let mut out = String::new();
    for rec in recs {
        let _ = writeln!(
            out,
            "{} [{}] {}",
            rec.priority.symbol(),
            rec.category,
            rec.title
        );
        let _ = writeln!(out, "    {}", rec.description);
    }
    out
}

pub fn assessment(a: &Assessment) -> String {
    let mut out = String::new();
    let r = &a.reading;

    let _ = writeln!(out, "{}", a.location.name);
    let _ = writeln!(
        out,
        "  {:.4}, {:.4}  via {} at {}",
        a.location.latitude,
        a.location.longitude,
        r.source,
        r.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "  AQI {:.0} - {} ({})",
        r.aqi,
        a.aqi_level,
        a.aqi_level.vi_label()
    );
    let _ = writeln!(
        out,
        "  PM2.5 {:.1}  PM10 {:.1}  O3 {:.1}  NO2 {:.1}  SO2 {:.1}  CO {:.1}",
        r.pm2_5, r.pm10, r.o3, r.no2, r.so2, r.co
    );
    let _ = writeln!(
        out,
        "  Temperature {}  Humidity {}",
        optional(r.temperature_c, "°C"),
        optional(r.humidity_percent, "%")
    );
    out.push('\n');
    out.push_str(&classification(&a.classification));
    out.push('\n');
    let _ = writeln!(out, "Recommendations for {}:", a.user_group);
    out.push_str(&recommendations(&a.recommendations));
    out
}

pub fn stations(list: &[&Station]) -> String {
    if list.is_empty() {
        return "No stations found\n".to_string();
    }

    let mut out = String::new();
    for s in list {
        let _ = writeln!(
            out,
            "{:<16} {:<36} {:>9.4} {:>9.4}  {}",
            s.id, s.name, s.latitude, s.longitude, s.region
        );
    }
    out
}

pub fn station_readings(list: &[StationReading]) -> String {
    if list.is_empty() {
        return "No station data available\n".to_string();
    }

    let mut out = String::new();
    for s in list {
        station_row(&mut out, s);
    }
    out
}

/// One row per city, followed by its high-priority advice.
pub fn city_overviews(list: &[CityOverview]) -> String {
    if list.is_empty() {
        return "No station data available\n".to_string();
    }

    let mut out = String::new();
    for city in list {
        station_row(&mut out, &city.reading);
        let urgent: Vec<&Recommendation> = city
            .recommendations
            .iter()
            .filter(|r| r.is_high_priority())
            .collect();
        for rec in &urgent {
            let _ = writeln!(out, "    {} {}", rec.priority.symbol(), rec.title);
        }
        let rest = city.recommendations.len() - urgent.len();
        if rest > 0 {
            let _ = writeln!(out, "    +{} more ({})", rest, city.category.vi_label());
        }
    }
    out
}

fn station_row(out: &mut String, s: &StationReading) {
    let _ = writeln!(
        out,
        "{:<14} AQI {:>4.0}  {:<30} {}",
        s.name,
        s.aqi,
        s.level.to_string(),
        s.dominant_pollutant.as_deref().unwrap_or("-")
    );
}

pub fn history(records: &[PredictionRecord]) -> String {
    if records.is_empty() {
        return "No saved assessments\n".to_string();
    }

    let mut out = String::new();
    for rec in records {
        let _ = writeln!(
            out,
            "{}  {}  {:<12} {:>5.1}%  AQI {:.0}  {}",
            rec.timestamp.format("%Y-%m-%d %H:%M"),
            rec.id,
            rec.category.vi_label(),
            rec.confidence * 100.0,
            rec.aqi,
            rec.location
        );
    }
    out
}

pub fn connections(status: &ConnectionStatus) -> String {
    let mark = |ok: bool| if ok { "OK" } else { "OFFLINE" };
    format!(
        "OpenWeatherMap: {}\nWAQI: {}\nHistory: {}\n",
        mark(status.openweathermap),
        mark(status.waqi),
        mark(status.history)
    )
}

pub fn engine_summary(model: &dyn Model, engine: &RecommendationEngine) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Model: {} ({})", model.name(), model.id());
    let _ = writeln!(out, "Weather rules:");
    for (id, name) in engine.list_rules() {
        let _ = writeln!(out, "  {:<18} {}", id, name);
    }
    out
}

fn optional(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.1}{}", v, unit))
        .unwrap_or_else(|| "n/a".to_string())
}
