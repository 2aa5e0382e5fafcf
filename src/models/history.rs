use super::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub category: Category,
    pub confidence: f64,
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
}

impl PredictionRecord {
    pub fn new(
        location: impl Into<String>,
        category: Category,
        confidence: f64,
        aqi: f64,
        pm25: f64,
        pm10: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            location: location.into(),
            category,
            confidence,
            aqi,
            pm25,
            pm10,
        }
    }
}

/// Orders records newest first; ties keep their relative order.
pub fn sort_newest_first(records: &mut [PredictionRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

const CSV_HEADERS: [&str; 7] = [
    "Thời gian",
    "Địa điểm",
    "Phân loại",
    "Độ tin cậy (%)",
    "AQI",
    "PM2.5",
    "PM10",
];

/// Renders history as CSV, one row per record in the given order.
pub fn to_csv(records: &[PredictionRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for record in records {
        let fields = [
            record.timestamp.to_rfc3339(),
            record.location.clone(),
            record.category.vi_label().to_string(),
            format!("{:.1}", record.confidence * 100.0),
            format_number(record.aqi),
            format_number(record.pm25),
            format_number(record.pm10),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
