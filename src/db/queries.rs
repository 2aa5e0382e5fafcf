use crate::db::{Database, Repository};
use crate::error::Result;
use crate::models::{Category, PredictionRecord};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

// Prediction History Queries

impl Database {
    pub fn insert_prediction(&self, record: &PredictionRecord) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO prediction_history
                    (id, timestamp, location, category, confidence, aqi, pm25, pm10)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    record.id,
                    record.timestamp.to_rfc3339(),
                    record.location,
                    record.category.as_str(),
                    record.confidence,
                    record.aqi,
                    record.pm25,
                    record.pm10,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_prediction(&self, id: &str) -> Result<Option<PredictionRecord>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM prediction_history WHERE id = ?1",
                [id],
                row_to_prediction,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Newest first.
    pub fn get_predictions(&self, limit: Option<usize>) -> Result<Vec<PredictionRecord>> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM prediction_history ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
            )?;
            let records = stmt
                .query_map([limit], row_to_prediction)?
                .filter_map(|r| match r {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Skipping unreadable history row: {}", e);
                        None
                    }
                })
                .collect();
            Ok(records)
        })
    }

    pub fn delete_prediction(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM prediction_history WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    pub fn clear_predictions(&self) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM prediction_history", [])?))
    }
}

impl Repository<PredictionRecord> for Database {
    fn get(&self, key: &str) -> Result<Option<PredictionRecord>> {
        self.get_prediction(key)
    }

    fn put(&self, item: PredictionRecord) -> Result<()> {
        self.insert_prediction(&item)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        self.delete_prediction(key)
    }

    fn list(&self) -> Result<Vec<PredictionRecord>> {
        self.get_predictions(None)
    }

    fn clear(&self) -> Result<usize> {
        self.clear_predictions()
    }
}

fn row_to_prediction(row: &Row) -> rusqlite::Result<PredictionRecord> {
    let category_str: String = row.get("category")?;
    let timestamp_str: String = row.get("timestamp")?;

    let category = Category::from_label(&category_str).unwrap_or_else(|| {
        warn!(
            category = %category_str,
            "Unknown category in database, defaulting to Moderate"
        );
        Category::Moderate
    });

    Ok(PredictionRecord {
        id: row.get("id")?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        location: row.get("location")?,
        category,
        confidence: row.get("confidence")?,
        aqi: row.get("aqi")?,
        pm25: row.get("pm25")?,
        pm10: row.get("pm10")?,
    })
}
