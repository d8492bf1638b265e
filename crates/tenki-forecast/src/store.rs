//! SQLite-backed forecast cache.
//!
//! One row per `(date, area_code)`. Writes are insert-or-replace inside a
//! single transaction per batch, so a batch lands whole or not at all.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::ForecastError;
use crate::types::{AreaCode, ForecastRecord};

/// Durable store of the current forecast per date and area.
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Open or create the cache database at `path`.
    ///
    /// Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ForecastError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ForecastError::StoragePath {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        tracing::debug!("Opened forecast cache at {}", path.display());
        Ok(store)
    }

    /// Create an in-memory store; contents are lost on drop.
    pub fn in_memory() -> Result<Self, ForecastError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), ForecastError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS forecasts (
                date TEXT NOT NULL,
                area_code TEXT NOT NULL,
                area_name TEXT,
                weather TEXT,
                temp_min TEXT,
                temp_max TEXT,
                PRIMARY KEY (date, area_code)
            );

            CREATE INDEX IF NOT EXISTS idx_forecasts_area ON forecasts(area_code, date);
            "#,
        )?;
        Ok(())
    }

    /// Insert or replace every record in one transaction.
    ///
    /// Records sharing a `(date, area_code)` key with an existing row replace
    /// it; later records in the same batch win over earlier ones.
    pub fn upsert(&mut self, records: &[ForecastRecord]) -> Result<(), ForecastError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                r#"
                INSERT OR REPLACE INTO forecasts
                (date, area_code, area_name, weather, temp_min, temp_max)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.date,
                    record.area_code.as_str(),
                    record.area_name,
                    record.weather_text,
                    record.temp_min,
                    record.temp_max,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Upserted {} forecast records", records.len());
        Ok(())
    }

    /// All cached records for an area, oldest date first.
    ///
    /// An area with nothing cached yields an empty vector.
    pub fn read_by_area(&self, area: &AreaCode) -> Result<Vec<ForecastRecord>, ForecastError> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT date, area_code, area_name, weather, temp_min, temp_max
            FROM forecasts
            WHERE area_code = ?1
            ORDER BY date ASC
            "#,
        )?;

        let rows = stmt.query_map(params![area.as_str()], Self::row_to_record)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Number of cached records for an area.
    pub fn count_for_area(&self, area: &AreaCode) -> Result<u32, ForecastError> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM forecasts WHERE area_code = ?1",
            params![area.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ForecastRecord> {
        let area_code: String = row.get(1)?;
        let area_name: Option<String> = row.get(2)?;
        let weather: Option<String> = row.get(3)?;
        let temp_min: Option<String> = row.get(4)?;
        let temp_max: Option<String> = row.get(5)?;

        Ok(ForecastRecord {
            date: row.get(0)?,
            area_code: AreaCode::from(area_code),
            area_name: area_name.unwrap_or_default(),
            weather_text: weather.unwrap_or_default(),
            temp_min: temp_min.unwrap_or_else(|| crate::TEMP_SENTINEL.to_string()),
            temp_max: temp_max.unwrap_or_else(|| crate::TEMP_SENTINEL.to_string()),
        })
    }
}
