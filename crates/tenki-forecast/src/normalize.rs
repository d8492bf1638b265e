//! Flattens a raw forecast payload into per-date records.

use chrono::DateTime;

use crate::error::ForecastError;
use crate::payload::RawForecastPayload;
use crate::types::{AreaCode, ForecastRecord};

/// Placeholder for a temperature the upstream did not report.
pub const TEMP_SENTINEL: &str = "-";

/// Normalize a payload into records ordered like its weather descriptions.
///
/// Dates and weathers come from the first time series; temperatures from the
/// first series whose leading area entry carries `temps`. Temperatures are
/// paired `(temps[2i], temps[2i + 1])` and degrade to [`TEMP_SENTINEL`] when
/// either index is missing.
///
/// A weather entry with no matching `timeDefines` entry is skipped with a
/// warning, so the result may be shorter than `weathers`.
///
/// # Errors
///
/// Returns [`ForecastError::UpstreamShape`] when the payload has no
/// publishing office, no time series or no area entry.
pub fn normalize(
    payload: &RawForecastPayload,
    area: &AreaCode,
    area_name: &str,
) -> Result<Vec<ForecastRecord>, ForecastError> {
    let office = payload
        .offices()
        .first()
        .ok_or(ForecastError::UpstreamShape("publishing office"))?;
    let primary = office
        .time_series
        .first()
        .ok_or(ForecastError::UpstreamShape("time series"))?;
    let primary_area = primary
        .areas
        .first()
        .ok_or(ForecastError::UpstreamShape("area entry"))?;

    let dates = &primary.time_defines;
    let weathers = primary_area.weathers.as_deref().unwrap_or(&[]);
    let temps = office
        .time_series
        .iter()
        .find_map(|series| series.areas.first().and_then(|a| a.temps.as_deref()))
        .unwrap_or(&[]);

    let mut records = Vec::with_capacity(weathers.len());
    for (index, weather) in weathers.iter().enumerate() {
        let Some(raw_date) = dates.get(index) else {
            tracing::warn!(
                area = %area,
                index,
                "Skipping forecast entry without a matching date"
            );
            continue;
        };

        let (temp_min, temp_max) = temp_pair(temps, index);
        records.push(ForecastRecord {
            date: calendar_date(raw_date),
            area_code: area.clone(),
            area_name: area_name.to_string(),
            weather_text: weather.clone(),
            temp_min,
            temp_max,
        });
    }

    tracing::debug!(
        area = %area,
        records = records.len(),
        temps = temps.len(),
        "Normalized forecast payload"
    );
    Ok(records)
}

/// Truncate a timestamp such as `2024-05-01T00:00:00+09:00` to `2024-05-01`.
///
/// The date is taken in the timestamp's own offset, not converted to UTC.
pub fn calendar_date(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive().format("%Y-%m-%d").to_string();
    }
    raw.split(['T', ' ']).next().unwrap_or(raw).to_string()
}

fn temp_pair(temps: &[String], index: usize) -> (String, String) {
    let min = index.checked_mul(2).and_then(|i| temps.get(i));
    let max = index
        .checked_mul(2)
        .and_then(|i| i.checked_add(1))
        .and_then(|i| temps.get(i));

    match (min, max) {
        (Some(min), Some(max)) => (or_sentinel(min), or_sentinel(max)),
        _ => (TEMP_SENTINEL.to_string(), TEMP_SENTINEL.to_string()),
    }
}

fn or_sentinel(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        TEMP_SENTINEL.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> RawForecastPayload {
        serde_json::from_value(value).unwrap()
    }

    fn tokyo() -> AreaCode {
        AreaCode::from("130000")
    }

    fn simple(dates: &[&str], weathers: &[&str], temps: &[&str]) -> RawForecastPayload {
        payload(json!([{
            "timeSeries": [
                {
                    "timeDefines": dates,
                    "areas": [{"area": {"name": "東京地方", "code": "130010"}, "weathers": weathers}]
                },
                {
                    "timeDefines": [],
                    "areas": [{"area": {"name": "東京", "code": "44132"}, "temps": temps}]
                }
            ]
        }]))
    }

    #[test]
    fn test_partial_temps_scenario() {
        let p = simple(
            &["2024-05-01T00:00:00+09:00", "2024-05-02T00:00:00+09:00"],
            &["晴れ", "曇り"],
            &["10", "20", "12"],
        );
        let records = normalize(&p, &tokyo(), "東京").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-05-01");
        assert_eq!(records[0].weather_text, "晴れ");
        assert_eq!((records[0].temp_min.as_str(), records[0].temp_max.as_str()), ("10", "20"));
        assert_eq!(records[1].date, "2024-05-02");
        assert_eq!((records[1].temp_min.as_str(), records[1].temp_max.as_str()), ("-", "-"));
        assert!(records.iter().all(|r| r.area_code == tokyo() && r.area_name == "東京"));
    }

    #[test]
    fn test_record_count_follows_weathers() {
        let p = simple(
            &[
                "2024-05-01T11:00:00+09:00",
                "2024-05-02T00:00:00+09:00",
                "2024-05-03T00:00:00+09:00",
            ],
            &["晴れ", "雨", "雪"],
            &[],
        );
        let records = normalize(&p, &tokyo(), "東京").unwrap();
        assert_eq!(records.len(), 3);
        assert!(records
            .iter()
            .all(|r| r.temp_min == TEMP_SENTINEL && r.temp_max == TEMP_SENTINEL));
    }

    #[test]
    fn test_temps_come_from_first_block_that_has_them() {
        let p = payload(json!([{
            "timeSeries": [
                {
                    "timeDefines": ["2024-05-01T00:00:00+09:00"],
                    "areas": [{"weathers": ["晴れ"]}]
                },
                {
                    "timeDefines": [],
                    "areas": [{"pops": ["10", "20"]}]
                },
                {
                    "timeDefines": [],
                    "areas": [{"temps": ["5", "15"]}]
                },
                {
                    "timeDefines": [],
                    "areas": [{"temps": ["99", "99"]}]
                }
            ]
        }]));
        let records = normalize(&p, &tokyo(), "東京").unwrap();
        assert_eq!(records[0].temp_min, "5");
        assert_eq!(records[0].temp_max, "15");
    }

    #[test]
    fn test_only_first_office_is_used() {
        let p = payload(json!([
            {
                "timeSeries": [{
                    "timeDefines": ["2024-05-01T00:00:00+09:00"],
                    "areas": [{"weathers": ["晴れ"], "temps": ["1", "2"]}]
                }]
            },
            {
                "timeSeries": [{
                    "timeDefines": ["2024-05-02", "2024-05-03"],
                    "areas": [{"weathers": ["雨", "雨"]}]
                }]
            }
        ]));
        let records = normalize(&p, &tokyo(), "東京").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].temp_max, "2");
    }

    #[test]
    fn test_empty_temp_values_become_sentinel() {
        let p = simple(&["2024-05-01T00:00:00+09:00"], &["晴れ"], &["", "18"]);
        let records = normalize(&p, &tokyo(), "東京").unwrap();
        assert_eq!(records[0].temp_min, TEMP_SENTINEL);
        assert_eq!(records[0].temp_max, "18");
    }

    #[test]
    fn test_missing_dates_are_skipped_not_fatal() {
        let p = simple(&["2024-05-01T00:00:00+09:00"], &["晴れ", "雨"], &[]);
        let records = normalize(&p, &tokyo(), "東京").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weather_text, "晴れ");
    }

    #[test]
    fn test_missing_weathers_yields_empty() {
        let p = payload(json!([{
            "timeSeries": [{
                "timeDefines": ["2024-05-01"],
                "areas": [{"area": {"name": "x", "code": "1"}}]
            }]
        }]));
        assert!(normalize(&p, &tokyo(), "東京").unwrap().is_empty());
    }

    #[test]
    fn test_shape_errors() {
        let cases = [
            (json!([]), "publishing office"),
            (json!([{"timeSeries": []}]), "time series"),
            (json!([{"timeSeries": [{"timeDefines": [], "areas": []}]}]), "area entry"),
        ];
        for (value, missing) in cases {
            let err = normalize(&payload(value), &tokyo(), "東京").unwrap_err();
            match err {
                ForecastError::UpstreamShape(what) => assert_eq!(what, missing),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(calendar_date("2024-05-01T00:00:00+09:00"), "2024-05-01");
        assert_eq!(calendar_date("2024-05-01T23:00:00-05:00"), "2024-05-01");
        assert_eq!(calendar_date("2024-05-01"), "2024-05-01");
        assert_eq!(calendar_date("2024-05-01 06:00"), "2024-05-01");
    }
}
