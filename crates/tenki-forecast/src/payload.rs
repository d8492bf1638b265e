//! Typed view of the JMA forecast JSON.
//!
//! Only the fields the normalizer reads are modelled. Everything is optional
//! or defaulted so that shallow or partial payloads still parse and the
//! shape checks happen in one place (`normalize`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ForecastError;

/// Top-level document: one entry per publishing office.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawForecastPayload(pub Vec<PublishingOffice>);

impl RawForecastPayload {
    pub fn from_slice(body: &[u8]) -> Result<Self, ForecastError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn offices(&self) -> &[PublishingOffice] {
        &self.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingOffice {
    #[serde(default)]
    pub publishing_office: Option<String>,
    #[serde(default)]
    pub report_datetime: Option<String>,
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
}

/// One reporting cadence, e.g. daily weather or AM/PM temperatures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub time_defines: Vec<String>,
    #[serde(default)]
    pub areas: Vec<AreaSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaSeries {
    #[serde(default)]
    pub area: Option<AreaRef>,
    #[serde(default, deserialize_with = "lenient_texts")]
    pub weathers: Option<Vec<String>>,
    /// Interleaved min/max values; `Some` even when empty if the key is present
    #[serde(default, deserialize_with = "lenient_texts")]
    pub temps: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// Accept strings, numbers and nulls; JMA reports temps as strings but
/// not every feed does.
fn lenient_texts<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|values| values.into_iter().map(value_text).collect()))
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-05-01T11:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": ["2024-05-01T11:00:00+09:00", "2024-05-02T00:00:00+09:00"],
                    "areas": [
                        {
                            "area": {"name": "東京地方", "code": "130010"},
                            "weatherCodes": ["100", "200"],
                            "weathers": ["晴れ", "くもり"]
                        }
                    ]
                },
                {
                    "timeDefines": ["2024-05-01T00:00:00+09:00"],
                    "areas": [
                        {"area": {"name": "東京", "code": "44132"}, "temps": ["12", 21.5, null]}
                    ]
                }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_sample() {
        let payload = RawForecastPayload::from_slice(SAMPLE.as_bytes()).unwrap();
        let office = &payload.offices()[0];
        assert_eq!(office.publishing_office.as_deref(), Some("気象庁"));
        assert_eq!(office.time_series.len(), 2);

        let first = &office.time_series[0].areas[0];
        assert_eq!(first.area.as_ref().unwrap().code, "130010");
        assert_eq!(first.weathers.as_deref().unwrap(), ["晴れ", "くもり"]);
        assert!(first.temps.is_none());
    }

    #[test]
    fn test_lenient_temps() {
        let payload = RawForecastPayload::from_slice(SAMPLE.as_bytes()).unwrap();
        let temps = payload.offices()[0].time_series[1].areas[0].temps.clone().unwrap();
        assert_eq!(temps, vec!["12", "21.5", ""]);
    }

    #[test]
    fn test_shallow_payload_parses() {
        let payload = RawForecastPayload::from_slice(br#"[{"timeSeries": []}]"#).unwrap();
        assert!(payload.offices()[0].time_series.is_empty());
    }

    #[test]
    fn test_non_json_is_format_error() {
        let err = RawForecastPayload::from_slice(b"<html>not found</html>").unwrap_err();
        assert!(matches!(err, ForecastError::UpstreamFormat(_)));
    }

    #[test]
    fn test_wrong_top_level_is_format_error() {
        let err = RawForecastPayload::from_slice(br#"{"timeSeries": []}"#).unwrap_err();
        assert!(matches!(err, ForecastError::UpstreamFormat(_)));
    }
}
