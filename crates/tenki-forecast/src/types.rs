use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream area identifier, e.g. `130000` for Tokyo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaCode(String);

impl AreaCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for AreaCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// One day of forecast for one area, as persisted in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub area_code: AreaCode,
    pub area_name: String,
    pub weather_text: String,
    /// Minimum temperature or `"-"` when not reported
    pub temp_min: String,
    /// Maximum temperature or `"-"` when not reported
    pub temp_max: String,
}

/// Coarse icon category derived from the weather text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Sun,
    Rain,
    Cloud,
    Snow,
    #[default]
    Unknown,
}

impl WeatherIcon {
    /// Classify JMA weather text by substring.
    ///
    /// Checked in order, so "晴れ時々雨" is `Sun` and "雨時々雪" is `Rain`.
    pub fn classify(weather_text: &str) -> Self {
        if weather_text.contains('晴') {
            Self::Sun
        } else if weather_text.contains('雨') {
            Self::Rain
        } else if weather_text.contains('曇') || weather_text.contains("くもり") {
            Self::Cloud
        } else if weather_text.contains('雪') {
            Self::Snow
        } else {
            Self::Unknown
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Rain => "rain",
            Self::Cloud => "cloud",
            Self::Snow => "snow",
            Self::Unknown => "unknown",
        }
    }

    /// Glyph used by the terminal renderer
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Rain => "☂",
            Self::Cloud => "☁",
            Self::Snow => "❄",
            Self::Unknown => "?",
        }
    }
}

/// Display-ready forecast entry handed to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastEntry {
    pub date: String,
    pub weather: String,
    pub temp_min: String,
    pub temp_max: String,
    pub icon: WeatherIcon,
}

impl From<&ForecastRecord> for ForecastEntry {
    fn from(record: &ForecastRecord) -> Self {
        let date = record.date.chars().take(10).collect();
        Self {
            date,
            weather: record.weather_text.clone(),
            temp_min: record.temp_min.clone(),
            temp_max: record.temp_max.clone(),
            icon: WeatherIcon::classify(&record.weather_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sun() {
        assert_eq!(WeatherIcon::classify("晴れ"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::classify("晴れ　時々　くもり"), WeatherIcon::Sun);
    }

    #[test]
    fn test_classify_rain_before_cloud() {
        assert_eq!(WeatherIcon::classify("くもり　夜　雨"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::classify("雨時々雪"), WeatherIcon::Rain);
    }

    #[test]
    fn test_classify_cloud_both_spellings() {
        assert_eq!(WeatherIcon::classify("曇り"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::classify("くもり"), WeatherIcon::Cloud);
    }

    #[test]
    fn test_classify_snow() {
        assert_eq!(WeatherIcon::classify("雪"), WeatherIcon::Snow);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(WeatherIcon::classify(""), WeatherIcon::Unknown);
        assert_eq!(WeatherIcon::classify("霧"), WeatherIcon::Unknown);
        assert_eq!(WeatherIcon::Unknown.name(), "unknown");
    }

    #[test]
    fn test_entry_from_record() {
        let record = ForecastRecord {
            date: "2024-05-01".to_string(),
            area_code: AreaCode::from("130000"),
            area_name: "東京".to_string(),
            weather_text: "晴れ".to_string(),
            temp_min: "10".to_string(),
            temp_max: "20".to_string(),
        };
        let entry = ForecastEntry::from(&record);
        assert_eq!(entry.date, "2024-05-01");
        assert_eq!(entry.icon, WeatherIcon::Sun);
        assert_eq!(entry.temp_max, "20");
    }

    #[test]
    fn test_area_code_display() {
        let code = AreaCode::new("471000");
        assert_eq!(code.to_string(), "471000");
        assert_eq!(code.as_str(), "471000");
    }
}
