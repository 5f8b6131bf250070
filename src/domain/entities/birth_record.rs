use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

fn default_second() -> u32 {
    0
}

fn default_timezone() -> f64 {
    5.5
}

fn default_ayanamsa() -> String {
    "LAHIRI".to_string()
}

/// Birth data for one request. Constructed from the request payload,
/// validated once, and discarded after the response is serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRecord {
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    #[serde(default = "default_second")]
    pub second: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_timezone")]
    pub timezone: f64,
    #[serde(default = "default_ayanamsa")]
    pub ayanamsa: String,
}

impl BirthRecord {
    /// Check every field constraint. The first violated constraint wins.
    /// Must be called before any engine query.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(ValidationError::InvalidDate(format!(
                "{}-{}-{} is not a calendar date",
                self.year, self.month, self.day
            )));
        }
        if self.hour > 23 {
            return Err(ValidationError::InvalidTime(format!(
                "hour {} out of range 0-23",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(ValidationError::InvalidTime(format!(
                "minute {} out of range 0-59",
                self.minute
            )));
        }
        if self.second > 59 {
            return Err(ValidationError::InvalidTime(format!(
                "second {} out of range 0-59",
                self.second
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::InvalidCoordinates(format!(
                "latitude {} out of range -90..90",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::InvalidCoordinates(format!(
                "longitude {} out of range -180..180",
                self.longitude
            )));
        }
        if !(-14.0..=14.0).contains(&self.timezone) {
            return Err(ValidationError::InvalidTimezone(format!(
                "offset {} out of range -14..14 hours",
                self.timezone
            )));
        }
        if self.ayanamsa.trim().is_empty() {
            return Err(ValidationError::InvalidAyanamsa(
                "ayanamsa name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// ISO-style date string, e.g. `2000-01-01`.
    pub fn date_string(&self) -> String {
        format!("{}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Clock string, e.g. `12:00:00`.
    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// Ayanamsa identifier as the engine expects it (upper-case).
    pub fn ayanamsa_mode(&self) -> String {
        self.ayanamsa.trim().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> BirthRecord {
        BirthRecord {
            name: "Test".to_string(),
            year: 2000,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
            latitude: 28.6139,
            longitude: 77.2090,
            timezone: 5.5,
            ayanamsa: "LAHIRI".to_string(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_month_13_rejected() {
        let mut record = valid_record();
        record.month = 13;
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_february_30_rejected() {
        let mut record = valid_record();
        record.month = 2;
        record.day = 30;
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_leap_day_accepted() {
        let mut record = valid_record();
        record.month = 2;
        record.day = 29;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_hour_24_rejected() {
        let mut record = valid_record();
        record.hour = 24;
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        let mut record = valid_record();
        record.latitude = 91.0;
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_nan_latitude_rejected() {
        let mut record = valid_record();
        record.latitude = f64::NAN;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_blank_ayanamsa_rejected() {
        let mut record = valid_record();
        record.ayanamsa = "  ".to_string();
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidAyanamsa(_))
        ));
    }

    #[test]
    fn test_defaults_applied_on_deserialize() {
        let payload = r#"{
            "name": "Test", "year": 2000, "month": 1, "day": 1,
            "hour": 12, "minute": 0,
            "latitude": 28.6139, "longitude": 77.2090
        }"#;
        let record: BirthRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.second, 0);
        assert_eq!(record.timezone, 5.5);
        assert_eq!(record.ayanamsa, "LAHIRI");
    }

    #[test]
    fn test_ayanamsa_mode_uppercases() {
        let mut record = valid_record();
        record.ayanamsa = "lahiri".to_string();
        assert_eq!(record.ayanamsa_mode(), "LAHIRI");
    }

    #[test]
    fn test_date_and_time_strings_zero_padded() {
        let mut record = valid_record();
        record.month = 3;
        record.day = 7;
        record.hour = 9;
        record.minute = 5;
        assert_eq!(record.date_string(), "2000-03-07");
        assert_eq!(record.time_string(), "09:05:00");
    }
}
