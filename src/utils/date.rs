use chrono::NaiveDate;
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

// accepts plain ISO dates as well as timestamps such as `2024-05-01T00:00:00`
pub fn parse_date(str_date: &str) -> LibraryResult<NaiveDate> {
    let trimmed = str_date.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, DATE_FMT).map_err(|e| LibraryError::serialization(
        format!("invalid date {:?}: {}", str_date, e).as_str()))
}

pub mod serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        format_date(*date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let str_date: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_date).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.map(format_date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let str_date: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_date {
            Some(s) if !s.trim().is_empty() => parse_date(&s).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::utils::date::{format_date, parse_date};

    #[tokio::test]
    async fn test_should_parse_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        assert_eq!(expected, parse_date("2024-05-01").expect("should parse date"));
        assert_eq!(expected, parse_date("2024-05-01T13:45:00.000Z").expect("should parse timestamp"));
        assert!(parse_date("05/01/2024").is_err());
    }

    #[tokio::test]
    async fn test_should_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).expect("valid date");
        assert_eq!("2024-01-09", format_date(date));
    }
}
