//! Date and timestamp generators.

use bson::Bson;
use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;

/// Upper bound for generated timestamps (2030-01-01T00:00:00Z).
const LATEST_TIMESTAMP: i64 = 1_893_456_000;

/// Random timestamp between the Unix epoch and 2030, with second precision.
fn random_datetime<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    let secs = rng.random_range(0..LATEST_TIMESTAMP);
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

/// Random BSON date.
pub fn date_time<R: Rng>(rng: &mut R) -> Bson {
    Bson::DateTime(bson::DateTime::from_chrono(random_datetime(rng)))
}

/// Random calendar date as a `YYYY-MM-DD` string.
pub fn date<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_datetime(rng).format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_date_time_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            match date_time(&mut rng) {
                Bson::DateTime(dt) => {
                    let millis = dt.timestamp_millis();
                    assert!(millis >= 0);
                    assert!(millis < LATEST_TIMESTAMP * 1000);
                }
                other => panic!("Expected DateTime, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_date_format() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = date(&mut rng);
        assert!(NaiveDate::parse_from_str(value.as_str().unwrap(), "%Y-%m-%d").is_ok());
    }
}
