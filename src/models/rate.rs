use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::utils::error::RateError;

/// A calendar day that a rate document can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDate(NaiveDate);

impl RateDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, RateError> {
        if !(1..=9999).contains(&year) {
            return Err(RateError::InvalidDate(format!("year {} must be between 1 and 9999", year)));
        }
        if !(1..=12).contains(&month) {
            return Err(RateError::InvalidDate(format!("month {} must be between 1 and 12", month)));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                RateError::InvalidDate(format!("day {} does not exist in {}-{:02}", day, year, month))
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for RateDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[derive(Serialize)]
pub struct RateQuote {
    pub currency: String,
    pub date: String,
    pub rate: f64,
}

#[derive(Serialize)]
pub struct CrossRateQuote {
    pub from: String,
    pub to: String,
    pub date: String,
    pub rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_real_calendar_days() {
        let date = RateDate::new(2010, 6, 25).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2010, 6, 25));
        assert_eq!(date.to_string(), "2010-06-25");
        assert!(RateDate::new(2012, 2, 29).is_ok());
    }

    #[test]
    fn rejects_out_of_range_parts() {
        for (y, m, d) in [(2010, 0, 1), (2010, 13, 1), (2010, 6, 0), (2010, 6, 31), (2011, 2, 29), (0, 1, 1), (10000, 1, 1)] {
            let err = RateDate::new(y, m, d).unwrap_err();
            assert!(matches!(err, RateError::InvalidDate(_)), "{y}-{m}-{d} gave {err}");
        }
    }
}
