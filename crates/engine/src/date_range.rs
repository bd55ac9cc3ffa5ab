//! Resolution of textual date bounds into a half-open UTC interval.

use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, Utc};

use crate::{EngineError, ResultEngine};

/// A half-open UTC instant interval `[start, end_exclusive)`.
///
/// The exclusive upper bound is midnight of the day *after* the requested end
/// date, so the whole end calendar day is included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end_exclusive: DateTime<Utc>,
}

impl DateRange {
    /// Resolves optional `yyyy-mm-dd` bounds against the current UTC day.
    ///
    /// A missing start defaults to one calendar month ago, a missing end to
    /// today. Unparsable text fails with [`EngineError::Validation`] before
    /// any store read happens.
    pub fn resolve(start_date: Option<&str>, end_date: Option<&str>) -> ResultEngine<Self> {
        Self::resolve_from(Utc::now().date_naive(), start_date, end_date)
    }

    fn resolve_from(
        today: NaiveDate,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ResultEngine<Self> {
        let start = match start_date {
            Some(text) => parse_date(text)?,
            None => today
                .checked_sub_months(Months::new(1))
                .ok_or_else(|| EngineError::Validation("start date out of range".to_string()))?,
        };
        let end = match end_date {
            Some(text) => parse_date(text)?,
            None => today,
        };
        let end_exclusive = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::Validation("end date out of range".to_string()))?;

        Ok(Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end_exclusive: end_exclusive.and_time(NaiveTime::MIN).and_utc(),
        })
    }
}

fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::Validation(format!("invalid date \"{value}\": expected yyyy-mm-dd"))
    })
}
