//! OFFTIME periods.
//!
//! ```text
//! OFFTIME: 2002-03-22 0300 2002-03-22 0743
//!          yyyy-mm-dd nnnn yyyy-mm-dd nnnn
//!          -----begin----- ------end------
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{FieldError, FieldResult};
use crate::timestamp::parse_timestamp;

/// A period during which the station was not operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffTime {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl OffTime {
    /// Parse the value part of an OFFTIME line.
    ///
    /// ```
    /// use cabrillo::offtime::OffTime;
    ///
    /// let ot = OffTime::parse("2002-03-22 0300 2002-03-22 0743").unwrap();
    /// assert_eq!(ot.end.format("%H:%M").to_string(), "07:43");
    /// ```
    pub fn parse(text: &str) -> FieldResult<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [begin_date, begin_time, end_date, end_time] = tokens[..] else {
            return Err(FieldError::FieldCount {
                record: "offtime",
                actual: tokens.len(),
                expected: "4".to_string(),
            });
        };

        let begin = parse_timestamp(begin_date, begin_time).map_err(|source| {
            FieldError::Timestamp {
                field: "begin time",
                source,
            }
        })?;
        let end = parse_timestamp(end_date, end_time).map_err(|source| FieldError::Timestamp {
            field: "end time",
            source,
        })?;

        Ok(OffTime { begin, end })
    }

    /// Length of the off period in minutes. Negative when `end` precedes `begin`.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.begin).num_minutes()
    }
}
