//! Minute-precision timestamps as written in QSO and OFFTIME lines.
//!
//! Dates are `yyyy-mm-dd` and times are four digit UTC `hhmm`, always as two
//! separate whitespace-delimited tokens.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nom::{
    IResult, Parser,
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res},
};
use thiserror::Error;

/// Rendering format matching the on-disk `date time` token pair.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H%M";

/// Errors produced while parsing a date or time token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("invalid date {0:?} (expected yyyy-mm-dd)")]
    InvalidDate(String),

    #[error("invalid time {0:?} (expected hhmm)")]
    InvalidTime(String),
}

/// Parse exactly `n` ASCII digits.
fn fixed_digits(n: usize) -> impl Fn(&str) -> IResult<&str, u32> {
    move |input: &str| {
        map_res(take_while_m_n(n, n, |c: char| c.is_ascii_digit()), |s: &str| {
            s.parse::<u32>()
        })
        .parse(input)
    }
}

fn parse_date_token(input: &str) -> IResult<&str, NaiveDate> {
    map_res(
        (
            fixed_digits(4),
            char('-'),
            fixed_digits(2),
            char('-'),
            fixed_digits(2),
        ),
        |(year, _, month, _, day): (u32, char, u32, char, u32)| {
            NaiveDate::from_ymd_opt(year as i32, month, day).ok_or("Invalid date values")
        },
    )
    .parse(input)
}

fn parse_time_token(input: &str) -> IResult<&str, NaiveTime> {
    map_res((fixed_digits(2), fixed_digits(2)), |(hour, min): (u32, u32)| {
        NaiveTime::from_hms_opt(hour, min, 0).ok_or("Invalid time values")
    })
    .parse(input)
}

/// Parse a `yyyy-mm-dd` date token.
pub fn parse_date(token: &str) -> Result<NaiveDate, TimestampError> {
    all_consuming(parse_date_token)
        .parse(token)
        .map(|(_, date)| date)
        .map_err(|_| TimestampError::InvalidDate(token.to_string()))
}

/// Parse an `hhmm` time token.
pub fn parse_time(token: &str) -> Result<NaiveTime, TimestampError> {
    all_consuming(parse_time_token)
        .parse(token)
        .map(|(_, time)| time)
        .map_err(|_| TimestampError::InvalidTime(token.to_string()))
}

/// Combine a date token and a time token into one timestamp.
///
/// ```
/// use cabrillo::timestamp::parse_timestamp;
///
/// let ts = parse_timestamp("2017-11-25", "2134").unwrap();
/// assert_eq!(ts.format("%Y%m%d%H%M").to_string(), "201711252134");
/// ```
pub fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, TimestampError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2002-03-22", "0743").unwrap();
        assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), "2002-03-22 0743");
    }

    #[test]
    fn test_midnight() {
        let ts = parse_timestamp("2000-01-01", "0000").unwrap();
        assert_eq!(ts.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_dates() {
        for date in ["2002-3-22", "02-03-22", "2002/03/22", "2002-02-30", "2002-03-22x", ""] {
            assert_eq!(
                parse_date(date),
                Err(TimestampError::InvalidDate(date.to_string())),
                "date {:?} should be rejected",
                date
            );
        }
    }

    #[test]
    fn test_invalid_times() {
        for time in ["300", "03000", "2400", "0360", "12:00", "ab12"] {
            assert_eq!(
                parse_time(time),
                Err(TimestampError::InvalidTime(time.to_string())),
                "time {:?} should be rejected",
                time
            );
        }
    }

    #[test]
    fn test_date_error_wins_over_time_error() {
        assert!(matches!(
            parse_timestamp("bad", "bad"),
            Err(TimestampError::InvalidDate(_))
        ));
    }
}
