//! Signal reports.
//!
//! A report is two or three ASCII digits: readability, strength and an
//! optional tone digit (`59` for phone, `599` for CW).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which digit of a report failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RstDigit {
    Readability,
    Strength,
    Tone,
}

impl fmt::Display for RstDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RstDigit::Readability => write!(f, "readability"),
            RstDigit::Strength => write!(f, "strength"),
            RstDigit::Tone => write!(f, "tone"),
        }
    }
}

/// Errors produced by [`Rst::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RstError {
    #[error("invalid RST report length {0} (expected 2 or 3 digits)")]
    InvalidLength(usize),

    #[error("parsing {digit} digit {found:?}")]
    InvalidDigit { digit: RstDigit, found: char },
}

/// A signal report. A `tone` of 0 means the report carried no tone digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rst {
    pub readability: u8,
    pub strength: u8,
    pub tone: u8,
}

fn report_digit(digit: RstDigit, c: char) -> Result<u8, RstError> {
    if c.is_ascii_digit() {
        Ok(c as u8 - b'0')
    } else {
        Err(RstError::InvalidDigit { digit, found: c })
    }
}

impl Rst {
    /// Parse a 2 or 3 digit report such as `"59"` or `"599"`.
    ///
    /// # Example
    ///
    /// ```
    /// use cabrillo::rst::Rst;
    ///
    /// let rst = Rst::parse("579").unwrap();
    /// assert_eq!(rst.strength, 7);
    /// assert_eq!(rst.to_string(), "579");
    /// ```
    pub fn parse(report: &str) -> Result<Self, RstError> {
        let chars: Vec<char> = report.chars().collect();
        if !(2..=3).contains(&chars.len()) {
            return Err(RstError::InvalidLength(chars.len()));
        }

        let readability = report_digit(RstDigit::Readability, chars[0])?;
        let strength = report_digit(RstDigit::Strength, chars[1])?;
        let tone = match chars.get(2) {
            Some(&c) => report_digit(RstDigit::Tone, c)?,
            None => 0,
        };

        Ok(Rst {
            readability,
            strength,
            tone,
        })
    }
}

impl FromStr for Rst {
    type Err = RstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rst::parse(s)
    }
}

impl fmt::Display for Rst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.readability, self.strength)?;
        // A literal "0" tone digit renders the same as no tone at all.
        if self.tone > 0 {
            write!(f, "{}", self.tone)?;
        }
        Ok(())
    }
}
