//! Cabrillo - a parser and validator for Cabrillo contest log files.
//!
//! This crate provides:
//! - A line dispatcher that turns Cabrillo text into a structured [`Log`]
//! - Field parsers for QSO lines, signal reports and OFFTIME periods
//! - An optional category value rule pass
//!
//! # Example
//!
//! ```rust
//! use cabrillo::{default_rules, parse_log};
//!
//! let text = "\
//! START-OF-LOG: 3.0
//! CALLSIGN: K1IR
//! CATEGORY-POWER: HIGH
//! QSO:  7030 CW 2017-11-25 2134 K1IR          599 5      IQ3R          599 15
//! END-OF-LOG:
//! ";
//! let parsed = parse_log(text).expect("Failed to parse log");
//! assert_eq!(parsed.log.qsos.len(), 1);
//! assert!(parsed.log.validate_categories(&default_rules()).is_ok());
//! ```

pub mod category;
pub mod config;
pub mod email;
pub mod error;
pub mod log;
pub mod offtime;
pub mod parser;
pub mod qso;
pub mod rst;
pub mod tag;
pub mod timestamp;

pub use category::{Category, CategoryRule, RuleViolation, default_rules, validate_categories};
pub use config::Config;
pub use error::{ErrorKind, FieldError, ParseError};
pub use log::{Address, ExtensibleField, Log};
pub use offtime::OffTime;
pub use parser::{Diagnostic, ParseOptions, ParsedLog, parse_log, parse_log_with};
pub use qso::{Info, Qso};
pub use rst::{Rst, RstError};
