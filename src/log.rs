//! The parsed log aggregate and its field collectors.
//!
//! Collectors enforce the per-field bounds (address and name lengths,
//! address line count) so the dispatcher only has to route values.

use serde::Serialize;

use crate::category::{
    Category, CategoryRule, RuleViolation, is_known_category, validate_categories,
};
use crate::error::{FieldError, FieldResult};
use crate::offtime::OffTime;
use crate::qso::Qso;

/// Maximum number of ADDRESS lines in a log.
pub const MAX_ADDRESS_LINES: usize = 6;
/// Maximum length of one ADDRESS line, in characters.
pub const MAX_ADDRESS_LENGTH: usize = 45;
/// Maximum length of the NAME field, in characters.
pub const MAX_NAME_LENGTH: usize = 75;

/// Postal address of the entrant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Address {
    /// Street address lines, at most [`MAX_ADDRESS_LINES`].
    pub lines: Vec<String>,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    pub country: String,
}

/// A contest-defined `X-` field. Each value is one occurrence of the tag,
/// in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensibleField {
    pub name: String,
    pub values: Vec<String>,
}

/// A complete contest log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Log {
    pub address: Address,
    pub callsign: String,
    pub categories: Vec<Category>,
    /// Whether a paper certificate is requested. Defaults to true.
    pub certificate: bool,
    pub claimed_score: i64,
    pub club: String,
    pub contest: String,
    pub created_by: String,
    pub email: String,
    pub extensible_fields: Vec<ExtensibleField>,
    pub grid_locator: String,
    pub location: String,
    pub name: String,
    pub off_times: Vec<OffTime>,
    pub operators: Vec<String>,
    pub qsos: Vec<Qso>,
    pub soapbox: Vec<String>,
    /// Format version from START-OF-LOG.
    pub version: String,
    /// Cross-band/cross-mode contacts (X-QSO lines).
    pub x_qsos: Vec<Qso>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            address: Address::default(),
            callsign: String::new(),
            categories: Vec::new(),
            certificate: true,
            claimed_score: 0,
            club: String::new(),
            contest: String::new(),
            created_by: String::new(),
            email: String::new(),
            extensible_fields: Vec::new(),
            grid_locator: String::new(),
            location: String::new(),
            name: String::new(),
            off_times: Vec::new(),
            operators: Vec::new(),
            qsos: Vec::new(),
            soapbox: Vec::new(),
            version: String::new(),
            x_qsos: Vec::new(),
        }
    }
}

impl Log {
    /// Create an empty log with the certificate flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of a category, or `None` if it was never set.
    pub fn category(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Set a category. A repeated name overwrites the earlier value in place.
    ///
    /// Fails without touching the log if `name` is not a recognized category.
    pub fn add_category(&mut self, name: &str, value: &str) -> FieldResult<()> {
        if !is_known_category(name) {
            return Err(FieldError::UnknownCategory(name.to_string()));
        }

        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.categories.push(Category {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    /// All values recorded for an extensible field.
    pub fn extended_field(&self, name: &str) -> Option<&[String]> {
        self.extensible_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.values.as_slice())
    }

    /// Append one occurrence of an extensible field.
    pub fn add_extensible_field(&mut self, name: &str, value: &str) {
        match self.extensible_fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.values.push(value.to_string()),
            None => self.extensible_fields.push(ExtensibleField {
                name: name.to_string(),
                values: vec![value.to_string()],
            }),
        }
    }

    /// Append a street address line.
    pub fn add_address_line(&mut self, line: &str) -> FieldResult<()> {
        if line.chars().count() > MAX_ADDRESS_LENGTH {
            return Err(FieldError::TooLong {
                field: "address",
                max: MAX_ADDRESS_LENGTH,
            });
        }
        if self.address.lines.len() >= MAX_ADDRESS_LINES {
            return Err(FieldError::TooManyLines {
                field: "ADDRESS",
                max: MAX_ADDRESS_LINES,
            });
        }
        self.address.lines.push(line.to_string());
        Ok(())
    }

    pub fn set_name(&mut self, name: &str) -> FieldResult<()> {
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(FieldError::TooLong {
                field: "name",
                max: MAX_NAME_LENGTH,
            });
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Add operators from a comma and/or space delimited list.
    pub fn add_operators(&mut self, text: &str) {
        self.operators.extend(
            text.split(|c: char| c == ',' || c.is_whitespace())
                .map(str::trim)
                .filter(|op| !op.is_empty())
                .map(str::to_string),
        );
    }

    pub fn add_soapbox(&mut self, line: &str) {
        self.soapbox.push(line.to_string());
    }

    /// Check the categories against a rule set. Not run during parsing.
    pub fn validate_categories(&self, rules: &[CategoryRule]) -> Result<(), RuleViolation> {
        validate_categories(&self.categories, rules)
    }
}

/// Parse a YES/NO flag, ignoring case and surrounding whitespace.
pub fn parse_yes_no(text: &str) -> FieldResult<bool> {
    let upper = text.trim().to_ascii_uppercase();
    match upper.as_str() {
        "YES" => Ok(true),
        "NO" => Ok(false),
        _ => Err(FieldError::YesNo(upper)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CATEGORY_ASSISTED, CATEGORY_POWER, default_rules};
    use crate::error::ErrorKind;

    #[test]
    fn test_new_log_defaults() {
        let log = Log::new();
        assert!(log.certificate);
        assert!(log.categories.is_empty());
        assert_eq!(log.claimed_score, 0);
    }

    #[test]
    fn test_category_last_write_wins_in_place() {
        let mut log = Log::new();
        log.add_category(CATEGORY_ASSISTED, "NON-ASSISTED").unwrap();
        log.add_category(CATEGORY_POWER, "LOW").unwrap();
        log.add_category(CATEGORY_ASSISTED, "ASSISTED").unwrap();

        assert_eq!(log.categories.len(), 2);
        assert_eq!(log.categories[0].name, CATEGORY_ASSISTED);
        assert_eq!(log.category(CATEGORY_ASSISTED), Some("ASSISTED"));
        assert_eq!(log.category(CATEGORY_POWER), Some("LOW"));
    }

    #[test]
    fn test_unknown_category_leaves_log_untouched() {
        let mut log = Log::new();
        let err = log.add_category("COLOR", "BLUE").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCategory);
        assert!(log.categories.is_empty());
        assert_eq!(log.category("COLOR"), None);
    }

    #[test]
    fn test_extensible_fields_accumulate() {
        let mut log = Log::new();
        log.add_extensible_field("FIELD1", "line 1");
        log.add_extensible_field("FIELD2", "other");
        log.add_extensible_field("FIELD1", "line 2");

        assert_eq!(
            log.extended_field("FIELD1"),
            Some(&["line 1".to_string(), "line 2".to_string()][..])
        );
        assert_eq!(log.extensible_fields.len(), 2);
        assert_eq!(log.extended_field("FIELD3"), None);
    }

    #[test]
    fn test_address_line_length() {
        let mut log = Log::new();
        assert!(log.add_address_line(&"a".repeat(45)).is_ok());
        let err = log.add_address_line(&"a".repeat(46)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Length);
        assert_eq!(log.address.lines.len(), 1);
    }

    #[test]
    fn test_address_line_count() {
        let mut log = Log::new();
        for i in 0..6 {
            log.add_address_line(&format!("line {}", i)).unwrap();
        }
        let err = log.add_address_line("line 7").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cardinality);
        assert_eq!(log.address.lines.len(), 6);
    }

    #[test]
    fn test_name_length() {
        let mut log = Log::new();
        assert!(log.set_name(&"n".repeat(75)).is_ok());
        assert_eq!(
            log.set_name(&"n".repeat(76)).unwrap_err().kind(),
            ErrorKind::Length
        );
        // Characters, not bytes.
        assert!(log.set_name(&"é".repeat(75)).is_ok());
    }

    #[test]
    fn test_operators_split_and_accumulate() {
        let mut log = Log::new();
        log.add_operators("AAAA, AAAB,AAAC");
        log.add_operators("@ZZZX   ZZZY ,, ");
        assert_eq!(log.operators, ["AAAA", "AAAB", "AAAC", "@ZZZX", "ZZZY"]);
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("YES").unwrap());
        assert!(parse_yes_no(" yes ").unwrap());
        assert!(!parse_yes_no("No").unwrap());
        assert_eq!(parse_yes_no("maybe").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_validate_categories_with_defaults() {
        let mut log = Log::new();
        log.add_category(CATEGORY_POWER, "MEDIUM").unwrap();
        assert!(log.validate_categories(&default_rules()).is_err());

        log.add_category(CATEGORY_POWER, "HIGH").unwrap();
        assert!(log.validate_categories(&default_rules()).is_ok());
    }
}
