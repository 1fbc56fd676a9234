//! Entry categories and their value rules.
//!
//! Category names come from a closed set. Values are free text while
//! parsing; an optional rule pass checks them against enumerated domains
//! afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const CATEGORY_ASSISTED: &str = "ASSISTED";
pub const CATEGORY_BAND: &str = "BAND";
pub const CATEGORY_MODE: &str = "MODE";
pub const CATEGORY_OPERATOR: &str = "OPERATOR";
pub const CATEGORY_POWER: &str = "POWER";
pub const CATEGORY_STATION: &str = "STATION";
pub const CATEGORY_TIME: &str = "TIME";
pub const CATEGORY_TRANSMITTER: &str = "TRANSMITTER";
pub const CATEGORY_OVERLAY: &str = "OVERLAY";

/// Every category name recognized in a `CATEGORY-<NAME>:` tag.
pub const CATEGORY_NAMES: [&str; 9] = [
    CATEGORY_ASSISTED,
    CATEGORY_BAND,
    CATEGORY_MODE,
    CATEGORY_OPERATOR,
    CATEGORY_POWER,
    CATEGORY_STATION,
    CATEGORY_TIME,
    CATEGORY_TRANSMITTER,
    CATEGORY_OVERLAY,
];

/// Returns true if `name` is a recognized category name (exact, case-sensitive).
pub fn is_known_category(name: &str) -> bool {
    CATEGORY_NAMES.contains(&name)
}

/// A category name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub value: String,
}

/// A category value outside its rule's permissible set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CATEGORY-{field}: value {value:?} not in possible values {allowed:?}")]
pub struct RuleViolation {
    pub field: String,
    pub value: String,
    pub allowed: String,
}

/// A rule restricting the values allowed for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name this rule applies to.
    pub field: String,

    /// Allowed values. An empty list allows anything.
    #[serde(default)]
    pub permissible_values: Vec<String>,
}

impl CategoryRule {
    pub fn new(field: &str, permissible_values: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            permissible_values: permissible_values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Check a category against this rule. Categories for other fields pass.
    pub fn evaluate(&self, category: &Category) -> Result<(), RuleViolation> {
        if category.name != self.field || self.permissible_values.is_empty() {
            return Ok(());
        }

        if self.permissible_values.iter().any(|v| *v == category.value) {
            Ok(())
        } else {
            Err(RuleViolation {
                field: category.name.clone(),
                value: category.value.clone(),
                allowed: self.permissible_values.join(","),
            })
        }
    }
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.permissible_values.join(" | "))
    }
}

/// Check every category against every rule, returning the first violation.
pub fn validate_categories(
    categories: &[Category],
    rules: &[CategoryRule],
) -> Result<(), RuleViolation> {
    for category in categories {
        for rule in rules {
            rule.evaluate(category)?;
        }
    }
    Ok(())
}

/// The enumerated category domains from the Cabrillo 3.0 definition.
///
/// STATION, TIME and OVERLAY have no rule and are unconstrained.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(CATEGORY_ASSISTED, &["ASSISTED", "NON-ASSISTED"]),
        CategoryRule::new(
            CATEGORY_BAND,
            &[
                "ALL",
                "160M",
                "80M",
                "40M",
                "20M",
                "15M",
                "10M",
                "6M",
                "4M",
                "2M",
                "222",
                "432",
                "902",
                "1.2G",
                "2.3G",
                "3.4G",
                "5.7G",
                "10G",
                "24G",
                "47G",
                "75G",
                "123G",
                "134G",
                "241G",
                "Light",
                "VHF-3-BAND",
                "VHF-FM-ONLY",
            ],
        ),
        CategoryRule::new(
            CATEGORY_MODE,
            &["CW", "DIGI", "FM", "RTTY", "SSB", "MIXED"],
        ),
        CategoryRule::new(CATEGORY_OPERATOR, &["SINGLE-OP", "MULTI-OP", "CHECKLOG"]),
        CategoryRule::new(CATEGORY_POWER, &["HIGH", "LOW", "QRP"]),
        CategoryRule::new(
            CATEGORY_TRANSMITTER,
            &["ONE", "TWO", "LIMITED", "UNLIMITED", "SWL"],
        ),
    ]
}
