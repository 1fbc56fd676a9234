//! Line dispatcher for Cabrillo logs.
//!
//! The input is split into lines and each line into whitespace-separated
//! tokens. The first token is the tag; it is upper-cased, classified with
//! [`Tag::classify`] and the remaining tokens are routed to the matching
//! field parser. The first fatal error aborts the parse and is returned with
//! the 0-based index of its line.
//!
//! # Log Format
//!
//! ```text
//! START-OF-LOG: 3.0
//! CALLSIGN: AA1ZZZ
//! CATEGORY-POWER: LOW
//! QSO:  7250 PH 2000-10-26 0711 AA1ZZZ 59 05 WA6MIC 59 03
//! END-OF-LOG:
//! ```

use serde::Serialize;
use tracing::{debug, trace};

use crate::email::parse_email;
use crate::error::{FieldError, FieldResult, ParseError};
use crate::log::{Log, parse_yes_no};
use crate::offtime::OffTime;
use crate::qso::Qso;
use crate::tag::{KnownTag, Tag};

/// Options controlling how a log is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tokens per exchange in QSO and X-QSO lines.
    pub exchange_fields: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { exchange_fields: 1 }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exchange_fields(mut self, exchange_fields: usize) -> Self {
        self.exchange_fields = exchange_fields;
        self
    }
}

/// A non-fatal finding: a line whose tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 0-based line index.
    pub line: usize,
    /// The upper-cased tag token.
    pub tag: String,
    /// The full line as it appeared in the input.
    pub text: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: unknown tag {:?}", self.line, self.tag)
    }
}

/// A successfully parsed log together with its non-fatal diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLog {
    pub log: Log,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a log with default options.
///
/// # Example
///
/// ```
/// use cabrillo::parser::parse_log;
///
/// let text = "START-OF-LOG: 3.0\nCALLSIGN: AG6K\nCATEGORY-POWER: HIGH\nEND-OF-LOG:\n";
/// let parsed = parse_log(text).unwrap();
/// assert_eq!(parsed.log.callsign, "AG6K");
/// assert_eq!(parsed.log.category("POWER"), Some("HIGH"));
/// assert!(parsed.diagnostics.is_empty());
/// ```
pub fn parse_log(input: &str) -> Result<ParsedLog, ParseError> {
    parse_log_with(input, &ParseOptions::default())
}

/// Parse a log, stopping at the first fatal error.
pub fn parse_log_with(input: &str, options: &ParseOptions) -> Result<ParsedLog, ParseError> {
    let mut log = Log::new();
    let mut diagnostics = Vec::new();

    for (line_num, line) in input.split('\n').enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            trace!(line = line_num, "skipping line with fewer than two tokens");
            continue;
        }

        let tag = tokens[0].to_ascii_uppercase();
        let values = &tokens[1..];

        let result = match Tag::classify(&tag) {
            Tag::Known(known) => apply_known(&mut log, known, line, values, options),
            Tag::Category(name) => log.add_category(name, &values.join(" ")),
            Tag::Extension(name) => {
                log.add_extensible_field(name, &values.join(" "));
                Ok(())
            }
            Tag::Unrecognized => {
                debug!(line = line_num, tag = %tag, "unknown tag");
                diagnostics.push(Diagnostic {
                    line: line_num,
                    tag: tag.clone(),
                    text: line.trim_end_matches('\r').to_string(),
                });
                Ok(())
            }
        };
        result.map_err(|error| ParseError::new(line_num, error))?;
    }

    debug!(
        qsos = log.qsos.len(),
        x_qsos = log.x_qsos.len(),
        diagnostics = diagnostics.len(),
        "parsed log"
    );

    Ok(ParsedLog { log, diagnostics })
}

/// Route the values of a fixed tag into the log.
fn apply_known(
    log: &mut Log,
    tag: KnownTag,
    line: &str,
    values: &[&str],
    options: &ParseOptions,
) -> FieldResult<()> {
    let joined = || values.join(" ");
    // Single-token fields use the first value token.
    let first = values[0];

    match tag {
        KnownTag::Address => log.add_address_line(&joined())?,
        KnownTag::AddressCity => log.address.city = joined(),
        KnownTag::AddressCountry => log.address.country = joined(),
        KnownTag::AddressPostalCode => log.address.postal_code = joined(),
        KnownTag::AddressStateProvince => log.address.state_province = joined(),
        KnownTag::Callsign => log.callsign = first.to_string(),
        KnownTag::Certificate => log.certificate = parse_yes_no(first)?,
        KnownTag::ClaimedScore => {
            log.claimed_score = first
                .parse()
                .map_err(|e| FieldError::integer("claimed score", first, e))?
        }
        KnownTag::Club => log.club = joined(),
        KnownTag::Contest => log.contest = joined(),
        KnownTag::CreatedBy => log.created_by = joined(),
        KnownTag::Email => log.email = parse_email(&joined())?,
        KnownTag::EndOfLog => {}
        KnownTag::GridLocator => log.grid_locator = joined(),
        KnownTag::Location => log.location = joined(),
        KnownTag::Name => log.set_name(&joined())?,
        KnownTag::OffTime => log.off_times.push(OffTime::parse(&joined())?),
        KnownTag::Operators => log.add_operators(&joined()),
        KnownTag::Qso => log.qsos.push(Qso::parse(line, options.exchange_fields)?),
        KnownTag::Soapbox => log.add_soapbox(&joined()),
        KnownTag::StartOfLog => log.version = first.to_string(),
        KnownTag::XQso => log.x_qsos.push(Qso::parse(line, options.exchange_fields)?),
    }

    Ok(())
}
