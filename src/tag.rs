//! Line tag classification.
//!
//! Every non-blank line starts with a tag token such as `CALLSIGN:`. Tags are
//! matched case-insensitively; callers pass the tag already upper-cased.

/// Tags with a fixed spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownTag {
    Address,
    AddressCity,
    AddressCountry,
    AddressPostalCode,
    AddressStateProvince,
    Callsign,
    Certificate,
    ClaimedScore,
    Club,
    Contest,
    CreatedBy,
    Email,
    EndOfLog,
    GridLocator,
    Location,
    Name,
    OffTime,
    Operators,
    Qso,
    Soapbox,
    StartOfLog,
    XQso,
}

impl KnownTag {
    /// Look up an upper-cased tag token, colon included.
    pub fn from_token(token: &str) -> Option<Self> {
        let tag = match token {
            "ADDRESS:" => KnownTag::Address,
            "ADDRESS-CITY:" => KnownTag::AddressCity,
            "ADDRESS-COUNTRY:" => KnownTag::AddressCountry,
            "ADDRESS-POSTALCODE:" => KnownTag::AddressPostalCode,
            "ADDRESS-STATE-PROVINCE:" => KnownTag::AddressStateProvince,
            "CALLSIGN:" => KnownTag::Callsign,
            "CERTIFICATE:" => KnownTag::Certificate,
            "CLAIMED-SCORE:" => KnownTag::ClaimedScore,
            "CLUB:" => KnownTag::Club,
            "CONTEST:" => KnownTag::Contest,
            "CREATED-BY:" => KnownTag::CreatedBy,
            "EMAIL:" => KnownTag::Email,
            "END-OF-LOG:" => KnownTag::EndOfLog,
            "GRID-LOCATOR:" => KnownTag::GridLocator,
            "LOCATION:" => KnownTag::Location,
            "NAME:" => KnownTag::Name,
            "OFFTIME:" => KnownTag::OffTime,
            "OPERATORS:" => KnownTag::Operators,
            "QSO:" => KnownTag::Qso,
            "SOAPBOX:" => KnownTag::Soapbox,
            "START-OF-LOG:" => KnownTag::StartOfLog,
            "X-QSO:" => KnownTag::XQso,
            _ => return None,
        };
        Some(tag)
    }
}

/// The result of classifying a tag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    Known(KnownTag),
    /// `CATEGORY-<NAME>:` carrying `NAME`.
    Category(&'a str),
    /// `X-<NAME>` carrying `NAME`, with any trailing colon removed.
    Extension(&'a str),
    Unrecognized,
}

impl<'a> Tag<'a> {
    /// Classify an upper-cased tag token.
    ///
    /// ```
    /// use cabrillo::tag::{KnownTag, Tag};
    ///
    /// assert_eq!(Tag::classify("QSO:"), Tag::Known(KnownTag::Qso));
    /// assert_eq!(Tag::classify("CATEGORY-POWER:"), Tag::Category("POWER"));
    /// assert_eq!(Tag::classify("X-COMMENT:"), Tag::Extension("COMMENT"));
    /// ```
    pub fn classify(token: &'a str) -> Self {
        if let Some(known) = KnownTag::from_token(token) {
            return Tag::Known(known);
        }

        if let Some(name) = token
            .strip_prefix("CATEGORY-")
            .and_then(|rest| rest.strip_suffix(':'))
        {
            return Tag::Category(name);
        }

        if let Some(rest) = token.strip_prefix("X-") {
            return Tag::Extension(rest.strip_suffix(':').unwrap_or(rest));
        }

        Tag::Unrecognized
    }
}
