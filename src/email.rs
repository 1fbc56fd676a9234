//! Mail address parsing for the EMAIL field.
//!
//! Accepts a single RFC 5322 mailbox, either a bare `local@domain` or a
//! `Display Name <local@domain>` form. Only the `local@domain` part is kept.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{anychar, char, multispace0, multispace1, none_of},
    combinator::{all_consuming, map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, terminated},
};

use crate::error::{FieldError, FieldResult};

/// RFC 5322 `atext`.
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn dot_atom(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), take_while1(is_atext))).parse(input)
}

fn quoted_string(input: &str) -> IResult<&str, &str> {
    recognize((
        char('"'),
        many0(alt((preceded(char('\\'), anychar), none_of("\"\\")))),
        char('"'),
    ))
    .parse(input)
}

fn domain_literal(input: &str) -> IResult<&str, &str> {
    recognize((
        char('['),
        take_while(|c: char| c != '[' && c != ']' && c != '\\' && !c.is_whitespace()),
        char(']'),
    ))
    .parse(input)
}

fn addr_spec(input: &str) -> IResult<&str, String> {
    map(
        (
            alt((dot_atom, quoted_string)),
            char('@'),
            alt((dot_atom, domain_literal)),
        ),
        |(local, _, domain)| format!("{}@{}", local, domain),
    )
    .parse(input)
}

/// Display name words. Periods are tolerated as in obsolete phrases ("J. Doe")
/// and non-ASCII letters as in RFC 6532 ("José").
fn phrase(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(
        multispace1,
        alt((
            take_while1(|c: char| {
                is_atext(c) || c == '.' || (!c.is_ascii() && !c.is_whitespace())
            }),
            quoted_string,
        )),
    )
    .parse(input)
}

fn name_addr(input: &str) -> IResult<&str, String> {
    preceded(
        opt(terminated(phrase, multispace0)),
        delimited(char('<'), addr_spec, char('>')),
    )
    .parse(input)
}

fn mailbox(input: &str) -> IResult<&str, String> {
    delimited(multispace0, alt((name_addr, addr_spec)), multispace0).parse(input)
}

/// Parse a mailbox and return the normalized `local@domain` address.
///
/// ```
/// use cabrillo::email::parse_email;
///
/// assert_eq!(parse_email("John Doe <jd@example.com>").unwrap(), "jd@example.com");
/// assert!(parse_email("not an address").is_err());
/// ```
pub fn parse_email(text: &str) -> FieldResult<String> {
    all_consuming(mailbox)
        .parse(text)
        .map(|(_, address)| address)
        .map_err(|_| FieldError::InvalidEmail(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bare_address() {
        assert_eq!(parse_email("ag6k@example.com").unwrap(), "ag6k@example.com");
        assert_eq!(
            parse_email("  first.last+contest@mail.example.org ").unwrap(),
            "first.last+contest@mail.example.org"
        );
    }

    #[test]
    fn test_display_name_forms() {
        assert_eq!(
            parse_email("John Doe <john@example.com>").unwrap(),
            "john@example.com"
        );
        assert_eq!(
            parse_email("\"Doe, John\" <john@example.com>").unwrap(),
            "john@example.com"
        );
        assert_eq!(parse_email("J. Doe <jd@example.com>").unwrap(), "jd@example.com");
        assert_eq!(parse_email("<jd@example.com>").unwrap(), "jd@example.com");
        assert_eq!(
            parse_email("José Pérez <jp@example.com>").unwrap(),
            "jp@example.com"
        );
        assert_eq!(
            parse_email("\"Jürgen Müller\" <jm@example.de>").unwrap(),
            "jm@example.de"
        );
    }

    #[test]
    fn test_quoted_local_and_literal_domain() {
        assert_eq!(
            parse_email("\"john doe\"@example.com").unwrap(),
            "\"john doe\"@example.com"
        );
        assert_eq!(parse_email("op@[192.0.2.1]").unwrap(), "op@[192.0.2.1]");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "nobody",
            "@example.com",
            "user@",
            "user@@example.com",
            "user.@example.com",
            "a@b c@d",
            "John <john@example.com",
            "john@example.com extra",
            "josé@example.com",
        ] {
            let err = parse_email(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEmail, "input {:?}", bad);
        }
    }
}
