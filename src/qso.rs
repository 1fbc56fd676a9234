//! QSO (contact) records.
//!
//! A QSO line has a fixed prefix followed by two variable-width exchange
//! segments. With an exchange of `k` tokens the layout is:
//!
//! ```text
//! QSO: freq mo date       time call          rst exch(k)  call          rst exch(k)  [t]
//! QSO:  7030 CW 2017-11-25 2134 K1IR          599 5        IQ3R          599 15
//! ```
//!
//! giving `9 + 2k` tokens, or `10 + 2k` when the trailing transmitter
//! number is present.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{FieldError, FieldResult};
use crate::rst::Rst;
use crate::timestamp::parse_timestamp;

/// One side of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Info {
    pub callsign: String,
    pub signal_report: Rst,
    /// Exchange tokens joined with single spaces.
    pub exchange: String,
}

/// A single logged contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Qso {
    /// Frequency token as written. Units vary by band (kHz below 30 MHz,
    /// band designators such as `50` or `1.2G` above).
    pub frequency: String,
    pub mode: String,
    pub timestamp: NaiveDateTime,
    pub sent: Info,
    pub received: Info,
    /// Transmitter number for multi-transmitter entries; 0 when absent.
    pub transmitter: i32,
}

/// Index of the first sent-exchange token.
const SENT_EXCHANGE: usize = 7;

impl Qso {
    /// Parse a full QSO or X-QSO line, tag included.
    ///
    /// `exchange_fields` is the number of whitespace-delimited tokens in
    /// each side's exchange: 1 for a bare serial number, 3 for
    /// "name serial QTH", and so on.
    ///
    /// ```
    /// use cabrillo::qso::Qso;
    ///
    /// let qso = Qso::parse("QSO: 14025 CW 2017-11-25 2134 K1IR 599 5 IQ3R 599 15", 1).unwrap();
    /// assert_eq!(qso.received.callsign, "IQ3R");
    /// assert_eq!(qso.transmitter, 0);
    /// ```
    pub fn parse(line: &str, exchange_fields: usize) -> FieldResult<Self> {
        if exchange_fields == 0 {
            return Err(FieldError::EmptyExchange);
        }

        let k = exchange_fields;
        let (fields_min, fields_max) = match k.checked_mul(2).and_then(|n| n.checked_add(10)) {
            Some(max) => (max - 1, max),
            None => return Err(FieldError::ExchangeTooWide(k)),
        };
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() != fields_min && fields.len() != fields_max {
            return Err(FieldError::FieldCount {
                record: "QSO",
                actual: fields.len(),
                expected: format!("{} or {}", fields_min, fields_max),
            });
        }

        let rx_call_at = SENT_EXCHANGE + k;
        let rx_rst_at = rx_call_at + 1;
        let rx_exchange_at = rx_rst_at + 1;

        let timestamp = parse_timestamp(fields[3], fields[4])
            .map_err(|source| FieldError::Timestamp {
                field: "QSO timestamp",
                source,
            })?;

        let sent_rst = Rst::parse(fields[6]).map_err(|source| FieldError::Rst {
            field: "sent RST",
            source,
        })?;
        let received_rst = Rst::parse(fields[rx_rst_at]).map_err(|source| FieldError::Rst {
            field: "received RST",
            source,
        })?;

        let transmitter = match fields.get(fields_max - 1) {
            Some(token) => token
                .parse::<i32>()
                .map_err(|e| FieldError::integer("transmitter", token, e))?,
            None => 0,
        };

        Ok(Qso {
            frequency: fields[1].to_string(),
            mode: fields[2].to_string(),
            timestamp,
            sent: Info {
                callsign: fields[5].to_string(),
                signal_report: sent_rst,
                exchange: fields[SENT_EXCHANGE..SENT_EXCHANGE + k].join(" "),
            },
            received: Info {
                callsign: fields[rx_call_at].to_string(),
                signal_report: received_rst,
                exchange: fields[rx_exchange_at..rx_exchange_at + k].join(" "),
            },
            transmitter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_basic_qso() {
        let qso = Qso::parse(
            "QSO:  7030 CW 2017-11-25 2134 K1IR          599 5      IQ3R          599 15\n",
            1,
        )
        .expect("Should parse successfully");

        assert_eq!(qso.frequency, "7030");
        assert_eq!(qso.mode, "CW");
        assert_eq!(qso.timestamp.format("%Y%m%d%H%M").to_string(), "201711252134");

        assert_eq!(qso.sent.callsign, "K1IR");
        assert_eq!(qso.sent.signal_report.to_string(), "599");
        assert_eq!(qso.sent.exchange, "5");

        assert_eq!(qso.received.callsign, "IQ3R");
        assert_eq!(qso.received.signal_report.to_string(), "599");
        assert_eq!(qso.received.exchange, "15");

        assert_eq!(qso.transmitter, 0);
    }

    #[test]
    fn test_parse_with_transmitter() {
        let qso = Qso::parse(
            "QSO:  7250 PH 2000-10-26 0711 AA1ZZZ          59  05     WA6MIC        59  03     1",
            1,
        )
        .expect("Should parse successfully");

        assert_eq!(qso.frequency, "7250");
        assert_eq!(qso.mode, "PH");
        assert_eq!(qso.sent.callsign, "AA1ZZZ");
        assert_eq!(qso.sent.signal_report.to_string(), "59");
        assert_eq!(qso.sent.exchange, "05");
        assert_eq!(qso.received.callsign, "WA6MIC");
        assert_eq!(qso.received.exchange, "03");
        assert_eq!(qso.transmitter, 1);
    }

    #[test]
    fn test_parse_multi_token_exchange() {
        let qso = Qso::parse(
            "QSO: 3799 PH 1999-03-06 0711 HC8N 59 001 JOE NY W1AW 59 002 BOB CT 0",
            3,
        )
        .expect("Should parse successfully");

        assert_eq!(qso.sent.exchange, "001 JOE NY");
        assert_eq!(qso.received.callsign, "W1AW");
        assert_eq!(qso.received.signal_report.to_string(), "59");
        assert_eq!(qso.received.exchange, "002 BOB CT");
        assert_eq!(qso.transmitter, 0);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = Qso::parse("QSO: 7030 CW 2017-11-25 2134 K1IR 599 5", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(
            err,
            FieldError::FieldCount {
                record: "QSO",
                actual: 8,
                expected: "11 or 12".to_string(),
            }
        );
        let message = err.to_string();
        assert!(message.contains("got 8"));
        assert!(message.contains("11 or 12"));
    }

    #[test]
    fn test_zero_exchange_width_rejected() {
        let err = Qso::parse("QSO: 7030 CW 2017-11-25 2134 K1IR 599 IQ3R 599", 0).unwrap_err();
        assert_eq!(err, FieldError::EmptyExchange);
    }

    #[test]
    fn test_bad_sub_fields_name_the_field() {
        let bad_rst = Qso::parse("QSO: 7030 CW 2017-11-25 2134 K1IR 599 5 IQ3R 5x9 15", 1)
            .unwrap_err();
        assert_eq!(bad_rst.kind(), ErrorKind::Format);
        assert!(bad_rst.to_string().starts_with("parsing received RST"));

        let bad_date = Qso::parse("QSO: 7030 CW 2017-13-25 2134 K1IR 599 5 IQ3R 599 15", 1)
            .unwrap_err();
        assert!(bad_date.to_string().starts_with("parsing QSO timestamp"));

        let bad_tx = Qso::parse("QSO: 7030 CW 2017-11-25 2134 K1IR 599 5 IQ3R 599 15 A", 1)
            .unwrap_err();
        assert!(matches!(
            bad_tx,
            FieldError::Integer {
                field: "transmitter",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_transmitter() {
        let qso = Qso::parse("QSO: 7030 CW 2017-11-25 2134 K1IR 599 5 IQ3R 599 15 -1", 1)
            .expect("Should parse successfully");
        assert_eq!(qso.transmitter, -1);
    }

    #[test]
    fn test_huge_exchange_width_rejected() {
        let line = "QSO: 7030 CW 2017-11-25 2134 K1IR 599 IQ3R";
        for width in [usize::MAX, usize::MAX / 2, usize::MAX / 2 - 4] {
            let err = Qso::parse(line, width).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Structural, "width {}", width);
        }
        assert_eq!(
            Qso::parse(line, usize::MAX / 2).unwrap_err(),
            FieldError::ExchangeTooWide(usize::MAX / 2)
        );
    }
}
