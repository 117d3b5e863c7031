//! `xsd:dateTime` → `xsd:dateTimeStamp` normalization.

use chrono::{DateTime, NaiveDateTime, SecondsFormat};
use tracing::warn;

use crate::term::Literal;
use crate::vocab::xsd;

/// Re-type a timezone-bearing `xsd:dateTime` literal as `xsd:dateTimeStamp`.
///
/// Returns `None` when no conversion is possible: the literal lacks a
/// timezone, or it does not read as a date-time at all (which is also
/// logged). Callers keep using the original literal in that case.
pub fn xsd_datetime_to_xsd_datetimestamp(literal: &Literal) -> Option<Literal> {
    let datatype = literal.datatype.as_deref();
    if datatype != Some(xsd::DATE_TIME) && datatype != Some(xsd::DATE_TIME_STAMP) {
        warn!(lexical = %literal.lexical, ?datatype, "literal is not typed as a date-time");
        return None;
    }

    let lexical = literal.lexical.trim();
    match DateTime::parse_from_rfc3339(lexical) {
        Ok(instant) => Some(Literal::typed(
            instant.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            xsd::DATE_TIME_STAMP,
        )),
        Err(_) => {
            let naive = NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f");
            if naive.is_err() {
                warn!(lexical = %literal.lexical, "literal did not cast as a date-time");
            }
            None
        }
    }
}
