//! Delimited-text parser for the passenger dataset.
//!
//! The first line names the columns; every later non-blank line is split on
//! [`DELIMITER`] and mapped onto those names. Values are split naively, so a
//! delimiter inside a quoted value still splits it.

use std::collections::HashMap;

use tracing::debug;

use crate::error::PipelineError;
use crate::passenger::{Passenger, Port, Sex};

pub const DELIMITER: char = ',';

const REQUIRED_COLUMNS: &[&str] = &["Survived", "Pclass", "Sex"];

/// Column positions keyed by header name. A repeated name keeps its last position.
struct Header<'a> {
    index: HashMap<&'a str, usize>,
}

impl<'a> Header<'a> {
    fn parse(line: &'a str) -> Result<Self, PipelineError> {
        let index: HashMap<&str, usize> = line
            .split(DELIMITER)
            .map(|name| unquote(name.trim()))
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();

        for column in REQUIRED_COLUMNS {
            if !index.contains_key(column) {
                return Err(PipelineError::parse(format!(
                    "header is missing column {column}"
                )));
            }
        }

        Ok(Self { index })
    }

    /// Raw value of column `name` in `values`; empty when the column or value is absent.
    fn field<'v>(&self, values: &[&'v str], name: &str) -> &'v str {
        self.index
            .get(name)
            .and_then(|&i| values.get(i))
            .copied()
            .unwrap_or("")
    }

    fn passenger(&self, values: &[&str]) -> Passenger {
        Passenger {
            id: parse_int(self.field(values, "PassengerId")),
            survived: parse_int(self.field(values, "Survived")) == 1,
            pclass: parse_count(self.field(values, "Pclass")),
            name: self.field(values, "Name").to_string(),
            sex: Sex::from_code(self.field(values, "Sex")),
            age: parse_measure(self.field(values, "Age")),
            sib_sp: parse_count(self.field(values, "SibSp")),
            parch: parse_count(self.field(values, "Parch")),
            ticket: self.field(values, "Ticket").to_string(),
            fare: parse_measure(self.field(values, "Fare")),
            cabin: self.field(values, "Cabin").to_string(),
            embarked: Port::from_code(self.field(values, "Embarked")),
            ..Default::default()
        }
    }
}

/// Parses header-led delimited text into passengers, preserving row order.
///
/// # Errors
///
/// Returns [`PipelineError::ParseFailed`] when the header line is missing or
/// lacks one of the `Survived`, `Pclass` or `Sex` columns. Malformed numbers
/// are not errors: integers fall back to 0 and measures to `None`.
pub fn parse_passengers(text: &str) -> Result<Vec<Passenger>, PipelineError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();

    let header_line = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| PipelineError::parse("missing header line"))?;
    let header = Header::parse(header_line)?;

    let mut passengers = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(DELIMITER).map(unquote).collect();
        passengers.push(header.passenger(&values));
    }

    debug!(rows = passengers.len(), "Passenger rows parsed");
    Ok(passengers)
}

/// Strips one pair of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else if value == "\"" {
        ""
    } else {
        value
    }
}

/// Length of the longest numeric prefix of `s`: sign, digits and, when
/// `fractional` is set, a decimal point with more digits and an exponent.
fn numeric_prefix_len(s: &str, fractional: bool) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if fractional && end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            has_digits = true;
        }
        if has_digits {
            end = frac_end;
        }
    }
    if fractional && has_digits && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    if has_digits { end } else { 0 }
}

/// Lenient integer parse over the leading numeric prefix; 0 when there is none.
pub fn parse_int(raw: &str) -> i64 {
    let s = raw.trim();
    let len = numeric_prefix_len(s, false);
    s[..len].parse().unwrap_or(0)
}

/// Like [`parse_int`] but for counts, clamping negatives to 0.
fn parse_count(raw: &str) -> u32 {
    u32::try_from(parse_int(raw).max(0)).unwrap_or(u32::MAX)
}

/// Lenient parse of a non-negative measurement such as age or fare.
///
/// Returns `None` when no numeric prefix exists or the value is negative.
pub fn parse_measure(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let len = numeric_prefix_len(s, true);
    if len == 0 {
        return None;
    }
    s[..len]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
