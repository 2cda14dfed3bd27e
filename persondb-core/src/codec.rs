//! The line format of the database file.
//!
//! Every record takes one line of [`FIELD_COUNT`] whitespace-separated tokens:
//!
//! ```text
//! lastName firstName state zipCode birthYear birthMonth birthDay password balance ssn
//! ```
//!
//! Tokens after the tenth are ignored. Records are written by the `Display` impl of [`Person`].

use std::str::FromStr;

use thiserror::Error;

use crate::person::Person;

/// The number of tokens that make up one record.
pub const FIELD_COUNT: usize = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("expected {} fields, found {0}", FIELD_COUNT)]
    Incomplete(usize),
    #[error("invalid {field} {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

/// Parse one line of the database file into a record.
pub fn decode(line: &str) -> Result<Person, ParseError> {
    let mut tokens = [""; FIELD_COUNT];
    let mut count = 0;
    for token in line.split_whitespace().take(FIELD_COUNT) {
        tokens[count] = token;
        count += 1;
    }
    if count < FIELD_COUNT {
        return Err(ParseError::Incomplete(count));
    }

    let [last, first, state, zip, year, month, day, password, balance, ssn] = tokens;
    Ok(Person {
        last_name: last.to_owned(),
        first_name: first.to_owned(),
        state: state.to_owned(),
        zip_code: zip.to_owned(),
        birth_year: number("birth year", year)?,
        birth_month: number("birth month", month)?,
        birth_day: number("birth day", day)?,
        password: password.to_owned(),
        balance: number("balance", balance)?,
        ssn: ssn.to_owned(),
    })
}

/// Parse raw bytes of one line, dropping a trailing carriage return.
pub fn decode_bytes(line: &[u8]) -> Result<Person, ParseError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    std::str::from_utf8(line)
        .map_err(|_| ParseError::NotUtf8)
        .and_then(decode)
}

/// Whether `value` can be stored as a single token without breaking the line format.
#[inline]
pub fn is_token(value: &str) -> bool {
    !value.is_empty() && !value.contains(char::is_whitespace)
}

#[inline]
fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}
