use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::key::Key;

/// A single entry of the database.
///
/// Records are identified by `(last_name, first_name)`, see [`Key`]. The key fields of a record
/// that lives in an [`AvlTree`](crate::AvlTree) are never changed in place, only the fields listed
/// in [`Field`] are.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub last_name: String,
    pub first_name: String,
    pub state: String,
    pub zip_code: String,
    pub birth_year: i32,
    pub birth_month: i32,
    pub birth_day: i32,
    /// Stored in clear, as found in the database file.
    pub password: String,
    pub balance: f64,
    pub ssn: String,
}

impl Person {
    #[inline]
    pub fn key(&self) -> Key<'_> {
        Key {
            last: &self.last_name,
            first: &self.first_name,
        }
    }

    /// The birth date as `(year, month, day)`, which orders chronologically.
    ///
    /// No calendar validation is performed, any integers are accepted.
    #[inline]
    pub fn birth_date(&self) -> (i32, i32, i32) {
        (self.birth_year, self.birth_month, self.birth_day)
    }

    /// All textual fields in their on-disk order. Numeric fields always render as one token.
    pub(crate) fn text_fields(&self) -> [&str; 6] {
        [
            &self.last_name,
            &self.first_name,
            &self.state,
            &self.zip_code,
            &self.password,
            &self.ssn,
        ]
    }

    /// Overwrite a non-key field with a new value parsed from `value`.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), FieldParseError> {
        match field {
            Field::State => self.state = value.to_owned(),
            Field::ZipCode => self.zip_code = value.to_owned(),
            Field::Password => self.password = value.to_owned(),
            Field::Ssn => self.ssn = value.to_owned(),
            Field::Balance => {
                self.balance = value
                    .parse()
                    .map_err(|_| FieldParseError::InvalidValue(field, value.to_owned()))?
            }
        }
        Ok(())
    }
}

/// Renders the record as one line of the database file, without the line break.
impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {}",
            self.last_name,
            self.first_name,
            self.state,
            self.zip_code,
            self.birth_year,
            self.birth_month,
            self.birth_day,
            self.password,
            self.balance,
            self.ssn,
        )
    }
}

/// The fields of a [`Person`] that can be updated in place.
///
/// Name fields are absent on purpose: changing them would move the record within the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    ZipCode,
    Password,
    Balance,
    Ssn,
}

#[derive(Error, Debug, PartialEq)]
pub enum FieldParseError {
    #[error("unknown field {0:?}")]
    UnknownField(String),
    #[error("invalid value {1:?} for field {0}")]
    InvalidValue(Field, String),
}

impl Display for Field {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::State => "state",
            Self::ZipCode => "zip",
            Self::Password => "password",
            Self::Balance => "balance",
            Self::Ssn => "ssn",
        })
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "state" => Ok(Self::State),
            "zip" | "zipcode" | "zip_code" => Ok(Self::ZipCode),
            "password" => Ok(Self::Password),
            "balance" => Ok(Self::Balance),
            "ssn" => Ok(Self::Ssn),
            _ => Err(FieldParseError::UnknownField(s.to_owned())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Field, FieldParseError, Person};

    pub(crate) fn person(last: &str, first: &str, birth: (i32, i32, i32)) -> Person {
        Person {
            last_name: last.to_owned(),
            first_name: first.to_owned(),
            state: "TX".to_owned(),
            zip_code: "75001".to_owned(),
            birth_year: birth.0,
            birth_month: birth.1,
            birth_day: birth.2,
            password: "hunter2".to_owned(),
            balance: 100.5,
            ssn: "123-45-6789".to_owned(),
        }
    }

    #[test]
    fn test_display() {
        let p = person("Smith", "John", (1980, 1, 1));
        assert_eq!(
            p.to_string(),
            "Smith John TX 75001 1980 1 1 hunter2 100.5 123-45-6789"
        );
    }

    #[test]
    fn test_set_field() {
        let mut p = person("Smith", "John", (1980, 1, 1));

        p.set(Field::ZipCode, "10001").unwrap();
        assert_eq!(p.zip_code, "10001");

        p.set(Field::Balance, "-12.25").unwrap();
        assert_eq!(p.balance, -12.25);

        assert_eq!(
            p.set(Field::Balance, "lots"),
            Err(FieldParseError::InvalidValue(Field::Balance, "lots".to_owned()))
        );
        assert_eq!(p.balance, -12.25);

        // Keys are untouched.
        assert_eq!((p.last_name.as_str(), p.first_name.as_str()), ("Smith", "John"));
    }

    #[test]
    fn test_parse_field() {
        assert_eq!("ZIP".parse(), Ok(Field::ZipCode));
        assert_eq!("Balance".parse(), Ok(Field::Balance));
        assert_eq!(
            "lastname".parse::<Field>(),
            Err(FieldParseError::UnknownField("lastname".to_owned()))
        );
    }
}
