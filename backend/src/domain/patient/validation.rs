//! Validation of the flattened owner-plus-pet input shape.
//!
//! The same rules apply on create and update. Validation never stops at the
//! first failure: every violated field is reported so clients can highlight
//! all of them at once.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::PetType;

/// Minimum phone number length, in characters.
pub const PHONE_MIN: usize = 7;
/// Maximum phone number length, in characters.
pub const PHONE_MAX: usize = 15;

static LETTERS_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn letters_regex() -> &'static Regex {
    LETTERS_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z\s]+$")
            .unwrap_or_else(|error| panic!("letters regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new(r"^[0-9+\s]+$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Raw patient payload as submitted by a client.
///
/// Missing fields decode as empty strings so they surface as validation
/// violations rather than body-decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientInput {
    /// Owner name; letters and spaces only.
    pub name: String,
    /// Owner phone number; 7-15 characters of digits, `+` and spaces.
    pub phone: String,
    /// Pet name; letters and spaces only.
    pub pet_name: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp; must not be in the future.
    pub date_of_birth: String,
    /// One of `dog`, `cat` or `parrot`.
    pub pet_type: String,
}

/// Input field a violation refers to, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatientField {
    Name,
    Phone,
    PetName,
    DateOfBirth,
    PetType,
}

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    InvalidCharacters,
    TooShort,
    TooLong,
    InvalidDate,
    FutureDate,
    InvalidPetType,
}

/// One rejected field together with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: PatientField,
    pub code: ViolationCode,
    pub message: String,
}

impl FieldViolation {
    fn new(field: PatientField, code: ViolationCode, message: &str) -> Self {
        Self {
            field,
            code,
            message: message.to_owned(),
        }
    }
}

/// Every violation found while validating a [`PatientInput`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("patient payload failed validation")]
pub struct PatientValidationErrors(Vec<FieldViolation>);

impl PatientValidationErrors {
    /// Violations in field order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Whether any violation refers to `field`.
    #[must_use]
    pub fn has(&self, field: PatientField, code: ViolationCode) -> bool {
        self.0.iter().any(|v| v.field == field && v.code == code)
    }

    /// Consume into the underlying list.
    #[must_use]
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.0
    }
}

fn letters_only(
    raw: &str,
    field: PatientField,
    required: &str,
    invalid: &str,
) -> Result<String, Vec<FieldViolation>> {
    if raw.trim().is_empty() {
        return Err(vec![FieldViolation::new(
            field,
            ViolationCode::Required,
            required,
        )]);
    }
    if !letters_regex().is_match(raw) {
        return Err(vec![FieldViolation::new(
            field,
            ViolationCode::InvalidCharacters,
            invalid,
        )]);
    }
    Ok(raw.to_owned())
}

macro_rules! text_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

text_newtype!(
    /// Owner name: letters and spaces only, not blank. Stored as given.
    OwnerName
);
text_newtype!(
    /// Phone number: 7-15 characters of digits, `+` and spaces.
    Phone
);
text_newtype!(
    /// Pet name: letters and spaces only, not blank. Stored as given.
    PetName
);

impl OwnerName {
    /// Validate an owner name.
    pub fn parse(raw: &str) -> Result<Self, Vec<FieldViolation>> {
        letters_only(
            raw,
            PatientField::Name,
            "Name is required",
            "Name must contain letters only",
        )
        .map(Self)
    }
}

impl PetName {
    /// Validate a pet name.
    pub fn parse(raw: &str) -> Result<Self, Vec<FieldViolation>> {
        letters_only(
            raw,
            PatientField::PetName,
            "Pet name is required",
            "Pet name must contain letters only",
        )
        .map(Self)
    }
}

impl Phone {
    /// Validate a phone number. Length and character violations are reported
    /// together.
    pub fn parse(raw: &str) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let length = raw.chars().count();
        if length < PHONE_MIN {
            violations.push(FieldViolation::new(
                PatientField::Phone,
                ViolationCode::TooShort,
                "Phone number is too short",
            ));
        } else if length > PHONE_MAX {
            violations.push(FieldViolation::new(
                PatientField::Phone,
                ViolationCode::TooLong,
                "Phone number is too long",
            ));
        }
        if !phone_regex().is_match(raw) {
            violations.push(FieldViolation::new(
                PatientField::Phone,
                ViolationCode::InvalidCharacters,
                "Invalid phone number",
            ));
        }
        if violations.is_empty() {
            Ok(Self(raw.to_owned()))
        } else {
            Err(violations)
        }
    }
}

/// Pet date of birth, never later than the day it was validated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    /// Parse `raw` as `YYYY-MM-DD` or RFC 3339 and compare it with `today`.
    /// Time of day is ignored.
    pub fn parse(raw: &str, today: NaiveDate) -> Result<Self, Vec<FieldViolation>> {
        let field = PatientField::DateOfBirth;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(vec![FieldViolation::new(
                field,
                ViolationCode::Required,
                "Date of birth is required",
            )]);
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .ok_or_else(|| {
                vec![FieldViolation::new(
                    field,
                    ViolationCode::InvalidDate,
                    "Invalid date of birth",
                )]
            })?;
        if date > today {
            return Err(vec![FieldViolation::new(
                field,
                ViolationCode::FutureDate,
                "Date of birth cannot be in the future",
            )]);
        }
        Ok(Self(date))
    }

    /// The calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

fn parse_pet_type(raw: &str) -> Result<PetType, Vec<FieldViolation>> {
    raw.parse().map_err(|_| {
        vec![FieldViolation::new(
            PatientField::PetType,
            ViolationCode::InvalidPetType,
            "Pet type must be one of dog, cat, parrot",
        )]
    })
}

/// Fully validated patient payload, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: OwnerName,
    pub phone: Phone,
    pub pet_name: PetName,
    pub date_of_birth: DateOfBirth,
    pub pet_type: PetType,
}

impl PatientDraft {
    /// Validate every field of `input`, using `today` as the latest accepted
    /// date of birth.
    ///
    /// # Errors
    ///
    /// Returns every violation found across all fields.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use pet_clinic::domain::{PatientDraft, PatientInput};
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let input = PatientInput {
    ///     name: "John3".into(),
    ///     phone: "12".into(),
    ///     ..PatientInput::default()
    /// };
    /// let errors = PatientDraft::validate(&input, today).unwrap_err();
    /// assert!(errors.violations().len() >= 5);
    /// ```
    pub fn validate(
        input: &PatientInput,
        today: NaiveDate,
    ) -> Result<Self, PatientValidationErrors> {
        let name = OwnerName::parse(&input.name);
        let phone = Phone::parse(&input.phone);
        let pet_name = PetName::parse(&input.pet_name);
        let date_of_birth = DateOfBirth::parse(&input.date_of_birth, today);
        let pet_type = parse_pet_type(&input.pet_type);

        match (name, phone, pet_name, date_of_birth, pet_type) {
            (Ok(name), Ok(phone), Ok(pet_name), Ok(date_of_birth), Ok(pet_type)) => Ok(Self {
                name,
                phone,
                pet_name,
                date_of_birth,
                pet_type,
            }),
            (name, phone, pet_name, date_of_birth, pet_type) => {
                let violations = [
                    name.err(),
                    phone.err(),
                    pet_name.err(),
                    date_of_birth.err(),
                    pet_type.err(),
                ]
                .into_iter()
                .flatten()
                .flatten()
                .collect();
                Err(PatientValidationErrors(violations))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    #[fixture]
    fn valid_input() -> PatientInput {
        PatientInput {
            name: "Alice Smith".into(),
            phone: "+44 1234567".into(),
            pet_name: "Rex".into(),
            date_of_birth: "2020-01-01".into(),
            pet_type: "dog".into(),
        }
    }

    #[rstest]
    fn accepts_valid_input(valid_input: PatientInput, today: NaiveDate) {
        let draft = PatientDraft::validate(&valid_input, today).expect("valid input");
        assert_eq!(draft.name.as_ref(), "Alice Smith");
        assert_eq!(draft.pet_type, PetType::Dog);
        assert_eq!(
            draft.date_of_birth.date(),
            NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date")
        );
    }

    #[rstest]
    fn names_are_stored_exactly_as_given(mut valid_input: PatientInput, today: NaiveDate) {
        valid_input.name = " Alice ".into();
        valid_input.pet_name = "Rex  ".into();
        let draft = PatientDraft::validate(&valid_input, today).expect("padded names");
        assert_eq!(draft.name.as_ref(), " Alice ");
        assert_eq!(draft.pet_name.as_ref(), "Rex  ");
    }

    #[rstest]
    #[case("   ")]
    #[case("\t")]
    fn blank_names_are_required(
        mut valid_input: PatientInput,
        today: NaiveDate,
        #[case] blank: &str,
    ) {
        valid_input.name = blank.into();
        let errors = PatientDraft::validate(&valid_input, today).expect_err("blank name");
        assert!(errors.has(PatientField::Name, ViolationCode::Required));
    }

    #[rstest]
    fn rejects_date_of_birth_tomorrow(mut valid_input: PatientInput, today: NaiveDate) {
        valid_input.date_of_birth = "2024-06-16".into();
        let errors = PatientDraft::validate(&valid_input, today).expect_err("future date");
        assert!(errors.has(PatientField::DateOfBirth, ViolationCode::FutureDate));
        assert_eq!(errors.violations().len(), 1);
    }

    #[rstest]
    #[case("2024-06-15")]
    #[case("2024-06-15T23:59:59Z")]
    fn accepts_today_regardless_of_time(
        mut valid_input: PatientInput,
        today: NaiveDate,
        #[case] raw: &str,
    ) {
        valid_input.date_of_birth = raw.into();
        assert!(PatientDraft::validate(&valid_input, today).is_ok());
    }

    #[rstest]
    fn rejects_unknown_pet_type(mut valid_input: PatientInput, today: NaiveDate) {
        valid_input.pet_type = "fish".into();
        let errors = PatientDraft::validate(&valid_input, today).expect_err("fish");
        assert!(errors.has(PatientField::PetType, ViolationCode::InvalidPetType));
    }

    #[rstest]
    fn rejects_digits_in_owner_name(mut valid_input: PatientInput, today: NaiveDate) {
        valid_input.name = "John3".into();
        let errors = PatientDraft::validate(&valid_input, today).expect_err("digit");
        assert!(errors.has(PatientField::Name, ViolationCode::InvalidCharacters));
    }

    #[rstest]
    #[case("123456", ViolationCode::TooShort)]
    #[case("1234567890123456", ViolationCode::TooLong)]
    #[case("12345-678", ViolationCode::InvalidCharacters)]
    fn rejects_bad_phone_numbers(
        mut valid_input: PatientInput,
        today: NaiveDate,
        #[case] phone: &str,
        #[case] expected: ViolationCode,
    ) {
        valid_input.phone = phone.into();
        let errors = PatientDraft::validate(&valid_input, today).expect_err("bad phone");
        assert!(errors.has(PatientField::Phone, expected));
    }

    #[rstest]
    fn phone_reports_length_and_characters_together() {
        let errors = Phone::parse("ab").expect_err("bad phone");
        let codes: Vec<_> = errors.iter().map(|v| v.code).collect();
        assert_eq!(
            codes,
            vec![ViolationCode::TooShort, ViolationCode::InvalidCharacters]
        );
    }

    #[rstest]
    fn reports_every_field_of_an_empty_payload(today: NaiveDate) {
        let errors =
            PatientDraft::validate(&PatientInput::default(), today).expect_err("empty payload");
        for (field, code) in [
            (PatientField::Name, ViolationCode::Required),
            (PatientField::Phone, ViolationCode::TooShort),
            (PatientField::PetName, ViolationCode::Required),
            (PatientField::DateOfBirth, ViolationCode::Required),
            (PatientField::PetType, ViolationCode::InvalidPetType),
        ] {
            assert!(errors.has(field, code), "missing {field:?}/{code:?}");
        }
    }

    #[rstest]
    fn rejects_unparseable_dates(mut valid_input: PatientInput, today: NaiveDate) {
        valid_input.date_of_birth = "01/02/2020".into();
        let errors = PatientDraft::validate(&valid_input, today).expect_err("bad date");
        assert!(errors.has(PatientField::DateOfBirth, ViolationCode::InvalidDate));
    }

    #[rstest]
    fn missing_fields_decode_as_empty_strings() {
        let input: PatientInput =
            serde_json::from_str(r#"{"name":"Bob"}"#).expect("partial payload decodes");
        assert_eq!(input.name, "Bob");
        assert!(input.pet_type.is_empty());
    }

    #[rstest]
    fn violations_serialise_with_wire_names() {
        let violation = FieldViolation::new(
            PatientField::DateOfBirth,
            ViolationCode::FutureDate,
            "Date of birth cannot be in the future",
        );
        let value = serde_json::to_value(&violation).expect("serialise violation");
        assert_eq!(value["field"], "dateOfBirth");
        assert_eq!(value["code"], "future_date");
    }
}
