//! Input validation for create and update requests.
//!
//! Only the first failure is reported. Checks run in a fixed order:
//! required fields (create only), email format, status membership.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::fields::{ReferralField, REQUIRED_ON_CREATE};
use super::referral::{ReferralChanges, ReferralDraft, ReferralStatus, DEFAULT_COUNTRY};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.json_name())]
    Required(ReferralField),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid status. Must be one of: pending, contacted, completed, declined")]
    InvalidStatus,

    #[error("No fields provided to update")]
    NoFieldsToUpdate,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A create request that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReferral {
    pub given_name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub home_name_or_number: String,
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub status: ReferralStatus,
    pub notes: Option<String>,
    pub referred_by: Option<String>,
}

impl NewReferral {
    /// Column value for `field`, as it will be bound in the INSERT.
    pub fn value(&self, field: ReferralField) -> Option<&str> {
        match field {
            ReferralField::GivenName => Some(&self.given_name),
            ReferralField::Surname => Some(&self.surname),
            ReferralField::Email => Some(&self.email),
            ReferralField::Phone => Some(&self.phone),
            ReferralField::HomeNameOrNumber => Some(&self.home_name_or_number),
            ReferralField::Street => Some(&self.street),
            ReferralField::Suburb => Some(&self.suburb),
            ReferralField::State => Some(&self.state),
            ReferralField::Postcode => Some(&self.postcode),
            ReferralField::Country => Some(&self.country),
            ReferralField::Status => Some(self.status.as_str()),
            ReferralField::Notes => self.notes.as_deref(),
            ReferralField::ReferredBy => self.referred_by.as_deref(),
        }
    }
}

/// One `column = value` assignment of a validated update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: ReferralField,
    pub value: Option<String>,
}

pub fn validate_draft(draft: ReferralDraft) -> Result<NewReferral, ValidationError> {
    for field in REQUIRED_ON_CREATE {
        if draft.get(field).map_or(true, str::is_empty) {
            return Err(ValidationError::Required(field));
        }
    }

    let email = draft.email.unwrap_or_default();
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    let status = match draft.status.as_deref() {
        None | Some("") => ReferralStatus::default(),
        Some(raw) => raw.parse().map_err(|_| ValidationError::InvalidStatus)?,
    };

    Ok(NewReferral {
        given_name: draft.given_name.unwrap_or_default(),
        surname: draft.surname.unwrap_or_default(),
        email,
        phone: draft.phone.unwrap_or_default(),
        home_name_or_number: draft.home_name_or_number.unwrap_or_default(),
        street: draft.street.unwrap_or_default(),
        suburb: draft.suburb.unwrap_or_default(),
        state: draft.state.unwrap_or_default(),
        postcode: draft.postcode.unwrap_or_default(),
        country: draft
            .country
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        status,
        notes: draft.notes.filter(|n| !n.is_empty()),
        referred_by: draft.referred_by.filter(|r| !r.is_empty()),
    })
}

pub fn validate_changes(changes: &ReferralChanges) -> Result<Vec<Assignment>, ValidationError> {
    if let Some(email) = changes.email.as_deref() {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
    }
    if let Some(status) = changes.status.as_deref() {
        if status.parse::<ReferralStatus>().is_err() {
            return Err(ValidationError::InvalidStatus);
        }
    }

    let assignments: Vec<Assignment> = ReferralField::all()
        .filter_map(|field| {
            changes.get(field).map(|value| Assignment {
                field,
                value: value.map(str::to_string),
            })
        })
        .collect();

    if assignments.is_empty() {
        return Err(ValidationError::NoFieldsToUpdate);
    }
    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ReferralDraft {
        ReferralDraft {
            given_name: Some("Jane".into()),
            surname: Some("Smith".into()),
            email: Some("jane.smith@example.com".into()),
            phone: Some("+61498765432".into()),
            home_name_or_number: Some("456".into()),
            street: Some("Main Road".into()),
            suburb: Some("Melbourne".into()),
            state: Some("VIC".into()),
            postcode: Some("3000".into()),
            ..Default::default()
        }
    }

    #[test]
    fn applies_defaults() {
        let new = validate_draft(draft()).unwrap();
        assert_eq!(new.country, "Australia");
        assert_eq!(new.status, ReferralStatus::Pending);
        assert_eq!(new.notes, None);
        assert_eq!(new.referred_by, None);
    }

    #[test]
    fn reports_first_missing_field() {
        let mut input = draft();
        input.given_name = None;
        input.phone = None;
        let err = validate_draft(input).unwrap_err();
        assert_eq!(err.to_string(), "givenName is required");

        let mut input = draft();
        input.postcode = Some(String::new());
        assert_eq!(
            validate_draft(input).unwrap_err().to_string(),
            "postcode is required"
        );
    }

    #[test]
    fn missing_field_wins_over_bad_email() {
        let input = ReferralDraft {
            given_name: Some("John".into()),
            surname: Some("Doe".into()),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert_eq!(
            validate_draft(input).unwrap_err(),
            ValidationError::Required(ReferralField::Phone)
        );
    }

    #[test]
    fn rejects_bad_email_and_status() {
        let mut input = draft();
        input.email = Some("invalid-email".into());
        assert_eq!(validate_draft(input).unwrap_err(), ValidationError::InvalidEmail);

        let mut input = draft();
        input.status = Some("invalid-status".into());
        assert_eq!(
            validate_draft(input).unwrap_err().to_string(),
            "Invalid status. Must be one of: pending, contacted, completed, declined"
        );
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@c.de"));
    }

    #[test]
    fn changes_become_assignments_in_column_order() {
        let changes = ReferralChanges {
            notes: Some(None),
            status: Some("contacted".into()),
            given_name: Some("Jane".into()),
            ..Default::default()
        };
        let assignments = validate_changes(&changes).unwrap();
        let fields: Vec<_> = assignments.iter().map(|a| a.field).collect();
        assert_eq!(
            fields,
            vec![ReferralField::GivenName, ReferralField::Status, ReferralField::Notes]
        );
        assert_eq!(assignments[2].value, None);
    }

    #[test]
    fn empty_changes_are_rejected() {
        assert_eq!(
            validate_changes(&ReferralChanges::default()).unwrap_err(),
            ValidationError::NoFieldsToUpdate
        );
    }

    #[test]
    fn update_checks_email_before_status() {
        let changes = ReferralChanges {
            email: Some("nope".into()),
            status: Some("nope".into()),
            ..Default::default()
        };
        assert_eq!(validate_changes(&changes).unwrap_err(), ValidationError::InvalidEmail);
    }
}
