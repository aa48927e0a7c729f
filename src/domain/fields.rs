//! Mapping between the JSON names of referral fields and their SQLite columns.
//!
//! The table below is the single source of truth for both directions: row
//! decoding, the INSERT column list, and the `SET` clause of partial updates
//! are all generated from it.

/// A client-writable referral field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferralField {
    GivenName,
    Surname,
    Email,
    Phone,
    HomeNameOrNumber,
    Street,
    Suburb,
    State,
    Postcode,
    Country,
    Status,
    Notes,
    ReferredBy,
}

/// `(field, json name, column)` for every writable field, in column order.
const FIELD_MAP: [(ReferralField, &str, &str); 13] = [
    (ReferralField::GivenName, "givenName", "given_name"),
    (ReferralField::Surname, "surname", "surname"),
    (ReferralField::Email, "email", "email"),
    (ReferralField::Phone, "phone", "phone"),
    (ReferralField::HomeNameOrNumber, "homeNameOrNumber", "home_name_or_number"),
    (ReferralField::Street, "street", "street"),
    (ReferralField::Suburb, "suburb", "suburb"),
    (ReferralField::State, "state", "state"),
    (ReferralField::Postcode, "postcode", "postcode"),
    (ReferralField::Country, "country", "country"),
    (ReferralField::Status, "status", "status"),
    (ReferralField::Notes, "notes", "notes"),
    (ReferralField::ReferredBy, "referredBy", "referred_by"),
];

/// Fields that must be present and non-empty when creating a referral.
pub const REQUIRED_ON_CREATE: [ReferralField; 9] = [
    ReferralField::GivenName,
    ReferralField::Surname,
    ReferralField::Email,
    ReferralField::Phone,
    ReferralField::HomeNameOrNumber,
    ReferralField::Street,
    ReferralField::Suburb,
    ReferralField::State,
    ReferralField::Postcode,
];

impl ReferralField {
    /// Iterate all writable fields in column order.
    pub fn all() -> impl Iterator<Item = ReferralField> {
        FIELD_MAP.iter().map(|(field, _, _)| *field)
    }

    pub fn json_name(self) -> &'static str {
        Self::entry(self).1
    }

    pub fn column(self) -> &'static str {
        Self::entry(self).2
    }

    pub fn from_json_name(name: &str) -> Option<Self> {
        FIELD_MAP
            .iter()
            .find(|(_, json, _)| *json == name)
            .map(|(field, _, _)| *field)
    }

    pub fn from_column(column: &str) -> Option<Self> {
        FIELD_MAP
            .iter()
            .find(|(_, _, col)| *col == column)
            .map(|(field, _, _)| *field)
    }

    /// Whether the field may be stored as NULL.
    pub fn is_nullable(self) -> bool {
        matches!(self, ReferralField::Notes | ReferralField::ReferredBy)
    }

    // Variants are declared in table order, so the discriminant indexes the table.
    fn entry(self) -> &'static (ReferralField, &'static str, &'static str) {
        &FIELD_MAP[self as usize]
    }
}
