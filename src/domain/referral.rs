use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::fields::ReferralField;

pub const DEFAULT_COUNTRY: &str = "Australia";

/// Where a referral is in the outreach process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    #[default]
    Pending,
    Contacted,
    Completed,
    Declined,
}

impl ReferralStatus {
    pub const ALL: [ReferralStatus; 4] = [
        ReferralStatus::Pending,
        ReferralStatus::Contacted,
        ReferralStatus::Completed,
        ReferralStatus::Declined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReferralStatus::Pending => "pending",
            ReferralStatus::Contacted => "contacted",
            ReferralStatus::Completed => "completed",
            ReferralStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown referral status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ReferralStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferralStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A referral record as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: i64,
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
    pub created_at: String,
    pub updated_at: String,
}

impl Referral {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.surname)
    }
}

/// Body of a create request. Every field is optional on the wire so the
/// server can report the first missing one by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_name_or_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
}

impl ReferralDraft {
    pub fn get(&self, field: ReferralField) -> Option<&str> {
        let value = match field {
            ReferralField::GivenName => &self.given_name,
            ReferralField::Surname => &self.surname,
            ReferralField::Email => &self.email,
            ReferralField::Phone => &self.phone,
            ReferralField::HomeNameOrNumber => &self.home_name_or_number,
            ReferralField::Street => &self.street,
            ReferralField::Suburb => &self.suburb,
            ReferralField::State => &self.state,
            ReferralField::Postcode => &self.postcode,
            ReferralField::Country => &self.country,
            ReferralField::Status => &self.status,
            ReferralField::Notes => &self.notes,
            ReferralField::ReferredBy => &self.referred_by,
        };
        value.as_deref()
    }

    /// Display name used in notifications; falls back to whatever parts are set.
    pub fn full_name(&self) -> String {
        let given = self.given_name.as_deref().unwrap_or_default();
        let surname = self.surname.as_deref().unwrap_or_default();
        format!("{given} {surname}").trim().to_string()
    }
}

impl From<&Referral> for ReferralDraft {
    fn from(referral: &Referral) -> Self {
        Self {
            given_name: Some(referral.given_name.clone()),
            surname: Some(referral.surname.clone()),
            email: Some(referral.email.clone()),
            phone: Some(referral.phone.clone()),
            home_name_or_number: Some(referral.home_name_or_number.clone()),
            street: Some(referral.street.clone()),
            suburb: Some(referral.suburb.clone()),
            state: Some(referral.state.clone()),
            postcode: Some(referral.postcode.clone()),
            country: Some(referral.country.clone()),
            status: Some(referral.status.to_string()),
            notes: referral.notes.clone(),
            referred_by: referral.referred_by.clone(),
        }
    }
}

/// Body of a partial update.
///
/// `notes` and `referredBy` distinguish "absent" (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored value. For every other
/// field `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_name_or_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub referred_by: Option<Option<String>>,
}

impl ReferralChanges {
    /// The value the update assigns to `field`: `None` when the field is not
    /// part of the update, `Some(None)` when it is cleared.
    pub fn get(&self, field: ReferralField) -> Option<Option<&str>> {
        fn plain(value: &Option<String>) -> Option<Option<&str>> {
            value.as_deref().map(Some)
        }
        match field {
            ReferralField::GivenName => plain(&self.given_name),
            ReferralField::Surname => plain(&self.surname),
            ReferralField::Email => plain(&self.email),
            ReferralField::Phone => plain(&self.phone),
            ReferralField::HomeNameOrNumber => plain(&self.home_name_or_number),
            ReferralField::Street => plain(&self.street),
            ReferralField::Suburb => plain(&self.suburb),
            ReferralField::State => plain(&self.state),
            ReferralField::Postcode => plain(&self.postcode),
            ReferralField::Country => plain(&self.country),
            ReferralField::Status => plain(&self.status),
            ReferralField::Notes => self.notes.as_ref().map(|v| v.as_deref()),
            ReferralField::ReferredBy => self.referred_by.as_ref().map(|v| v.as_deref()),
        }
    }
}

// A present key always yields `Some`, even when its value is `null`; a
// missing key falls back to the container default (`None`).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
