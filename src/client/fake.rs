//! In-memory [`ReferralApi`] for unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ClientError, ReferralApi};
use crate::domain::{
    ListFilter, Pagination, Referral, ReferralChanges, ReferralDraft, ReferralPage,
    ReferralStatus, DEFAULT_PAGE_SIZE,
};

#[derive(Default)]
pub struct FakeApi {
    rows: Mutex<Vec<Referral>>,
    next_id: Mutex<i64>,
    failure: Mutex<Option<(u16, Option<String>)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `status` and `message`.
    pub fn fail_with(&self, status: u16, message: Option<&str>) {
        *self.failure.lock() = Some((status, message.map(str::to_string)));
    }

    fn check(&self) -> Result<(), ClientError> {
        match self.failure.lock().clone() {
            Some((status, message)) => Err(ClientError::from_status(status, message)),
            None => Ok(()),
        }
    }
}

pub fn referral_from(id: i64, draft: &ReferralDraft) -> Referral {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    Referral {
        id,
        given_name: text(&draft.given_name),
        surname: text(&draft.surname),
        email: text(&draft.email),
        phone: text(&draft.phone),
        home_name_or_number: text(&draft.home_name_or_number),
        street: text(&draft.street),
        suburb: text(&draft.suburb),
        state: text(&draft.state),
        postcode: text(&draft.postcode),
        country: draft.country.clone().unwrap_or_else(|| "Australia".into()),
        status: draft
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ReferralStatus::Pending),
        notes: draft.notes.clone(),
        referred_by: draft.referred_by.clone(),
        created_at: format!("2024-01-01 00:00:{id:02}.000"),
        updated_at: format!("2024-01-01 00:00:{id:02}.000"),
    }
}

pub fn draft(given: &str, surname: &str, email: &str) -> ReferralDraft {
    ReferralDraft {
        given_name: Some(given.into()),
        surname: Some(surname.into()),
        email: Some(email.into()),
        phone: Some("0400000000".into()),
        home_name_or_number: Some("12".into()),
        street: Some("Main Street".into()),
        suburb: Some("Richmond".into()),
        state: Some("VIC".into()),
        postcode: Some("3121".into()),
        ..Default::default()
    }
}

#[async_trait]
impl ReferralApi for FakeApi {
    async fn list(&self, filter: &ListFilter) -> Result<ReferralPage, ClientError> {
        self.check()?;
        let rows = self.rows.lock();
        let matching: Vec<_> = rows
            .iter()
            .rev()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = filter.offset.unwrap_or(0);
        let total = matching.len() as u64;
        Ok(ReferralPage {
            referrals: matching
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
            pagination: Pagination::new(total, limit, offset),
        })
    }

    async fn get(&self, id: i64) -> Result<Referral, ClientError> {
        self.check()?;
        self.rows
            .lock()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ClientError::from_status(404, Some("Referral not found".into())))
    }

    async fn create(&self, draft: &ReferralDraft) -> Result<Referral, ClientError> {
        self.check()?;
        let mut rows = self.rows.lock();
        if rows.iter().any(|r| Some(&r.email) == draft.email.as_ref()) {
            return Err(ClientError::from_status(
                409,
                Some("Email already exists".into()),
            ));
        }
        let mut next_id = self.next_id.lock();
        *next_id += 1;
        let referral = referral_from(*next_id, draft);
        rows.push(referral.clone());
        Ok(referral)
    }

    async fn update(&self, id: i64, changes: &ReferralChanges) -> Result<Referral, ClientError> {
        self.check()?;
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::from_status(404, Some("Referral not found".into())))?;
        if let Some(given) = &changes.given_name {
            row.given_name = given.clone();
        }
        if let Some(surname) = &changes.surname {
            row.surname = surname.clone();
        }
        if let Some(status) = changes.status.as_deref().and_then(|s| s.parse().ok()) {
            row.status = status;
        }
        if let Some(notes) = &changes.notes {
            row.notes = notes.clone();
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.check()?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(ClientError::from_status(
                404,
                Some("Referral not found".into()),
            ));
        }
        Ok(())
    }
}
