use crate::domain::{Pagination, Referral};
use crate::store::mvi::SliceState;

/// Client-side cache of the current referral page.
///
/// `loading` and `error` are shared by every operation: a failed delete
/// shows up in the same `error` as a failed fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferralsState {
    pub referrals: Vec<Referral>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
}

impl SliceState for ReferralsState {}

impl ReferralsState {
    pub fn find(&self, id: i64) -> Option<&Referral> {
        self.referrals.iter().find(|r| r.id == id)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
