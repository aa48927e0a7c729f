use serde::{Deserialize, Serialize};

use super::referral::{Referral, ReferralStatus};

/// Page size used when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// A window over the (optionally filtered) referral collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }

    /// Overwrite only the fields present in `patch`.
    pub fn merge(&mut self, patch: PaginationPatch) {
        if let Some(total) = patch.total {
            self.total = total;
        }
        if let Some(limit) = patch.limit {
            self.limit = limit;
        }
        if let Some(offset) = patch.offset {
            self.offset = offset;
        }
        if let Some(has_more) = patch.has_more {
            self.has_more = has_more;
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub total: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub has_more: Option<bool>,
}

/// Query parameters for listing referrals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<ReferralStatus>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListFilter {
    pub fn page(limit: u64, offset: u64) -> Self {
        Self {
            status: None,
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub fn with_status(mut self, status: ReferralStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// One page of referrals plus its window descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralPage {
    pub referrals: Vec<Referral>,
    pub pagination: Pagination,
}
