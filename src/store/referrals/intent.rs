use std::fmt;

use crate::domain::{PaginationPatch, Referral, ReferralPage};
use crate::store::mvi::Intent;

/// The asynchronous operations the slice tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchReferrals,
    CreateReferral,
    UpdateReferral,
    DeleteReferral,
}

impl Operation {
    /// Action-style name, e.g. `referrals/fetchReferrals`.
    pub fn name(self) -> &'static str {
        match self {
            Operation::FetchReferrals => "referrals/fetchReferrals",
            Operation::CreateReferral => "referrals/createReferral",
            Operation::UpdateReferral => "referrals/updateReferral",
            Operation::DeleteReferral => "referrals/deleteReferral",
        }
    }

    /// Message used when a failure carries no usable text of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::FetchReferrals => "Failed to get referral",
            Operation::CreateReferral => "Failed to create referral",
            Operation::UpdateReferral => "Failed to update referral",
            Operation::DeleteReferral => "Failed to delete referral",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Successful results, one per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Fulfilled {
    Fetched(ReferralPage),
    Created(Referral),
    Updated(Referral),
    Deleted(i64),
}

impl Fulfilled {
    pub fn operation(&self) -> Operation {
        match self {
            Fulfilled::Fetched(_) => Operation::FetchReferrals,
            Fulfilled::Created(_) => Operation::CreateReferral,
            Fulfilled::Updated(_) => Operation::UpdateReferral,
            Fulfilled::Deleted(_) => Operation::DeleteReferral,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReferralsIntent {
    /// An operation has started.
    Pending(Operation),

    /// An operation succeeded with its payload.
    Fulfilled(Fulfilled),

    /// An operation failed. `error` is the normalized message, if any.
    Rejected {
        operation: Operation,
        error: Option<String>,
    },

    ClearError,

    /// Overwrite only the pagination fields that are present.
    UpdatePagination(PaginationPatch),
}

impl Intent for ReferralsIntent {}

impl ReferralsIntent {
    pub fn rejected(operation: Operation, error: impl Into<String>) -> Self {
        ReferralsIntent::Rejected {
            operation,
            error: Some(error.into()),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ReferralsIntent::Rejected { .. })
    }
}
