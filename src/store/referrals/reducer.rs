use crate::store::mvi::Reducer;

use super::intent::{Fulfilled, Operation, ReferralsIntent};
use super::state::ReferralsState;

/// Slice error used when a rejection carries no message.
pub const GENERIC_ERROR: &str = "Something went wrong";

pub struct ReferralsReducer;

impl Reducer for ReferralsReducer {
    type State = ReferralsState;
    type Intent = ReferralsIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ReferralsIntent::Pending(Operation::FetchReferrals) => {
                state.loading = true;
                state.error = None;
            }
            ReferralsIntent::Pending(_) => {}

            ReferralsIntent::Fulfilled(result) => {
                apply_fulfilled(&mut state, result);
                state.loading = false;
            }

            ReferralsIntent::Rejected { error, .. } => {
                state.loading = false;
                state.error = Some(
                    error
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| GENERIC_ERROR.to_string()),
                );
            }

            ReferralsIntent::ClearError => state.error = None,

            ReferralsIntent::UpdatePagination(patch) => state.pagination.merge(patch),
        }
        state
    }
}

fn apply_fulfilled(state: &mut ReferralsState, result: Fulfilled) {
    match result {
        Fulfilled::Fetched(page) => {
            state.referrals = page.referrals;
            state.pagination = page.pagination;
        }
        Fulfilled::Created(referral) => {
            state.referrals.insert(0, referral);
            state.pagination.total += 1;
        }
        Fulfilled::Updated(referral) => {
            if let Some(slot) = state.referrals.iter_mut().find(|r| r.id == referral.id) {
                *slot = referral;
            }
        }
        Fulfilled::Deleted(id) => {
            let before = state.referrals.len();
            state.referrals.retain(|r| r.id != id);
            if state.referrals.len() < before {
                state.pagination.total = state.pagination.total.saturating_sub(1);
            }
        }
    }
}
