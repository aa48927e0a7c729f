//! Async operations that bracket a service call with lifecycle intents.
//!
//! Each thunk dispatches `Pending`, makes exactly one call, then dispatches
//! either the typed `Fulfilled` result or `Rejected` with a normalized
//! message. No retries.

use std::future::Future;

use thiserror::Error;

use super::referrals::{Fulfilled, Operation, ReferralsIntent};
use super::ReferralStore;
use crate::client::{ClientError, ReferralApi};
use crate::domain::{ListFilter, Referral, ReferralChanges, ReferralDraft, ReferralPage};

/// A failed thunk: the message stored in the slice plus the original error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Rejection {
    pub message: String,
    #[source]
    pub error: ClientError,
}

pub async fn fetch_referrals(
    store: &ReferralStore,
    api: &dyn ReferralApi,
    filter: ListFilter,
) -> Result<ReferralPage, Rejection> {
    run(
        store,
        Operation::FetchReferrals,
        || api.list(&filter),
        Fulfilled::Fetched,
    )
    .await
}

pub async fn create_referral(
    store: &ReferralStore,
    api: &dyn ReferralApi,
    draft: ReferralDraft,
) -> Result<Referral, Rejection> {
    run(
        store,
        Operation::CreateReferral,
        || api.create(&draft),
        Fulfilled::Created,
    )
    .await
}

pub async fn update_referral(
    store: &ReferralStore,
    api: &dyn ReferralApi,
    id: i64,
    changes: ReferralChanges,
) -> Result<Referral, Rejection> {
    run(
        store,
        Operation::UpdateReferral,
        || api.update(id, &changes),
        Fulfilled::Updated,
    )
    .await
}

pub async fn delete_referral(
    store: &ReferralStore,
    api: &dyn ReferralApi,
    id: i64,
) -> Result<i64, Rejection> {
    run(
        store,
        Operation::DeleteReferral,
        || async move { api.delete(id).await.map(|()| id) },
        Fulfilled::Deleted,
    )
    .await
}

async fn run<T, Fut>(
    store: &ReferralStore,
    operation: Operation,
    call: impl FnOnce() -> Fut,
    fulfilled: impl FnOnce(T) -> Fulfilled,
) -> Result<T, Rejection>
where
    T: Clone,
    Fut: Future<Output = Result<T, ClientError>>,
{
    store.dispatch(ReferralsIntent::Pending(operation));
    tracing::debug!(%operation, "pending");

    match call().await {
        Ok(value) => {
            store.dispatch(ReferralsIntent::Fulfilled(fulfilled(value.clone())));
            tracing::debug!(%operation, "fulfilled");
            Ok(value)
        }
        Err(error) => {
            let message = error.user_message(operation.fallback_message());
            tracing::debug!(%operation, error = %message, "rejected");
            store.dispatch(ReferralsIntent::rejected(operation, message.clone()));
            Err(Rejection { message, error })
        }
    }
}
