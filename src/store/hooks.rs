//! Data-bound handles over the store, one per screen concern.
//!
//! [`ReferralList`] reads the shared slice. The mutation hooks keep their
//! own `is_loading`/`is_error`/`error` for the call they wrap and raise a
//! success notification when it lands.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::context::ReferralContext;
use super::referrals::ReferralsState;
use super::thunks;
use crate::client::ClientError;
use crate::domain::{ListFilter, Pagination, Referral, ReferralChanges, ReferralDraft};

/// List of referrals backed by the store.
pub struct ReferralList {
    ctx: ReferralContext,
    initial: ListFilter,
    activated: AtomicBool,
}

impl ReferralList {
    pub fn new(ctx: &ReferralContext, initial: ListFilter) -> Self {
        Self {
            ctx: ctx.clone(),
            initial,
            activated: AtomicBool::new(false),
        }
    }

    /// Fetch with the initial filter. Only the first call does anything.
    pub async fn activate(&self) {
        if !self.activated.swap(true, Ordering::SeqCst) {
            self.refetch(self.initial).await;
        }
    }

    /// Re-issue the fetch. Failures are logged and left in the slice.
    pub async fn refetch(&self, filter: ListFilter) {
        if let Err(rejection) =
            thunks::fetch_referrals(&self.ctx.store, self.ctx.api.as_ref(), filter).await
        {
            tracing::error!(
                error = %rejection.error.user_message("Failed to fetch referrals"),
                "Failed to fetch referrals"
            );
        }
    }

    pub fn snapshot(&self) -> ReferralsState {
        self.ctx.store.snapshot()
    }

    pub fn referrals(&self) -> Vec<Referral> {
        self.ctx.store.select(|s| s.referrals.clone())
    }

    pub fn pagination(&self) -> Pagination {
        self.ctx.store.select(|s| s.pagination)
    }

    pub fn is_loading(&self) -> bool {
        self.ctx.store.select(|s| s.loading)
    }

    pub fn is_error(&self) -> bool {
        self.ctx.store.select(|s| s.is_error())
    }

    pub fn error(&self) -> Option<String> {
        self.ctx.store.select(|s| s.error.clone())
    }
}

/// Per-call status of a mutation hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationStatus {
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct MutationTracker {
    status: Mutex<MutationStatus>,
}

impl MutationTracker {
    fn begin(&self) {
        *self.status.lock() = MutationStatus {
            is_loading: true,
            ..Default::default()
        };
    }

    fn succeed(&self) {
        self.status.lock().is_loading = false;
    }

    fn fail(&self, message: String) {
        *self.status.lock() = MutationStatus {
            is_loading: false,
            is_error: true,
            error: Some(message),
        };
    }

    fn get(&self) -> MutationStatus {
        self.status.lock().clone()
    }
}

macro_rules! mutation_status_accessors {
    () => {
        pub fn status(&self) -> MutationStatus {
            self.tracker.get()
        }

        pub fn is_loading(&self) -> bool {
            self.tracker.get().is_loading
        }

        pub fn is_error(&self) -> bool {
            self.tracker.get().is_error
        }

        pub fn error(&self) -> Option<String> {
            self.tracker.get().error
        }
    };
}

pub struct CreateReferral {
    ctx: ReferralContext,
    tracker: MutationTracker,
}

impl CreateReferral {
    pub fn new(ctx: &ReferralContext) -> Self {
        Self {
            ctx: ctx.clone(),
            tracker: MutationTracker::default(),
        }
    }

    pub async fn mutate(&self, draft: ReferralDraft) -> Result<Referral, ClientError> {
        self.tracker.begin();

        match thunks::create_referral(&self.ctx.store, self.ctx.api.as_ref(), draft).await {
            Ok(referral) => {
                self.tracker.succeed();
                self.ctx.notifier.success(&format!(
                    "Referral for {} {} created successfully!",
                    referral.given_name, referral.surname
                ));
                Ok(referral)
            }
            Err(rejection) => {
                self.tracker
                    .fail(rejection.error.user_message("Failed to create referral"));
                Err(rejection.error)
            }
        }
    }

    mutation_status_accessors!();
}

pub struct UpdateReferral {
    ctx: ReferralContext,
    tracker: MutationTracker,
}

impl UpdateReferral {
    pub fn new(ctx: &ReferralContext) -> Self {
        Self {
            ctx: ctx.clone(),
            tracker: MutationTracker::default(),
        }
    }

    pub async fn mutate(
        &self,
        id: i64,
        changes: ReferralChanges,
    ) -> Result<Referral, ClientError> {
        self.tracker.begin();

        match thunks::update_referral(&self.ctx.store, self.ctx.api.as_ref(), id, changes).await
        {
            Ok(referral) => {
                self.tracker.succeed();
                self.ctx.notifier.success(&format!(
                    "Referral {} {} updated successfully!",
                    referral.given_name, referral.surname
                ));
                Ok(referral)
            }
            Err(rejection) => {
                self.tracker
                    .fail(rejection.error.user_message("Failed to update referral"));
                Err(rejection.error)
            }
        }
    }

    mutation_status_accessors!();
}

pub struct DeleteReferral {
    ctx: ReferralContext,
    tracker: MutationTracker,
}

impl DeleteReferral {
    pub fn new(ctx: &ReferralContext) -> Self {
        Self {
            ctx: ctx.clone(),
            tracker: MutationTracker::default(),
        }
    }

    pub async fn mutate(&self, id: i64) -> Result<(), ClientError> {
        self.tracker.begin();

        match thunks::delete_referral(&self.ctx.store, self.ctx.api.as_ref(), id).await {
            Ok(_) => {
                self.tracker.succeed();
                self.ctx.notifier.success("Referral deleted successfully!");
                Ok(())
            }
            Err(rejection) => {
                self.tracker
                    .fail(rejection.error.user_message("Failed to delete referral"));
                Err(rejection.error)
            }
        }
    }

    mutation_status_accessors!();
}
