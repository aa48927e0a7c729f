//! Client-side cache of referrals and the async operations that feed it.
//!
//! A [`Store`] owns one slice. Thunks dispatch lifecycle intents around a
//! [`ReferralApi`](crate::client::ReferralApi) call; hooks wrap thunks with
//! per-call status and notifications.

pub mod context;
pub mod hooks;
pub mod mvi;
pub mod notifier;
pub mod referrals;
pub mod thunks;

use std::sync::Arc;

use parking_lot::RwLock;

use mvi::Reducer;

pub use context::ReferralContext;
pub use hooks::{CreateReferral, DeleteReferral, MutationStatus, ReferralList, UpdateReferral};
pub use notifier::{LogNotifier, Notification, Notifier, RecordingNotifier};
pub use referrals::{Fulfilled, Operation, ReferralsIntent, ReferralsReducer, ReferralsState};
pub use thunks::Rejection;

type Subscriber<R> =
    Arc<dyn Fn(&<R as Reducer>::Intent, &<R as Reducer>::State) + Send + Sync>;

/// Holds the state of one slice and runs its reducer.
pub struct Store<R: Reducer> {
    state: RwLock<R::State>,
    subscribers: RwLock<Vec<Subscriber<R>>>,
}

pub type ReferralStore = Store<ReferralsReducer>;

impl<R: Reducer> Store<R> {
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        Self {
            state: RwLock::new(state),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Reduce `intent` into the state, then notify subscribers with the
    /// intent and the resulting snapshot. Returns that snapshot.
    pub fn dispatch(&self, intent: R::Intent) -> R::State {
        let snapshot = {
            let mut state = self.state.write();
            let next = R::reduce(std::mem::take(&mut *state), intent.clone());
            *state = next;
            state.clone()
        };

        // Listeners run outside the lock so they may read or dispatch.
        let subscribers = self.subscribers.read().clone();
        for subscriber in subscribers {
            subscriber(&intent, &snapshot);
        }
        snapshot
    }

    pub fn snapshot(&self) -> R::State {
        self.state.read().clone()
    }

    /// Read a projection of the state without cloning all of it.
    pub fn select<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.state.read())
    }

    pub fn subscribe(&self, listener: impl Fn(&R::Intent, &R::State) + Send + Sync + 'static) {
        self.subscribers.write().push(Arc::new(listener));
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferralStore {
    /// A referral store that raises an error notification for every
    /// rejected operation.
    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        let store = Self::new();
        store.subscribe(move |intent, state| {
            if intent.is_rejected() {
                let message = state
                    .error
                    .as_deref()
                    .unwrap_or(referrals::GENERIC_ERROR);
                notifier.error(message);
            }
        });
        store
    }
}
