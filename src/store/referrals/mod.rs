//! The `referrals` slice: the cached page, its window, and the shared
//! loading/error flags.
//!
//! - `state.rs` - slice snapshot
//! - `intent.rs` - operation lifecycle events (pending, fulfilled, rejected)
//! - `reducer.rs` - transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::{Fulfilled, Operation, ReferralsIntent};
pub use reducer::{ReferralsReducer, GENERIC_ERROR};
pub use state::ReferralsState;
