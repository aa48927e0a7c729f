//! Unidirectional data-flow primitives for the client store.
//!
//! ```text
//! thunk/hook ──dispatch(Intent)──→ Reducer ──→ State ──→ subscribers / views
//! ```
//!
//! - **State**: the slice snapshot readers observe
//! - **Intent**: a lifecycle event of an asynchronous operation
//! - **Reducer**: the pure `(State, Intent) -> State` transition

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
