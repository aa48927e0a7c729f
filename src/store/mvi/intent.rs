/// Marker trait for events dispatched to a store.
///
/// Intents are cloned once per dispatch so subscribers can observe the
/// event after the reducer has consumed it.
pub trait Intent: Clone + Send + Sync + 'static {}
