/// Marker trait for store slices.
///
/// `Clone` hands out snapshots, `PartialEq` lets callers detect changes and
/// `Default` is the slice's initial value.
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}
