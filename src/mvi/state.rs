//! Base trait for slice state.

/// Marker trait for slice values held by the store.
///
/// Slices should be:
/// - Immutable snapshots (Clone to hand out copies)
/// - Self-contained (everything a view needs to render)
/// - Comparable (PartialEq for change detection and tests)
pub trait SliceState: Clone + PartialEq + Default + Send + 'static {}
