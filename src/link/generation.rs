//! Tracks the number of times a collection slot has been vacated,
//! used for distinguishing stale links from live ones.

/// The number of times the same slot has been vacated.
///
/// A link records the generation of its slot at the time it was occupied.
/// Once the slot is vacated (by an unlink or a bulk clear), its generation is bumped,
/// so any link still holding the old generation is recognized as stale.
///
/// The counter wraps around on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generation(u32);

impl Generation {
    /// Returns the generation following this one.
    #[must_use]
    pub fn next(self) -> Self { Self(self.0.wrapping_add(1)) }

    /// Returns the raw counter value.
    pub fn get(self) -> u32 { self.0 }
}
