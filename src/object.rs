use crate::GridRef;

/// An object that can be stored in the containers of this crate.
///
/// Implementors embed exactly one [`GridRef<Self>`](GridRef)
/// and should normally use [`#[derive(GridObject)]`](macro@crate::GridObject)
/// instead of implementing this trait manually.
pub trait GridObject: Sized + 'static {
    /// Returns the back-reference embedded in this object.
    fn grid_ref(&self) -> &GridRef<Self>;

    /// Whether this object currently counts as an active object of a [`Grid`](crate::Grid).
    ///
    /// The predicate is only evaluated when the object is added to a grid.
    /// Defaults to `false`.
    fn is_active_object(&self) -> bool { false }
}
