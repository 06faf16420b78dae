//! Error types.

/// Errors returned by the containers of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A different live object is already mapped from the same key.
    #[error("key {key} is already mapped to a different {type_name}")]
    KeyConflict {
        /// The name of the object type.
        type_name: &'static str,
        /// The `Debug` representation of the key.
        key:       String,
    },
}

/// Alias for results with this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
