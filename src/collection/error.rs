//! Errors raised by [`HeightmapCollection`](super::HeightmapCollection).
//!
//! All of them are caller-input errors: the operation is rejected before
//! anything is mutated, so the collection is left exactly as it was.

/// Errors that can occur when building or editing a heightmap collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A required field of the collection description was not provided.
    #[error("description.{0} is required")]
    MissingArgument(&'static str),

    /// The layer is already registered in this collection.
    #[error("the layer already exists in the collection")]
    DuplicatePayload,

    /// The index lies outside the range accepted by the operation.
    #[error("index {index} must be between 0 and {max}")]
    OutOfRange { index: i64, max: usize },

    /// The index is negative where a non-negative one is required.
    #[error("the index must be positive, got {0}")]
    NegativeIndex(i64),

    /// Nothing to remove.
    #[error("the collection is empty")]
    EmptyCollection,

    /// The physical position does not point at the start of an entry.
    #[error("position {0} does not correspond to the start of an entry")]
    MisalignedIndex(i64),
}

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        assert_eq!(
            CollectionError::MissingArgument("heightmaps").to_string(),
            "description.heightmaps is required"
        );
        assert_eq!(
            CollectionError::OutOfRange { index: 12, max: 9 }.to_string(),
            "index 12 must be between 0 and 9"
        );
        assert_eq!(
            CollectionError::MisalignedIndex(4).to_string(),
            "position 4 does not correspond to the start of an entry"
        );
    }
}
