//! Error types for the `hashset` crate

/// Misuse of a [`crate::HashSet`] detected while adding a hash.
///
/// [`crate::HashSet::add`] panics with this error's message; [`crate::HashSet::try_add`]
/// returns it. Either way the set is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HashSetError {
    /// The hash length differs from the length fixed by the first hash in the set.
    #[error("inconsistent hash length: set holds {expected}-byte hashes, got {found} bytes")]
    InconsistentLength { expected: usize, found: usize },

    /// A hash must be at least as long as the 2-byte bucket prefix.
    #[error("hash of {len} bytes is shorter than the 2-byte bucket prefix")]
    TooShort { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_both_lengths() {
        let err = HashSetError::InconsistentLength {
            expected: 32,
            found: 20,
        };
        assert_eq!(
            err.to_string(),
            "inconsistent hash length: set holds 32-byte hashes, got 20 bytes"
        );
        assert_eq!(
            HashSetError::TooShort { len: 1 }.to_string(),
            "hash of 1 bytes is shorter than the 2-byte bucket prefix"
        );
    }
}
