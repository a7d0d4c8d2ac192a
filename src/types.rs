use crate::PREFIX_LEN;

/// Bucket selected by a hash's first two bytes, read big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketIndex(u16);

impl From<u16> for BucketIndex {
    fn from(prefix: u16) -> Self {
        Self(prefix)
    }
}

impl From<BucketIndex> for u16 {
    fn from(index: BucketIndex) -> Self {
        index.0
    }
}

impl BucketIndex {
    /// Splits a hash into its bucket index and the payload stored inside the bucket.
    ///
    /// Returns `None` for values shorter than the prefix.
    #[inline]
    pub fn split(hash: &[u8]) -> Option<(Self, &[u8])> {
        let (prefix, payload) = hash.split_first_chunk::<PREFIX_LEN>()?;
        Some((Self(u16::from_be_bytes(*prefix)), payload))
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn prefix(self) -> [u8; PREFIX_LEN] {
        self.0.to_be_bytes()
    }
}
