use alloc::{boxed::Box, vec, vec::Vec};
use core::{fmt, mem::size_of};

use crate::{
    BUCKET_COUNT, PREFIX_LEN,
    bucket::{Bucket, Payloads},
    error::HashSetError,
    occupancy::{self, Occupancy},
    types::BucketIndex,
};

/// A set of fixed-length binary hashes.
///
/// Hashes are spread over 65,536 buckets by their first two bytes (big-endian). Each
/// bucket keeps the remaining bytes of its hashes packed in one sorted buffer, so a lookup
/// is a direct bucket index followed by a binary search.
///
/// The hash length is fixed by the first hash added (or by [`HashSet::with_hash_len`]) and
/// can't change afterwards. Adding a hash of any other length is a caller bug: [`HashSet::add`]
/// panics, [`HashSet::try_add`] returns [`HashSetError`].
///
/// Pass raw hash bytes, not a hex encoding; hex works but doubles the memory.
#[derive(Clone)]
pub struct HashSet {
    buckets: Box<[Bucket]>,
    occupied: Occupancy,
    // 0 until the first hash fixes it
    hash_len: usize,
    len: usize,
}

impl Default for HashSet {
    fn default() -> Self {
        Self {
            buckets: vec![Bucket::new(); BUCKET_COUNT].into_boxed_slice(),
            occupied: Occupancy::new(),
            hash_len: 0,
            len: 0,
        }
    }
}

impl HashSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set that only accepts `hash_len`-byte hashes.
    ///
    /// # Panics
    ///
    /// If `hash_len` is shorter than the 2-byte bucket prefix.
    pub fn with_hash_len(hash_len: usize) -> Self {
        if hash_len < PREFIX_LEN {
            panic!("{}", HashSetError::TooShort { len: hash_len });
        }
        let mut set = Self::new();
        set.hash_len = hash_len;
        set
    }

    /// Adds `hash`, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// If `hash` differs in length from the hashes already in the set, or if it is the
    /// first hash and is shorter than 2 bytes.
    pub fn add(&mut self, hash: &[u8]) -> bool {
        match self.try_add(hash) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Adds `hash`, reporting a length mismatch instead of panicking.
    pub fn try_add(&mut self, hash: &[u8]) -> Result<bool, HashSetError> {
        self.check_len(hash)?;
        let (index, payload) =
            BucketIndex::split(hash).ok_or(HashSetError::TooShort { len: hash.len() })?;

        if self.hash_len == 0 {
            self.hash_len = hash.len();
            log::debug!("hash set fixed to {}-byte hashes", self.hash_len);
        }

        let width = payload.len();
        let inserted = if width == 0 {
            self.occupied.insert(index)
        } else if self.buckets[index.as_usize()].insert(payload, width) {
            self.occupied.insert(index);
            true
        } else {
            false
        };

        if inserted {
            self.len += 1;
            log::trace!("stored hash in bucket {:#06x}", u16::from(index));
        }
        Ok(inserted)
    }

    fn check_len(&self, hash: &[u8]) -> Result<(), HashSetError> {
        if self.hash_len == 0 {
            if hash.len() < PREFIX_LEN {
                return Err(HashSetError::TooShort { len: hash.len() });
            }
        } else if hash.len() != self.hash_len {
            return Err(HashSetError::InconsistentLength {
                expected: self.hash_len,
                found: hash.len(),
            });
        }
        Ok(())
    }

    /// Returns `true` if `hash` was added to the set.
    ///
    /// Never fails: an empty set, or a hash of the wrong length, simply isn't contained.
    pub fn contains(&self, hash: &[u8]) -> bool {
        if self.hash_len == 0 || hash.len() != self.hash_len {
            return false;
        }
        let Some((index, payload)) = BucketIndex::split(hash) else {
            return false;
        };
        if payload.is_empty() {
            return self.occupied.is_member(index);
        }
        let bucket = &self.buckets[index.as_usize()];
        !bucket.is_empty() && bucket.contains(payload, payload.len())
    }

    /// Number of distinct hashes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The fixed hash length, once known.
    #[inline]
    pub fn hash_len(&self) -> Option<usize> {
        (self.hash_len != 0).then_some(self.hash_len)
    }

    /// Bytes stored per hash inside a bucket (hash length minus the prefix).
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.hash_len.saturating_sub(PREFIX_LEN)
    }

    /// Payloads of the bucket selected by `prefix`, in ascending order.
    pub fn bucket(&self, prefix: u16) -> Payloads<'_> {
        let index = BucketIndex::from(prefix);
        match self.payload_len() {
            0 => Payloads::new(&[], 0, self.occupied.is_member(index) as usize),
            width => self.buckets[index.as_usize()].iter(width),
        }
    }

    /// All stored hashes in ascending byte order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            occupied: self.occupied.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Heap memory held by the set: the bucket table, the occupancy bitmap and every
    /// bucket buffer's capacity.
    pub fn heap_bytes(&self) -> usize {
        let table = BUCKET_COUNT * size_of::<Bucket>();
        let bitmap = BUCKET_COUNT / 8;
        table + bitmap + self.buckets.iter().map(Bucket::heap_bytes).sum::<usize>()
    }
}

pub struct Iter<'a> {
    set: &'a HashSet,
    occupied: occupancy::Iter<'a>,
    current: Option<(BucketIndex, Payloads<'a>)>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((index, payloads)) = &mut self.current {
                if let Some(payload) = payloads.next() {
                    self.remaining -= 1;
                    let mut hash = Vec::with_capacity(PREFIX_LEN + payload.len());
                    hash.extend_from_slice(&index.prefix());
                    hash.extend_from_slice(payload);
                    return Some(hash);
                }
            }
            let index = self.occupied.next()?;
            self.current = Some((index, self.set.bucket(u16::from(index))));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl fmt::Debug for HashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: AsRef<[u8]>> Extend<T> for HashSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for hash in iter {
            self.add(hash.as_ref());
        }
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for HashSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
