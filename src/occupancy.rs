use alloc::boxed::Box;

use crate::{BUCKET_COUNT, types::BucketIndex};

const WORDS: usize = BUCKET_COUNT / 64;

/// One bit per bucket, set once the bucket holds an entry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Occupancy {
    words: Box<[u64; WORDS]>,
}

impl Default for Occupancy {
    fn default() -> Self {
        Self::new()
    }
}

impl Occupancy {
    #[inline]
    pub fn new() -> Self {
        Self {
            words: Box::new([0; WORDS]),
        }
    }

    /// Marks `index` as occupied, returning `true` if it was previously clear.
    #[inline]
    pub fn insert(&mut self, index: BucketIndex) -> bool {
        let (word, bit) = Self::locate(index);
        let was_clear = self.words[word] & bit == 0;
        self.words[word] |= bit;
        was_clear
    }

    #[inline]
    pub fn is_member(&self, index: BucketIndex) -> bool {
        let (word, bit) = Self::locate(index);
        self.words[word] & bit != 0
    }

    /// Occupied buckets in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words[..],
            base: 0,
            current: self.words[0],
        }
    }

    #[inline]
    fn locate(index: BucketIndex) -> (usize, u64) {
        let value = index.as_usize();
        (value >> 6, 1u64 << (value & 0x3f))
    }
}

pub struct Iter<'a> {
    words: &'a [u64],
    base: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = BucketIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.base += 1;
            self.current = *self.words.get(self.base)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        // clear lowest set bit
        self.current &= self.current - 1;
        Some(BucketIndex::from((self.base * 64 + bit) as u16))
    }
}
