use alloc::vec::Vec;

/// Fixed-width payloads packed back to back, kept sorted ascending and unique.
///
/// The width is owned by the enclosing set and passed into every call; a bucket only
/// stores bytes.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Bucket {
    bytes: Vec<u8>,
}

impl Bucket {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Number of payloads stored. Zero-width buckets never hold bytes.
    #[inline]
    pub fn len(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        self.bytes.len() / width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    fn slot(&self, index: usize, width: usize) -> &[u8] {
        let offset = index * width;
        &self.bytes[offset..offset + width]
    }

    /// Lower-bound binary search for `payload`.
    ///
    /// `Ok(slot)` when an equal payload is stored at `slot`, otherwise `Err(slot)` where
    /// `slot` is the first payload greater than `payload` (or the end of the bucket).
    pub fn search(&self, payload: &[u8], width: usize) -> Result<usize, usize> {
        let slots = self.len(width);
        let (mut lo, mut hi) = (0, slots);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.slot(mid, width) < payload {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        if lo < slots && self.slot(lo, width) == payload {
            Ok(lo)
        } else {
            Err(lo)
        }
    }

    #[inline]
    pub fn contains(&self, payload: &[u8], width: usize) -> bool {
        self.search(payload, width).is_ok()
    }

    /// Stores `payload` at its sorted position. Returns `false` if it was already present.
    pub fn insert(&mut self, payload: &[u8], width: usize) -> bool {
        debug_assert!(width > 0);
        debug_assert_eq!(payload.len(), width);

        match self.search(payload, width) {
            Ok(_) => false,
            Err(slot) => {
                let offset = slot * width;
                self.bytes.extend_from_slice(payload);
                self.bytes[offset..].rotate_right(width);
                true
            }
        }
    }

    pub fn iter(&self, width: usize) -> Payloads<'_> {
        Payloads::new(&self.bytes, width, self.len(width))
    }

    pub fn heap_bytes(&self) -> usize {
        self.bytes.capacity()
    }
}

/// Iterator over the payloads of one bucket, in stored order.
#[derive(Clone, Debug)]
pub struct Payloads<'a> {
    bytes: &'a [u8],
    width: usize,
    remaining: usize,
}

impl<'a> Payloads<'a> {
    pub(crate) fn new(bytes: &'a [u8], width: usize, remaining: usize) -> Self {
        Self {
            bytes,
            width,
            remaining,
        }
    }
}

impl<'a> Iterator for Payloads<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (head, tail) = self.bytes.split_at(self.width);
        self.bytes = tail;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Payloads<'_> {}
