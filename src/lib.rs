#![no_std]

extern crate alloc;

pub mod bucket;
pub mod error;
pub mod hashset;
pub mod occupancy;
pub mod types;

pub use error::HashSetError;
pub use hashset::HashSet;

/// Number of buckets, one per possible 2-byte prefix.
pub const BUCKET_COUNT: usize = 1 << 16;

/// Bytes of every hash consumed by bucket selection.
pub const PREFIX_LEN: usize = 2;
