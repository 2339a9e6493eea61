//! Random numeric identifiers for stored images.

use std::fmt;

use rand::Rng;

/// Identifier of a stored image.
///
/// A random non-negative integer, always kept within `i64` range so the
/// decimal form never exceeds 19 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(u64);

impl ImageId {
    /// Draw a fresh random ID.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self(rng.gen_range(0..=i64::MAX as u64))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ImageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
