//! Strongly typed identifier wrappers.
//!
//! Numeric IDs are `Copy + Ord + Hash` so they can be used as map keys and
//! sorted collection elements without ceremony.  `TrainId` is the
//! caller-facing train name; `TrainIdx` is the dense registry slot it maps to.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": equivalent to `<inner>::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A track section.  Section numbers come from the track plan and need
    /// not be contiguous.
    pub struct SectionId(u32);
}

typed_id! {
    /// Slot of a train in the registry's SoA storage, assigned on admission.
    pub struct TrainIdx(u32);
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl fmt::Display for TrainIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl SectionId {
    /// Value reported through the integer query surface.
    #[inline]
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

// ── TrainId ───────────────────────────────────────────────────────────────────

/// Caller-supplied train name.  Unique and immutable once admitted.
///
/// Borrows as `str`, so maps keyed by `TrainId` can be queried with a plain
/// `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TrainId(String);

impl TrainId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for TrainId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TrainId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrainId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for TrainId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
