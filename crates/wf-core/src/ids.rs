//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two families live here:
//!
//! - **External ids** (`NodeId`, `WayId`) are the `i64` identifiers carried by
//!   the map data tables.  They are sparse and only meaningful as keys.
//! - **Dense indices** (`NodeIdx`, `EdgeIdx`, `WayNameId`) are positions in the
//!   graph store's arrays.  They are `u32` and index `Vec`s directly via
//!   `.index()`.
//!
//! All ids are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed dense index wrapper around a `u32`.
macro_rules! typed_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid index" (`u32::MAX`).
            pub const INVALID: $name = $name(u32::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized indices are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

/// Generate a typed wrapper around an external `i64` map identifier.
macro_rules! external_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<i64> for $name {
            #[inline(always)]
            fn from(raw: i64) -> Self {
                $name(raw)
            }
        }
    };
}

external_id! {
    /// Identifier of a map node (intersection or point of interest).
    pub struct NodeId;
}

external_id! {
    /// Identifier of a map way (polyline of nodes).
    pub struct WayId;
}

typed_index! {
    /// Position of a routable node in the graph store.  Indices follow
    /// ascending `NodeId` order, so comparing two `NodeIdx` compares the ids.
    pub struct NodeIdx;
}

typed_index! {
    /// Position of a directed half-edge in the CSR edge arrays.
    pub struct EdgeIdx;
}

typed_index! {
    /// Position of a way name in the graph's alphabetically sorted name table.
    pub struct WayNameId;
}
