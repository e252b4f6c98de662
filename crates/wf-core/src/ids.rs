//! Strongly typed, zero-cost identifier wrappers.
//!
//! Location identifiers arrive as strings (`"MainGateway"`), but inside the
//! engine every node is addressed by a dense `NodeId` assigned in dataset
//! declaration order.  The string form is kept once, in the graph, and looked
//! up only at the edges of the system (events in, notices out).

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
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
    /// Index of a location or waypoint in the graph, in declaration order.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed half-edge in the CSR adjacency arrays.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Generation number of a computed route.  Each new route issued by a
    /// session gets the next value; narration for an older route is stale.
    pub struct RouteId(u64);
}

impl RouteId {
    /// The route issued after `self`.
    #[inline]
    pub fn next(self) -> RouteId {
        RouteId(self.0.wrapping_add(1))
    }
}
