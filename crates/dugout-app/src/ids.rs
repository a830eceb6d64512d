// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_id {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

newtype_id!(PlayerId, i64);
newtype_id!(RequestSeq, u64);

impl RequestSeq {
    pub const ZERO: Self = Self(0);

    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerId, RequestSeq};

    #[test]
    fn request_seq_increments_monotonically() {
        let first = RequestSeq::ZERO.next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn player_id_serializes_as_bare_integer() {
        let encoded = serde_json::to_string(&PlayerId::new(42)).expect("encode id");
        assert_eq!(encoded, "42");
    }
}
