//! Newtype identifiers for domain entities.
//!
//! Each ID wraps a plain `usize` so stockpile, engine, input, and output
//! indices can't be swapped for one another at compile time. Serialization
//! is transparent so problem JSON files keep using bare integers.

use serde::{Deserialize, Serialize};

macro_rules! newtype_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            #[inline]
            pub fn new(value: usize) -> Self {
                $name(value)
            }

            #[inline]
            pub fn value(&self) -> usize {
                self.0
            }
        }
    };
}

newtype_id!(StockpileId);
newtype_id!(EngineId);
newtype_id!(InputId);
newtype_id!(OutputId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_value() {
        let id = StockpileId::new(3);
        assert_eq!(id.value(), 3);
    }

    #[test]
    fn test_distinct_types_dont_mix() {
        let s = StockpileId::new(1);
        let e = EngineId::new(1);
        assert_eq!(s.value(), e.value());
    }
}
