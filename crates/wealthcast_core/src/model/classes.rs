//! Asset classes and per-class value maps
//!
//! Every per-class quantity in the engine (bucket values, cost basis,
//! targets, yields, allocations) is a [`ClassValues`]: a fixed array with one
//! slot per [`AssetClass`]. The key set is therefore identical everywhere and
//! can never grow or shrink during a projection.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::lenient::{Lenient, finite_or_zero};

/// Broad asset class used for bucketing, targets, and yields
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum AssetClass {
    Stock,
    Crypto,
    Metal,
    Cash,
    RealEstate,
    /// Catch-all, also used for any tag the engine does not recognise
    #[default]
    Other,
}

impl AssetClass {
    pub const COUNT: usize = 6;

    pub const ALL: [AssetClass; Self::COUNT] = [
        AssetClass::Stock,
        AssetClass::Crypto,
        AssetClass::Metal,
        AssetClass::Cash,
        AssetClass::RealEstate,
        AssetClass::Other,
    ];

    /// Classes that can receive new monthly savings.
    pub const INVESTABLE: [AssetClass; 4] = [
        AssetClass::Stock,
        AssetClass::Crypto,
        AssetClass::Metal,
        AssetClass::Cash,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_investable(self) -> bool {
        Self::INVESTABLE.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetClass::Stock => "stock",
            AssetClass::Crypto => "crypto",
            AssetClass::Metal => "metal",
            AssetClass::Cash => "cash",
            AssetClass::RealEstate => "real_estate",
            AssetClass::Other => "other",
        }
    }

    /// Map a free-form tag onto a class. Unknown tags land in `Other`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "stock" | "stocks" | "etf" | "equity" => AssetClass::Stock,
            "crypto" | "cryptocurrency" => AssetClass::Crypto,
            "metal" | "metals" | "gold" | "silver" => AssetClass::Metal,
            "cash" | "savings" => AssetClass::Cash,
            "realestate" | "property" => AssetClass::RealEstate,
            _ => AssetClass::Other,
        }
    }
}

impl From<String> for AssetClass {
    fn from(tag: String) -> Self {
        AssetClass::from_tag(&tag)
    }
}

impl From<AssetClass> for &'static str {
    fn from(class: AssetClass) -> Self {
        class.as_str()
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `f64` per asset class.
///
/// Serialized as a map keyed by class tag. On input, unknown keys are folded
/// into `other` and unreadable values become `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    from = "FxHashMap<AssetClass, Lenient>",
    into = "BTreeMap<AssetClass, f64>"
)]
pub struct ClassValues([f64; AssetClass::COUNT]);

impl ClassValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(class, value)` pairs, summing repeated classes.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (AssetClass, f64)>) -> Self {
        let mut values = Self::new();
        for (class, value) in pairs {
            values[class] += finite_or_zero(value);
        }
        values
    }

    #[inline]
    pub fn get(&self, class: AssetClass) -> f64 {
        self.0[class.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        AssetClass::ALL.iter().map(|&class| (class, self.get(class)))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Sum over [`AssetClass::INVESTABLE`] only.
    pub fn investable_total(&self) -> f64 {
        AssetClass::INVESTABLE.iter().map(|&c| self.get(c)).sum()
    }

    /// Apply `f` to every slot.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(AssetClass, f64) -> f64) -> Self {
        let mut out = *self;
        for class in AssetClass::ALL {
            out[class] = f(class, self.get(class));
        }
        out
    }

    /// Slot-wise sum.
    #[must_use]
    pub fn plus(&self, other: &ClassValues) -> Self {
        self.map(|class, v| v + other.get(class))
    }
}

impl Index<AssetClass> for ClassValues {
    type Output = f64;

    fn index(&self, class: AssetClass) -> &f64 {
        &self.0[class.index()]
    }
}

impl IndexMut<AssetClass> for ClassValues {
    fn index_mut(&mut self, class: AssetClass) -> &mut f64 {
        &mut self.0[class.index()]
    }
}

impl FromIterator<(AssetClass, f64)> for ClassValues {
    fn from_iter<T: IntoIterator<Item = (AssetClass, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

impl From<FxHashMap<AssetClass, Lenient>> for ClassValues {
    fn from(map: FxHashMap<AssetClass, Lenient>) -> Self {
        Self::from_pairs(map.into_iter().map(|(class, v)| (class, v.0)))
    }
}

impl From<ClassValues> for BTreeMap<AssetClass, f64> {
    fn from(values: ClassValues) -> Self {
        values.iter().collect()
    }
}
