use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How new monthly savings are split across asset classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Fixed split by target percentages
    #[default]
    Dca,
    /// Fund underweight classes in proportion to their gap
    Smart,
    /// Like `Smart`, then favour lagging holdings inside each class
    Active,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Dca, Strategy::Smart, Strategy::Active];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Dca => "dca",
            Strategy::Smart => "smart",
            Strategy::Active => "active",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}' (expected dca, smart or active)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
