use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shaping discipline, selected once at construction.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Discrete drain: buffered content leaks a fixed amount per explicit tick.
    Leaky,
    /// Continuous refill: admissions spend credit regenerated from elapsed time.
    Token,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leaky => "leaky",
            Self::Token => "token",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "leaky" | "leaky-bucket" => Ok(Self::Leaky),
            "token" | "token-bucket" => Ok(Self::Token),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}
