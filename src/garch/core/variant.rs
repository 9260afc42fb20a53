//! GARCH-family variant selector.
//!
//! A single tagged enum replaces per-model types: every routine in
//! `garch::core` dispatches on [`GarchVariant`] for its parameter layout,
//! recursion, and forecast rule.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::garch::errors::GarchError;

/// The three supported conditional-variance specifications, all of order
/// (1, 1) with a constant mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GarchVariant {
    /// Symmetric GARCH(1,1): `σ²_t = ω + α ε²_{t−1} + β σ²_{t−1}`.
    #[serde(rename = "GARCH11")]
    Garch,
    /// Exponential GARCH(1,1) on `ln σ²_t`.
    #[serde(rename = "EGARCH")]
    Egarch,
    /// Threshold GARCH(1,1) with a leverage term on negative shocks.
    #[serde(rename = "GJRGARCH")]
    GjrGarch,
}

impl GarchVariant {
    /// All variants in reporting order.
    pub const ALL: [GarchVariant; 3] =
        [GarchVariant::Garch, GarchVariant::Egarch, GarchVariant::GjrGarch];

    /// Model identifier used in forecast records and evaluation rows.
    pub fn name(self) -> &'static str {
        match self {
            GarchVariant::Garch => "GARCH11",
            GarchVariant::Egarch => "EGARCH",
            GarchVariant::GjrGarch => "GJRGARCH",
        }
    }

    /// Number of free parameters including the mean `μ`.
    pub fn n_params(self) -> usize {
        match self {
            GarchVariant::Garch => 4,
            GarchVariant::Egarch | GarchVariant::GjrGarch => 5,
        }
    }

    /// Whether the variant carries an asymmetry parameter `γ`.
    pub fn has_gamma(self) -> bool {
        !matches!(self, GarchVariant::Garch)
    }
}

impl fmt::Display for GarchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GarchVariant {
    type Err = GarchError;

    /// Accepts the model identifiers plus common spellings, case-insensitive:
    /// `GARCH11`/`GARCH`, `EGARCH`, `GJRGARCH`/`GJR-GARCH`/`GJR`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String =
            s.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>().to_lowercase();
        match key.as_str() {
            "garch" | "garch11" => Ok(GarchVariant::Garch),
            "egarch" | "egarch11" => Ok(GarchVariant::Egarch),
            "gjr" | "gjrgarch" | "gjrgarch11" => Ok(GarchVariant::GjrGarch),
            _ => Err(GarchError::UnknownVariant { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_identifiers_and_spellings() {
        assert_eq!("GARCH11".parse::<GarchVariant>().unwrap(), GarchVariant::Garch);
        assert_eq!("egarch".parse::<GarchVariant>().unwrap(), GarchVariant::Egarch);
        assert_eq!("GJR-GARCH".parse::<GarchVariant>().unwrap(), GarchVariant::GjrGarch);
        assert!(matches!(
            "ARCH".parse::<GarchVariant>(),
            Err(GarchError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn name_round_trips_through_from_str_and_serde() {
        for v in GarchVariant::ALL {
            assert_eq!(v.name().parse::<GarchVariant>().unwrap(), v);
            let json = serde_json::to_string(&v).unwrap();
            assert_eq!(json, format!("\"{}\"", v.name()));
        }
    }
}
