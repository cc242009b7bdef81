//! Diagnostic blocks: field dumps, scalars and particle binning.

use serde::{Deserialize, Serialize};

/// A `DiagFields` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagFields {
    /// Output cadence in timesteps
    pub every: u64,
}

/// A `DiagScalar` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagScalar {
    /// Output cadence in timesteps
    pub every: u64,
}

/// One histogram axis of a particle binning diagnostic.
///
/// Written as the positional tuple `[quantity, lower, upper, bins]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "AxisTuple", from = "AxisTuple")]
pub struct BinningAxis {
    /// Binned particle quantity (e.g. `ekin`, `x`, `px`)
    pub quantity: String,
    pub lower: f64,
    pub upper: f64,
    pub bins: u32,
}

type AxisTuple = (String, f64, f64, u32);

impl From<BinningAxis> for AxisTuple {
    fn from(axis: BinningAxis) -> Self {
        (axis.quantity, axis.lower, axis.upper, axis.bins)
    }
}

impl From<AxisTuple> for BinningAxis {
    fn from((quantity, lower, upper, bins): AxisTuple) -> Self {
        Self {
            quantity,
            lower,
            upper,
            bins,
        }
    }
}

impl BinningAxis {
    pub fn new(quantity: impl Into<String>, lower: f64, upper: f64, bins: u32) -> Self {
        Self {
            quantity: quantity.into(),
            lower,
            upper,
            bins,
        }
    }
}

/// A `DiagParticleBinning` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagParticleBinning {
    /// Deposited quantity (e.g. `density`, `charge_density`)
    pub output: String,

    pub every: u64,

    pub species: Vec<String>,

    pub axes: Vec<BinningAxis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_serializes_as_tuple() {
        let axis = BinningAxis::new("ekin", 0.0, 1.5, 1000);
        let json = serde_json::to_string(&axis).unwrap();
        assert_eq!(json, "[\"ekin\",0.0,1.5,1000]");

        let back: BinningAxis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, axis);
    }

    #[test]
    fn test_binning_schema() {
        let diag = DiagParticleBinning {
            output: "density".into(),
            every: 1,
            species: vec!["electron1".into()],
            axes: vec![BinningAxis::new("ekin", 0.0, 1.0, 10)],
        };
        let json = serde_json::to_value(&diag).unwrap();
        assert!(json["output"].is_string());
        assert!(json["every"].is_u64());
        assert_eq!(json["axes"][0][0], "ekin");
        assert_eq!(json["axes"][0][3], 10);
    }
}
