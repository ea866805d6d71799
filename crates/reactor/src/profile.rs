//! Axial heat deposition profiles and their per-node weights.

use std::f64::consts::PI;

use crate::ConfigError;

/// Axial distribution of fission heat deposited in the fuel.
///
/// Every variant resolves to one weight per node, normalized so the weights
/// sum to one. The fuel in node `j` then receives `power * weight[j]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AxialProfile {
    /// Every node receives the same share.
    #[default]
    Uniform,

    /// A chopped cosine centred on the core mid-plane, sampled at node centres:
    /// `w(z) ∝ sin(π z / H)`.
    Cosine,

    /// User-supplied relative weights, one per node.
    Custom(Vec<f64>),
}

impl AxialProfile {
    /// Resolves the profile to normalized node weights.
    pub(crate) fn weights(
        &self,
        heights: &[f64],
        total_height: f64,
    ) -> Result<Vec<f64>, ConfigError> {
        let raw = match self {
            Self::Uniform => vec![1.0; heights.len()],
            Self::Cosine => heights
                .iter()
                .map(|z| (PI * z / total_height).sin())
                .collect(),
            Self::Custom(weights) => {
                if weights.len() != heights.len() {
                    return Err(ConfigError::InvalidPowerProfile {
                        reason: "custom profile needs exactly one weight per node",
                    });
                }
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(ConfigError::InvalidPowerProfile {
                        reason: "weights must be finite and non-negative",
                    });
                }
                weights.clone()
            }
        };

        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(ConfigError::InvalidPowerProfile {
                reason: "weights must not all be zero",
            });
        }

        Ok(raw.into_iter().map(|w| w / total).collect())
    }
}
