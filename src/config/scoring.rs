//! Weights combining the three quality metrics into a single score.

use serde::{Deserialize, Serialize};

/// Quality metric weights (`[quality]` table)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    /// Weight for readability (0.0-1.0)
    #[serde(default = "default_readability_weight")]
    pub readability: f64,

    /// Weight for efficiency (0.0-1.0)
    #[serde(default = "default_efficiency_weight")]
    pub efficiency: f64,

    /// Weight for maintainability (0.0-1.0)
    #[serde(default = "default_maintainability_weight")]
    pub maintainability: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            readability: default_readability_weight(),
            efficiency: default_efficiency_weight(),
            maintainability: default_maintainability_weight(),
        }
    }
}

impl QualityWeights {
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Each weight lies in [0, 1] and at least one is positive.
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.readability, "Readability")?;
        Self::validate_weight(self.efficiency, "Efficiency")?;
        Self::validate_weight(self.maintainability, "Maintainability")?;
        if self.sum() <= 0.0 {
            return Err("At least one quality weight must be positive".to_string());
        }
        Ok(())
    }

    /// Normalize weights to ensure they sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.readability /= sum;
            self.efficiency /= sum;
            self.maintainability /= sum;
        }
    }

    /// Copy that is valid and sums to one, falling back to the defaults.
    pub fn normalized(&self) -> Self {
        if self.validate().is_err() {
            return Self::default();
        }
        let mut weights = *self;
        weights.normalize();
        weights
    }

    fn sum(&self) -> f64 {
        self.readability + self.efficiency + self.maintainability
    }
}

pub fn default_readability_weight() -> f64 {
    0.3
}

pub fn default_efficiency_weight() -> f64 {
    0.4
}

pub fn default_maintainability_weight() -> f64 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        let weights = QualityWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_rescales() {
        let mut weights = QualityWeights {
            readability: 0.5,
            efficiency: 0.5,
            maintainability: 0.5,
        };
        weights.normalize();
        assert!((weights.readability - 1.0 / 3.0).abs() < 1e-9);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_weights_fall_back() {
        let weights = QualityWeights {
            readability: 1.5,
            efficiency: 0.2,
            maintainability: 0.2,
        };
        assert!(weights.validate().is_err());
        assert_eq!(weights.normalized(), QualityWeights::default());

        let zero = QualityWeights {
            readability: 0.0,
            efficiency: 0.0,
            maintainability: 0.0,
        };
        assert_eq!(zero.normalized(), QualityWeights::default());
    }
}
