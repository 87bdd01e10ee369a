//! Configuration for the quantizers.

use serde::{Deserialize, Serialize};

/// Default clip range half-width. Inputs are clipped to [-1, 1] before
/// quantization, matching the range of the quantized levels.
pub const DEFAULT_CLIP_VALUE: f32 = 1.0;

/// Default ternary threshold factor. The ternarizer's threshold is
/// `0.7 * mean(|x|)`, assuming roughly normally distributed weights.
pub const DEFAULT_THRESHOLD_FACTOR: f32 = 0.7;

/// Configuration shared by the quantizers.
///
/// The defaults reproduce the standard formulations:
/// - Binarizers clip to [-1, 1] and quantize to {-1, +1}.
/// - The ternarizer clips to [-1, 1] and uses threshold
///   `Δ = 0.7 * mean(|x|)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantizeConfig {
    /// Half-width of the clip range applied before quantization.
    /// Gradients are zeroed outside [-clip_value, clip_value].
    pub clip_value: f32,

    /// Factor multiplied by the mean absolute value of the clipped
    /// tensor to obtain the ternarization threshold.
    pub ternary_threshold_factor: f32,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            clip_value: DEFAULT_CLIP_VALUE,
            ternary_threshold_factor: DEFAULT_THRESHOLD_FACTOR,
        }
    }
}

impl QuantizeConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clip range half-width.
    #[must_use]
    pub const fn with_clip_value(mut self, clip_value: f32) -> Self {
        self.clip_value = clip_value;
        self
    }

    /// Set the ternary threshold factor.
    #[must_use]
    pub const fn with_ternary_threshold_factor(mut self, factor: f32) -> Self {
        self.ternary_threshold_factor = factor;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.clip_value <= 0.0 || self.clip_value.is_nan() {
            return Err(crate::QuantizeError::InvalidConfig(
                "clip_value must be > 0".to_string(),
            ));
        }

        if self.ternary_threshold_factor <= 0.0 || self.ternary_threshold_factor.is_nan() {
            return Err(crate::QuantizeError::InvalidConfig(
                "ternary_threshold_factor must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuantizeConfig::default();
        assert_eq!(config.clip_value, 1.0);
        assert_eq!(config.ternary_threshold_factor, 0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = QuantizeConfig::new()
            .with_clip_value(0.5)
            .with_ternary_threshold_factor(0.9);

        assert_eq!(config.clip_value, 0.5);
        assert_eq!(config.ternary_threshold_factor, 0.9);
    }

    #[test]
    fn test_validation() {
        let valid = QuantizeConfig::default();
        assert!(valid.validate().is_ok());

        let zero_clip = QuantizeConfig::default().with_clip_value(0.0);
        assert!(zero_clip.validate().is_err());

        let negative_factor = QuantizeConfig::default().with_ternary_threshold_factor(-0.7);
        assert!(negative_factor.validate().is_err());

        let nan_clip = QuantizeConfig::default().with_clip_value(f32::NAN);
        assert!(nan_clip.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = QuantizeConfig::new().with_ternary_threshold_factor(0.8);
        let json = serde_json::to_string(&config).unwrap();
        let restored: QuantizeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.clip_value, config.clip_value);
        assert_eq!(
            restored.ternary_threshold_factor,
            config.ternary_threshold_factor
        );
    }
}
