//! Binarization quantizers: STE sign and ApproxSign.

use candle_core::Tensor;

use crate::config::{QuantizeConfig, DEFAULT_CLIP_VALUE};
use crate::error::Result;
use crate::ops::{binary_sign, clip_mask};
use crate::quantizer::Quantizer;

/// Binarize with the straight-through estimator, attached to the graph.
///
/// Forward: clip to [-1, 1], then `sign` (never zero, 0 maps to +1).
/// Backward: gradients pass through unchanged where `|x| <= 1` and are
/// zeroed outside, via the detach-residual trick: the quantized value is
/// detached and a masked `x - x.detach()` residual carries the gradient.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn ste_sign(x: &Tensor) -> Result<Tensor> {
    let clip = f64::from(DEFAULT_CLIP_VALUE);
    let q = binary_sign(&x.clamp(-clip, clip)?)?;
    let residual = ((x - &x.detach())? * clip_mask(x, clip)?)?;
    Ok((q.detach() + residual)?)
}

/// Binarize with the ApproxSign gradient, attached to the graph.
///
/// Forward is identical to [`ste_sign`]. Backward multiplies the upstream
/// gradient by `(1 - |x_c|) * 2` where `x_c` is the clipped input: a
/// triangular surrogate that peaks at 2 for x = 0 and vanishes at |x| >= 1.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn approx_sign(x: &Tensor) -> Result<Tensor> {
    let clip = f64::from(DEFAULT_CLIP_VALUE);
    let xc = x.clamp(-clip, clip)?;
    let q = binary_sign(&xc)?;
    // (1 - |x_c|) * 2 == 2 - 2|x_c|; already 0 outside the clip range.
    let weight = xc.abs()?.affine(-2.0, 2.0)?.detach();
    let residual = ((x - &x.detach())? * weight)?;
    Ok((q.detach() + residual)?)
}

/// Sign binarizer with straight-through gradient.
#[derive(Debug, Clone)]
pub struct SteSign {
    clip_value: f64,
}

impl SteSign {
    /// Binarizer with the default [-1, 1] clip range.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip_value: f64::from(DEFAULT_CLIP_VALUE),
        }
    }

    /// Binarizer with the clip range taken from `config`.
    #[must_use]
    pub fn with_config(config: &QuantizeConfig) -> Self {
        Self {
            clip_value: f64::from(config.clip_value),
        }
    }
}

impl Default for SteSign {
    fn default() -> Self {
        Self::new()
    }
}

impl Quantizer for SteSign {
    fn name(&self) -> &'static str {
        "ste_sign"
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        binary_sign(&x.clamp(-self.clip_value, self.clip_value)?)
    }

    fn backward(&self, x: &Tensor, dy: &Tensor) -> Result<Tensor> {
        Ok((dy * clip_mask(x, self.clip_value)?)?)
    }
}

/// Sign binarizer with the ApproxSign triangular gradient.
#[derive(Debug, Clone)]
pub struct ApproxSign {
    clip_value: f64,
}

impl ApproxSign {
    /// Binarizer with the default [-1, 1] clip range.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip_value: f64::from(DEFAULT_CLIP_VALUE),
        }
    }

    /// Binarizer with the clip range taken from `config`.
    #[must_use]
    pub fn with_config(config: &QuantizeConfig) -> Self {
        Self {
            clip_value: f64::from(config.clip_value),
        }
    }
}

impl Default for ApproxSign {
    fn default() -> Self {
        Self::new()
    }
}

impl Quantizer for ApproxSign {
    fn name(&self) -> &'static str {
        "approx_sign"
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        binary_sign(&x.clamp(-self.clip_value, self.clip_value)?)
    }

    fn backward(&self, x: &Tensor, dy: &Tensor) -> Result<Tensor> {
        let xc = x.clamp(-self.clip_value, self.clip_value)?;
        let weight = xc.abs()?.affine(-2.0, 2.0)?;
        let mask = clip_mask(x, self.clip_value)?;
        Ok(((dy * weight)? * mask)?)
    }
}
