//! Elementwise sign primitives shared by the quantizers.

use candle_core::{DType, Tensor};

use crate::error::Result;

/// A sign function that is never zero.
///
/// Computes `sign(sign(x) + 0.1)`: the inner sign yields {-1, 0, +1}, the
/// bias pushes the zero case to +1 and leaves nonzero inputs unchanged.
/// Output is elementwise in {-1, +1}, with `x == 0` mapped to +1.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn binary_sign(x: &Tensor) -> Result<Tensor> {
    Ok(x.sign()?.affine(1.0, 0.1)?.sign()?)
}

/// Three-level quantization rule: `sign(sign(x + Δ) + sign(x - Δ))`.
///
/// Uses the plain (zero-producing) sign, not [`binary_sign`]: elements with
/// `|x| <= Δ` map to a genuine 0, representing "no weight". Yields +1 for
/// `x > Δ`, 0 for `-Δ <= x <= Δ`, -1 for `x < -Δ`.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn tern(x: &Tensor, threshold: f64) -> Result<Tensor> {
    let hi = x.affine(1.0, threshold)?.sign()?;
    let lo = x.affine(1.0, -threshold)?.sign()?;
    Ok((hi + lo)?.sign()?)
}

/// Mean absolute value of the whole tensor, as a scalar.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn abs_mean(x: &Tensor) -> Result<f64> {
    let mean = x
        .abs()?
        .mean_all()?
        .to_dtype(DType::F32)?
        .to_scalar::<f32>()?;
    Ok(f64::from(mean))
}

/// Elementwise indicator of `|x| <= clip`, as a detached tensor of 0/1
/// values in the input's dtype. This is the clip operation's gradient.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn clip_mask(x: &Tensor, clip: f64) -> Result<Tensor> {
    Ok(x.abs()?.le(clip)?.to_dtype(x.dtype())?.detach())
}
