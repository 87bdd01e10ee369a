//! Quantizer implementations.
//!
//! Each quantizer pairs a forward elementwise transform with a backward
//! gradient surrogate:
//! - [`SteSign`] / [`ste_sign`]: binarize to {-1, +1}, straight-through
//!   gradient.
//! - [`ApproxSign`] / [`approx_sign`]: binarize to {-1, +1}, triangular
//!   gradient `(1 - |x|) * 2`.
//! - [`SteTern`] / [`ste_tern`]: ternarize to {-1, 0, +1} with adaptive
//!   threshold, straight-through gradient.

use candle_core::Tensor;

use crate::error::Result;

mod binary;
mod ternary;

pub use binary::{approx_sign, ste_sign, ApproxSign, SteSign};
pub use ternary::{ste_tern, SteTern};

/// A forward quantization transform paired with its gradient surrogate.
///
/// `forward` clips the input and quantizes it; the output always has the
/// same shape as the input. `backward` receives the original (pre-clip)
/// input and the upstream gradient `dy`, and returns the downstream
/// gradient of the whole clip-and-quantize chain: the quantizer's own
/// surrogate rule composed with the clip gradient, which passes values with
/// `|x| <= clip` and zeroes the rest.
///
/// Callers embedding a quantizer in a candle computation graph should
/// prefer the free functions ([`ste_sign`], [`approx_sign`], [`ste_tern`]),
/// which attach the surrogate so that `backward` is applied automatically
/// during backpropagation.
pub trait Quantizer: Send + Sync {
    /// Identifier used for serialization and registry lookup.
    fn name(&self) -> &'static str;

    /// Quantize `x`. Output shape equals input shape.
    ///
    /// # Errors
    ///
    /// Returns error if tensor operations fail.
    fn forward(&self, x: &Tensor) -> Result<Tensor>;

    /// Map the upstream gradient `dy` to the downstream gradient, given
    /// the original forward input `x`. Shapes of `x`, `dy` and the result
    /// all match.
    ///
    /// # Errors
    ///
    /// Returns error if tensor operations fail.
    fn backward(&self, x: &Tensor, dy: &Tensor) -> Result<Tensor>;
}
