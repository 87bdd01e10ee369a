//! Binarization and ternarization quantizers for quantization-aware
//! training.
//!
//! A quantizer pairs a forward elementwise transform with a gradient
//! surrogate for the backward pass, since the true derivative of a
//! sign/threshold function is zero almost everywhere and unusable for
//! gradient-based optimization.
//!
//! # Quantizers
//!
//! - **`ste_sign`**: binarize to {-1, +1}; straight-through gradient
//!   (identity inside the [-1, 1] clip range, zero outside).
//! - **`approx_sign`**: binarize to {-1, +1}; triangular gradient
//!   `(1 - |x|) * 2`, smoother near the origin and vanishing at x = ±1.
//! - **`ste_tern`**: ternarize to {-1, 0, +1} with adaptive threshold
//!   `Δ = 0.7 * mean(|x|)`; straight-through gradient.
//!
//! All binarizers share a sign primitive that is never zero
//! (`sign(sign(x) + 0.1)`, mapping x = 0 to +1); the ternarizer's inner
//! rule deliberately uses the plain sign so a genuine 0 ("no weight") can
//! be produced.
//!
//! # Quick start
//!
//! ```ignore
//! use bnn_quantize::{ste_sign, QuantizerRegistry};
//! use candle_core::{Device, Tensor};
//!
//! let device = Device::Cpu;
//! let weight = Tensor::randn(0.0f32, 1.0, (512, 256), &device)?;
//!
//! // Drop-in forward transform; the surrogate gradient is applied
//! // automatically during backpropagation.
//! let binarized = ste_sign(&weight)?;
//!
//! // Resolve quantizers by name, e.g. from a model config.
//! let registry = QuantizerRegistry::with_builtins();
//! let quantizer = registry.deserialize("ste_tern")?;
//! let ternarized = quantizer.forward(&weight)?;
//! ```
//!
//! # Gradient surrogates
//!
//! The free functions wire the surrogate into candle's autograd with a
//! detach-residual composition: the quantized value is detached and a
//! residual of matching forward value zero carries the surrogate
//! gradient. The [`Quantizer`] trait exposes the same pairing explicitly
//! as `forward(x)` / `backward(x, dy)` for engines that compose gradients
//! themselves.
//!
//! # References
//!
//! - "Binarized Neural Networks: Training Deep Neural Networks with
//!   Weights and Activations Constrained to +1 or -1"
//!   <https://arxiv.org/abs/1602.02830>
//! - "Bi-Real Net: Enhancing the Performance of 1-bit CNNs"
//!   <https://arxiv.org/abs/1808.00278>
//! - "Ternary Weight Networks" <https://arxiv.org/abs/1605.04711>

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

mod config;
mod error;
pub mod ops;
pub mod quantizer;
pub mod registry;

pub use config::{QuantizeConfig, DEFAULT_CLIP_VALUE, DEFAULT_THRESHOLD_FACTOR};
pub use error::{QuantizeError, Result};
pub use quantizer::{approx_sign, ste_sign, ste_tern, ApproxSign, Quantizer, SteSign, SteTern};
pub use registry::{serialize, QuantizerId, QuantizerRegistry};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::QuantizeConfig;
    pub use crate::error::{QuantizeError, Result};
    pub use crate::quantizer::{approx_sign, ste_sign, ste_tern, Quantizer};
    pub use crate::registry::QuantizerRegistry;
}
