//! Ternarization quantizer with adaptive threshold.

use candle_core::Tensor;

use crate::config::{QuantizeConfig, DEFAULT_CLIP_VALUE, DEFAULT_THRESHOLD_FACTOR};
use crate::error::Result;
use crate::ops::{abs_mean, clip_mask, tern};
use crate::quantizer::Quantizer;

/// Ternarize with the straight-through estimator, attached to the graph.
///
/// Forward: clip to [-1, 1], compute the threshold `Δ = 0.7 * mean(|x_c|)`
/// over the whole clipped tensor, then quantize each element to
/// {-1, 0, +1}: +1 above Δ, -1 below -Δ, 0 in between. Δ is recomputed on
/// every call from the clipped tensor's statistics; an all-zero input gives
/// Δ = 0 and an all-zero output.
///
/// Backward: straight-through, gradients pass unchanged where `|x| <= 1`.
///
/// # Errors
///
/// Returns error if tensor operations fail.
pub fn ste_tern(x: &Tensor) -> Result<Tensor> {
    let clip = f64::from(DEFAULT_CLIP_VALUE);
    let xc = x.clamp(-clip, clip)?;
    let threshold = f64::from(DEFAULT_THRESHOLD_FACTOR) * abs_mean(&xc)?;
    let q = tern(&xc, threshold)?;
    let residual = ((x - &x.detach())? * clip_mask(x, clip)?)?;
    Ok((q.detach() + residual)?)
}

/// Ternarizer with adaptive threshold and straight-through gradient.
#[derive(Debug, Clone)]
pub struct SteTern {
    clip_value: f64,
    threshold_factor: f64,
}

impl SteTern {
    /// Ternarizer with the default clip range and threshold factor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip_value: f64::from(DEFAULT_CLIP_VALUE),
            threshold_factor: f64::from(DEFAULT_THRESHOLD_FACTOR),
        }
    }

    /// Ternarizer with clip range and threshold factor taken from `config`.
    #[must_use]
    pub fn with_config(config: &QuantizeConfig) -> Self {
        Self {
            clip_value: f64::from(config.clip_value),
            threshold_factor: f64::from(config.ternary_threshold_factor),
        }
    }
}

impl Default for SteTern {
    fn default() -> Self {
        Self::new()
    }
}

impl Quantizer for SteTern {
    fn name(&self) -> &'static str {
        "ste_tern"
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let xc = x.clamp(-self.clip_value, self.clip_value)?;
        let threshold = self.threshold_factor * abs_mean(&xc)?;
        tern(&xc, threshold)
    }

    fn backward(&self, x: &Tensor, dy: &Tensor) -> Result<Tensor> {
        Ok((dy * clip_mask(x, self.clip_value)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{Device, Var};

    #[test]
    fn uniform_input_quantizes_to_plus_one() {
        let dev = Device::Cpu;
        // mean(|x|) = 0.1, Δ = 0.07; 0.1 > 0.07 everywhere.
        let x = Tensor::new(&[0.1f32, 0.1, 0.1, 0.1], &dev).unwrap();
        let q: Vec<f32> = ste_tern(&x).unwrap().to_vec1().unwrap();
        assert_eq!(q, vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn zero_input_stays_zero() {
        let dev = Device::Cpu;
        let x = Tensor::new(&[0.0f32, 0.0, 0.0, 0.0], &dev).unwrap();
        let q: Vec<f32> = ste_tern(&x).unwrap().to_vec1().unwrap();
        assert_eq!(q, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn saturated_input_keeps_signs() {
        let dev = Device::Cpu;
        // mean(|x|) = 1, Δ = 0.7; every element clears the threshold.
        let x = Tensor::new(&[-1.0f32, -1.0, 1.0, 1.0], &dev).unwrap();
        let q: Vec<f32> = ste_tern(&x).unwrap().to_vec1().unwrap();
        assert_eq!(q, vec![-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn small_values_zeroed_by_threshold() {
        let dev = Device::Cpu;
        // mean(|x|) = 0.37, Δ = 0.259: only ±0.9 and 0.8 clear it.
        let x = Tensor::new(&[-0.9f32, -0.1, 0.0, 0.05, 0.8], &dev).unwrap();
        let q: Vec<f32> = ste_tern(&x).unwrap().to_vec1().unwrap();
        assert_eq!(q, vec![-1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn threshold_uses_clipped_statistics() {
        let dev = Device::Cpu;
        // Raw mean(|x|) would be 5.375, but clipping first caps each
        // element at 1, so Δ = 0.7 * 0.875 = 0.6125 and the 0.5 element
        // falls inside the zero band.
        let x = Tensor::new(&[-10.0f32, 0.5, 10.0, -1.0], &dev).unwrap();
        let q: Vec<f32> = ste_tern(&x).unwrap().to_vec1().unwrap();
        assert_eq!(q, vec![-1.0, 0.0, 1.0, -1.0]);
    }

    #[test]
    fn gradient_is_straight_through() {
        let dev = Device::Cpu;
        let var = Var::new(&[-2.0f32, -0.5, 0.0, 0.5, 2.0], &dev).unwrap();
        let y = ste_tern(var.as_tensor()).unwrap();
        let loss = y.sum_all().unwrap();
        let grads = loss.backward().unwrap();
        let g: Vec<f32> = grads.get(var.as_tensor()).unwrap().to_vec1().unwrap();
        assert_eq!(g, vec![0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn backward_passes_dy_inside_clip() {
        let dev = Device::Cpu;
        let quantizer = SteTern::new();
        let x = Tensor::new(&[-1.5f32, -0.5, 0.5, 1.5], &dev).unwrap();
        let dy = Tensor::new(&[1.0f32, 2.0, 3.0, 4.0], &dev).unwrap();
        let dx: Vec<f32> = quantizer.backward(&x, &dy).unwrap().to_vec1().unwrap();
        assert_eq!(dx, vec![0.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn forward_preserves_shape() {
        let dev = Device::Cpu;
        let x = Tensor::ones((3, 4), candle_core::DType::F32, &dev).unwrap();
        let q = SteTern::new().forward(&x).unwrap();
        assert_eq!(q.dims(), x.dims());
    }

    #[test]
    fn custom_threshold_factor() {
        let dev = Device::Cpu;
        // factor = 2.0 puts Δ above every |x|, zeroing the whole tensor.
        let config = QuantizeConfig::new().with_ternary_threshold_factor(2.0);
        let quantizer = SteTern::with_config(&config);
        let x = Tensor::new(&[-0.5f32, 0.3, 0.5], &dev).unwrap();
        let q: Vec<f32> = quantizer.forward(&x).unwrap().to_vec1().unwrap();
        assert_eq!(q, vec![0.0, 0.0, 0.0]);
    }
}
