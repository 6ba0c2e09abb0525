//! McLeod Pitch Method (MPM) fundamental-frequency estimator
//!
//! Estimates the pitch of a monophonic frame from the normalized square
//! difference function (NSDF), an autocorrelation normalized by the energy of
//! the overlapping parts of the signal.
//!
//! # Algorithm
//!
//! 1. Autocorrelation via FFT: `r = IFFT(|FFT(x)|²)` with zero padding to ≥ 2N
//! 2. NSDF: `n(τ) = 2·r(τ) / m(τ)`, where `m(τ) = Σ x[i]² + x[i+τ]²`
//! 3. Key maxima: the highest NSDF peak between each positive-going and
//!    negative-going zero crossing
//! 4. Select the first key maximum ≥ `CUTOFF` × the highest key maximum
//! 5. Parabolic interpolation refines period and peak height
//!
//! The interpolated peak height is the *clarity* (0.0-1.0): close to 1.0 for
//! strongly periodic signals, low for noise.
//!
//! # Reference
//!
//! McLeod, P., & Wyvill, G. (2005). A Smarter Way to Find Pitch.
//! *Proceedings of the International Computer Music Conference*.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Fraction of the highest key maximum a peak must reach to be chosen
const CUTOFF: f32 = 0.93;

/// Energy below which a frame is treated as silent
const EPSILON: f32 = 1e-10;

/// Raw estimator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEstimate {
    /// Fundamental frequency in Hz
    pub frequency: f32,
    /// Periodicity confidence (0.0-1.0)
    pub clarity: f32,
}

/// Reusable MPM estimator for frames of a fixed maximum size
///
/// Holds the FFT plans and scratch buffer so repeated calls do not allocate.
pub struct McLeodPitchDetector {
    size: usize,
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    nsdf: Vec<f32>,
}

impl std::fmt::Debug for McLeodPitchDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McLeodPitchDetector")
            .field("size", &self.size)
            .finish()
    }
}

impl McLeodPitchDetector {
    /// Create an estimator for frames of up to `size` samples
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let fft_size = (2 * size).next_power_of_two();
        let mut planner = FftPlanner::new();
        Self {
            size,
            fft: planner.plan_fft_forward(fft_size),
            ifft: planner.plan_fft_inverse(fft_size),
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            nsdf: vec![0.0; size],
        }
    }

    /// Frame size this estimator was planned for
    pub fn size(&self) -> usize {
        self.size
    }

    /// Estimate the pitch of a frame
    ///
    /// Frames longer than the planned size are truncated. Returns `None` for
    /// silent frames and frames with no periodic structure.
    pub fn get_pitch(&mut self, frame: &[f32], sample_rate: u32) -> Option<PitchEstimate> {
        let n = frame.len().min(self.size);
        if n < 4 || sample_rate == 0 {
            return None;
        }
        let frame = &frame[..n];

        let energy: f32 = frame.iter().map(|x| x * x).sum();
        if energy < EPSILON {
            return None;
        }

        self.compute_nsdf(frame);
        let nsdf = &self.nsdf[..n];

        // Periods beyond half the frame have too little overlap to be reliable
        let limit = n / 2 + 1;
        let maxima = key_maxima(&nsdf[..limit]);
        let highest = maxima
            .iter()
            .map(|&pos| nsdf[pos])
            .fold(f32::NEG_INFINITY, f32::max);
        if maxima.is_empty() || highest <= 0.0 {
            return None;
        }

        let threshold = CUTOFF * highest;
        let chosen = maxima
            .iter()
            .copied()
            .find(|&pos| nsdf[pos] >= threshold)?;

        let (period, peak) = parabolic_interpolation(nsdf, chosen);
        if period <= 0.0 {
            return None;
        }

        Some(PitchEstimate {
            frequency: sample_rate as f32 / period,
            clarity: peak.clamp(0.0, 1.0),
        })
    }

    /// Fill `self.nsdf[..frame.len()]`
    fn compute_nsdf(&mut self, frame: &[f32]) {
        let n = frame.len();

        for (dst, &x) in self.scratch.iter_mut().zip(frame.iter()) {
            *dst = Complex::new(x, 0.0);
        }
        for dst in self.scratch.iter_mut().skip(n) {
            *dst = Complex::new(0.0, 0.0);
        }

        self.fft.process(&mut self.scratch);
        for x in self.scratch.iter_mut() {
            *x = *x * x.conj();
        }
        self.ifft.process(&mut self.scratch);

        let scale = 1.0 / self.scratch.len() as f32;

        // m(0) = 2 Σ x², then shrink the overlap one sample at a time
        let mut m: f32 = 2.0 * frame.iter().map(|x| x * x).sum::<f32>();
        for tau in 0..n {
            if tau > 0 {
                m -= frame[tau - 1] * frame[tau - 1] + frame[n - tau] * frame[n - tau];
            }
            let r = self.scratch[tau].re * scale;
            self.nsdf[tau] = if m > EPSILON { 2.0 * r / m } else { 0.0 };
        }
    }
}

/// Positions of the highest peak within each positive NSDF region
fn key_maxima(nsdf: &[f32]) -> Vec<usize> {
    let len = nsdf.len();
    let mut maxima = Vec::new();
    if len < 3 {
        return maxima;
    }

    // Skip the lag-0 lobe: wait for the first negative region to end
    let mut pos = 0;
    while pos < len - 1 && nsdf[pos] > 0.0 {
        pos += 1;
    }
    while pos < len - 1 && nsdf[pos] <= 0.0 {
        pos += 1;
    }
    pos = pos.max(1);

    let mut current: Option<usize> = None;
    while pos < len - 1 {
        let value = nsdf[pos];
        if value > nsdf[pos - 1] && value >= nsdf[pos + 1] {
            match current {
                Some(best) if nsdf[best] >= value => {}
                _ => current = Some(pos),
            }
        }
        pos += 1;

        if pos < len - 1 && nsdf[pos] <= 0.0 {
            if let Some(best) = current.take() {
                maxima.push(best);
            }
            while pos < len - 1 && nsdf[pos] <= 0.0 {
                pos += 1;
            }
        }
    }
    if let Some(best) = current {
        maxima.push(best);
    }
    maxima
}

/// Refine a peak position; returns (interpolated position, interpolated height)
fn parabolic_interpolation(values: &[f32], x: usize) -> (f32, f32) {
    if x == 0 || x + 1 >= values.len() {
        return (x as f32, values[x]);
    }

    let left = values[x - 1];
    let center = values[x];
    let right = values[x + 1];
    let denominator = left - 2.0 * center + right;

    if denominator.abs() < 1e-9 {
        return (x as f32, center);
    }

    let delta = 0.5 * (left - right) / denominator;
    let height = center - 0.25 * (left - right) * delta;
    (x as f32 + delta, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(frequency: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_pure_sine_440() {
        let mut detector = McLeodPitchDetector::new(2048);
        let estimate = detector
            .get_pitch(&sine(440.0, 44100, 2048), 44100)
            .expect("sine should be pitched");
        assert!(
            (estimate.frequency - 440.0).abs() < 2.0,
            "Expected ~440 Hz, got {:.2}",
            estimate.frequency
        );
        assert!(estimate.clarity > 0.95, "clarity {}", estimate.clarity);
    }

    #[test]
    fn test_low_and_high_sines() {
        let mut detector = McLeodPitchDetector::new(2048);
        for &f in &[110.0f32, 220.0, 880.0] {
            let estimate = detector.get_pitch(&sine(f, 44100, 2048), 44100).unwrap();
            assert!(
                (estimate.frequency - f).abs() / f < 0.01,
                "Expected ~{} Hz, got {:.2}",
                f,
                estimate.frequency
            );
        }
    }

    #[test]
    fn test_harmonic_tone_finds_fundamental() {
        let sr = 44100;
        let tone: Vec<f32> = (0..2048)
            .map(|i| {
                let t = i as f32 / sr as f32;
                0.5 * (2.0 * PI * 220.0 * t).sin() + 0.3 * (2.0 * PI * 440.0 * t).sin()
                    + 0.2 * (2.0 * PI * 660.0 * t).sin()
            })
            .collect();
        let mut detector = McLeodPitchDetector::new(2048);
        let estimate = detector.get_pitch(&tone, sr).unwrap();
        assert!((estimate.frequency - 220.0).abs() < 3.0, "got {}", estimate.frequency);
    }

    #[test]
    fn test_silence_has_no_pitch() {
        let mut detector = McLeodPitchDetector::new(1024);
        assert!(detector.get_pitch(&vec![0.0; 1024], 44100).is_none());
        assert!(detector.get_pitch(&[], 44100).is_none());
    }

    #[test]
    fn test_parabolic_interpolation_symmetric_peak() {
        let values = [0.0, 0.5, 1.0, 0.5, 0.0];
        let (pos, height) = parabolic_interpolation(&values, 2);
        assert!((pos - 2.0).abs() < 1e-6);
        assert!((height - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_key_maxima_one_per_lobe() {
        let nsdf = [1.0, 0.5, -0.2, -0.5, 0.3, 0.8, 0.4, -0.1, 0.2, 0.6, 0.9, 0.5, -0.3];
        assert_eq!(key_maxima(&nsdf), vec![5, 10]);
    }
}
