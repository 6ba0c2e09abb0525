//! Rolling sample buffer for live analysis
//!
//! Holds at most `capacity` of the most recent samples, discarding the oldest
//! as new audio arrives.

/// Buffer for windowed audio processing
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Buffer data (oldest first)
    data: Vec<f32>,
    /// Maximum number of retained samples
    capacity: usize,
}

impl SampleBuffer {
    /// Create a new sample buffer
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add samples to buffer, keeping only the newest `capacity`
    pub fn push(&mut self, samples: &[f32]) {
        if samples.len() >= self.capacity {
            self.data.clear();
            self.data
                .extend_from_slice(&samples[samples.len() - self.capacity..]);
            return;
        }

        let overflow = (self.data.len() + samples.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            self.data.drain(..overflow);
        }
        self.data.extend_from_slice(samples);
    }

    /// The most recent `window_size` samples, if that many are buffered
    pub fn latest_window(&self, window_size: usize) -> Option<&[f32]> {
        if window_size == 0 || window_size > self.data.len() {
            return None;
        }
        Some(&self.data[self.data.len() - window_size..])
    }

    /// Number of buffered samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no samples are buffered
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the buffer holds `capacity` samples
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard all buffered samples
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
