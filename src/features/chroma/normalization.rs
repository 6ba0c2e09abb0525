//! Chroma normalization

/// Scale a chroma vector so its largest bin is 1.0
///
/// An all-zero (or non-positive) vector is left unchanged.
pub fn normalize_max(chroma: &mut [f32]) {
    let max = chroma.iter().copied().fold(0.0f32, f32::max);
    if max <= 0.0 {
        return;
    }
    for value in chroma.iter_mut() {
        *value /= max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_max() {
        let mut chroma = [0.0, 2.0, 4.0, 1.0];
        normalize_max(&mut chroma);
        assert_eq!(chroma, [0.0, 0.5, 1.0, 0.25]);
    }

    #[test]
    fn test_zero_vector_unchanged() {
        let mut chroma = [0.0f32; 12];
        normalize_max(&mut chroma);
        assert!(chroma.iter().all(|&x| x == 0.0));
    }
}
