//! Template matching by cosine similarity

use super::templates::{ChordTemplate, ChordTemplates};

/// Cosine similarity of two vectors
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Best-matching template for a chroma vector and its similarity
///
/// Ties keep the template that comes first in bank order. Returns `None` only
/// for an empty bank.
pub fn best_match<'a>(
    chroma: &[f32; 12],
    templates: &'a ChordTemplates,
) -> Option<(&'a ChordTemplate, f32)> {
    let mut best: Option<(&ChordTemplate, f32)> = None;
    for template in templates.iter() {
        let score = cosine_similarity(chroma, &template.chroma);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((template, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{chord_chroma_template, ChordQuality, NoteName};
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_match_is_one() {
        let template = chord_chroma_template(NoteName::G, ChordQuality::Dominant7);
        assert_relative_eq!(cosine_similarity(&template, &template), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        let zero = [0.0f32; 12];
        let c = chord_chroma_template(NoteName::C, ChordQuality::Major);
        assert_eq!(cosine_similarity(&zero, &c), 0.0);
    }

    #[test]
    fn test_best_match_finds_chord() {
        let bank = ChordTemplates::new();
        let chroma = chord_chroma_template(NoteName::A, ChordQuality::Minor);
        let (template, score) = best_match(&chroma, &bank).unwrap();
        assert_eq!(template.root, NoteName::A);
        assert_eq!(template.quality, ChordQuality::Minor);
        assert_relative_eq!(score, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_silence_ties_to_first_template() {
        let bank = ChordTemplates::new();
        let (template, score) = best_match(&[0.0; 12], &bank).unwrap();
        assert_eq!((template.root, template.quality), (NoteName::C, ChordQuality::Major));
        assert_eq!(score, 0.0);
    }
}
