//! Chord chroma templates
//!
//! 84 binary templates: 12 roots (outer, chromatic from C) by the 7
//! detectable qualities (inner). Match order follows bank order, which
//! decides ties.

use crate::theory::{chord_chroma_template, ChordQuality, NoteName};

/// One binary chord template
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTemplate {
    /// Chord root
    pub root: NoteName,
    /// Chord quality
    pub quality: ChordQuality,
    /// 1.0 at each chord pitch class
    pub chroma: [f32; 12],
}

/// Ordered template bank
#[derive(Debug, Clone)]
pub struct ChordTemplates {
    templates: Vec<ChordTemplate>,
}

impl ChordTemplates {
    /// Build the 84-template bank
    pub fn new() -> Self {
        let templates = NoteName::ALL
            .iter()
            .flat_map(|&root| {
                ChordQuality::DETECTABLE.iter().map(move |&quality| ChordTemplate {
                    root,
                    quality,
                    chroma: chord_chroma_template(root, quality),
                })
            })
            .collect();
        Self { templates }
    }

    /// Templates in match order
    pub fn iter(&self) -> impl Iterator<Item = &ChordTemplate> {
        self.templates.iter()
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the bank is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for ChordTemplates {
    fn default() -> Self {
        Self::new()
    }
}
