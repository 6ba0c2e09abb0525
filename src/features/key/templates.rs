//! Krumhansl-Kessler key templates
//!
//! Holds the rotated tonal profile for each of the 24 keys, in detector
//! iteration order (tonics chromatically from C, major before minor).

use crate::analysis::result::Key;
use crate::theory::key_profile;

/// Key templates for all 24 keys
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    templates: Vec<(Key, Vec<f32>)>,
}

impl KeyTemplates {
    /// Create key templates from the Krumhansl-Kessler profiles
    pub fn new() -> Self {
        let templates = Key::all()
            .into_iter()
            .map(|key| (key, key_profile(key.tonic, key.mode)))
            .collect();
        Self { templates }
    }

    /// Profile for a key
    pub fn get(&self, key: Key) -> Option<&[f32]> {
        self.templates
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, profile)| profile.as_slice())
    }

    /// (key, profile) pairs in iteration order
    pub fn iter(&self) -> impl Iterator<Item = &(Key, Vec<f32>)> {
        self.templates.iter()
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}
