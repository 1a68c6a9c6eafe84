use std::cmp::Ordering;

use crate::models::{split_cities, ModuleRecord, Preferences, StudentProfile};

use super::text::TextNormalizer;
use super::vectorizer::{SparseVector, VectorSpace};

/// Score added for a satisfied preference
pub const PREFERENCE_BOOST: f64 = 0.10;

/// Score subtracted for an unsatisfied preference
pub const PREFERENCE_PENALTY: f64 = 0.10;

/// Placeholder document for a profile without any text
const EMPTY_PROFILE_TEXT: &str = "student";

/// How many times each profile field is repeated in the pseudo-document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWeights {
    pub study_program: usize,
    pub skills: usize,
    pub interests: usize,
    pub favorites: usize,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            study_program: 1,
            skills: 2,
            interests: 3,
            favorites: 3,
        }
    }
}

/// A module with its raw and preference-adjusted scores
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredModule {
    /// Row of the module in the corpus
    pub index: usize,
    pub similarity_raw: f64,
    pub hybrid_score: f64,
    pub match_terms: Vec<String>,
}

/// Ranked modules plus the projected student vector
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub ranked: Vec<ScoredModule>,
    pub student_vector: SparseVector,
}

/// Builds the weighted pseudo-document for a profile
///
/// Fields are emitted in order: program, skills, interests, favorites.
pub fn profile_text(profile: &StudentProfile, weights: &FieldWeights) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(program) = profile.study_program.as_deref().filter(|p| !p.is_empty()) {
        parts.extend(std::iter::repeat(program).take(weights.study_program));
    }
    for (values, copies) in [
        (&profile.skills, weights.skills),
        (&profile.interests, weights.interests),
        (&profile.favorites, weights.favorites),
    ] {
        for value in values {
            parts.extend(std::iter::repeat(value.as_str()).take(copies));
        }
    }

    if parts.is_empty() {
        return EMPTY_PROFILE_TEXT.to_string();
    }
    parts.join(" ")
}

/// True if any preferred city and any city of the module contain one another
pub fn location_matches(preferred: &str, module: &ModuleRecord) -> bool {
    if module.location.trim().is_empty() {
        return false;
    }
    let wanted = split_cities(preferred);
    let offered = module.cities();
    wanted.iter().any(|w| {
        offered
            .iter()
            .any(|o| o.contains(w.as_str()) || w.contains(o.as_str()))
    })
}

fn adjustment(matched: bool) -> f64 {
    if matched {
        PREFERENCE_BOOST
    } else {
        -PREFERENCE_PENALTY
    }
}

/// Sum of preference boosts and penalties for one module
pub fn preference_adjustment(preferences: &Preferences, module: &ModuleRecord) -> f64 {
    let mut total = 0.0;
    if let Some(location) = &preferences.location {
        total += adjustment(location_matches(location, module));
    }
    if let Some(credit) = preferences.study_credit {
        total += adjustment(module.study_credit == credit);
    }
    if let Some(level) = &preferences.level {
        total += adjustment(&module.level == level);
    }
    total
}

/// Raw similarity nudged by preferences, kept inside [0, 1]
pub fn hybrid_score(similarity_raw: f64, preferences: &Preferences, module: &ModuleRecord) -> f64 {
    if preferences.is_empty() {
        return similarity_raw;
    }
    (similarity_raw + preference_adjustment(preferences, module)).clamp(0.0, 1.0)
}

/// Ranks every module against a student profile
pub struct Scorer<'a> {
    normalizer: &'a TextNormalizer,
    space: &'a VectorSpace,
    modules: &'a [ModuleRecord],
    weights: FieldWeights,
}

impl<'a> Scorer<'a> {
    pub fn new(
        normalizer: &'a TextNormalizer,
        space: &'a VectorSpace,
        modules: &'a [ModuleRecord],
    ) -> Self {
        Self {
            normalizer,
            space,
            modules,
            weights: FieldWeights::default(),
        }
    }

    /// Projects the profile into the vector space
    pub fn student_vector(&self, profile: &StudentProfile) -> SparseVector {
        let text = profile_text(profile, &self.weights);
        let clean = self.normalizer.normalize(&text);
        tracing::debug!(profile_text = %clean, "Student profile normalized");
        self.space.project(&clean)
    }

    /// Scores all modules and returns the best `profile.k`, highest first.
    ///
    /// Ties keep corpus order.
    pub fn score(&self, profile: &StudentProfile) -> ScoreOutcome {
        let student_vector = self.student_vector(profile);

        let mut ranked: Vec<ScoredModule> = self
            .space
            .rows()
            .iter()
            .zip(self.modules)
            .enumerate()
            .map(|(index, (row, module))| {
                let similarity_raw = student_vector.cosine(row).clamp(0.0, 1.0);
                ScoredModule {
                    index,
                    similarity_raw,
                    hybrid_score: hybrid_score(similarity_raw, &profile.preferences, module),
                    match_terms: Vec::new(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(profile.k);

        ScoreOutcome {
            ranked,
            student_vector,
        }
    }
}
