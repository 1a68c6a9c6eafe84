use rand::Rng;

use super::vectorizer::{SparseVector, VectorSpace};

/// Maximum number of match terms reported per module
pub const MAX_MATCH_TERMS: usize = 8;

/// How well a module fits, derived from its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrength {
    VeryGood,
    Good,
    Reasonable,
}

impl MatchStrength {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MatchStrength::VeryGood
        } else if score >= 0.6 {
            MatchStrength::Good
        } else {
            MatchStrength::Reasonable
        }
    }

    pub fn dutch(self) -> &'static str {
        match self {
            MatchStrength::VeryGood => "erg goed",
            MatchStrength::Good => "goed",
            MatchStrength::Reasonable => "redelijk",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            MatchStrength::VeryGood => "very well",
            MatchStrength::Good => "well",
            MatchStrength::Reasonable => "reasonably",
        }
    }
}

/// A justification in both supported languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    pub dutch: String,
    pub english: String,
}

// Placeholders: {q} qualifier, {terms} formatted term list, {module} module name.
// Index i of a Dutch pool mirrors index i of the English pool.

const GENERIC_NL: &[&str] = &[
    "Deze module sluit {q} aan bij je interesses op basis van tekstuele overeenkomsten.",
    "Op basis van de overeenkomst tussen jouw profiel en de modulebeschrijving lijkt deze module {q} bij je te passen.",
    "Deze module lijkt inhoudelijk {q} aan te sluiten bij wat je interessant vindt.",
];

const GENERIC_EN: &[&str] = &[
    "This module matches your interests {q} based on textual similarities.",
    "Based on the similarity between your profile and the module description, this module seems to suit you {q}.",
    "In terms of content, this module seems to fit {q} with what you find interesting.",
];

const NAMED_NL: &[&str] = &[
    "Je interesse in {terms} komt duidelijk terug in '{module}', waardoor deze module {q} bij je aansluit.",
    "Omdat {terms} centraal staan in '{module}', past deze module {q} bij jouw interesses.",
    "In '{module}' komen {terms} aan bod, wat goed aansluit bij jouw interesses.",
];

const NAMED_EN: &[&str] = &[
    "Your interest in {terms} clearly comes back in '{module}', so this module fits you {q}.",
    "Because {terms} are central to '{module}', this module matches your interests {q}.",
    "'{module}' covers {terms}, which fits well with your interests.",
];

const UNNAMED_NL: &[&str] = &[
    "Deze module sluit {q} aan bij je interesses in {terms}.",
    "Omdat {terms} in deze module aan bod komen, lijkt deze {q} bij je te passen.",
    "Je interesse in {terms} komt terug in de inhoud van deze module, waardoor deze goed bij je past.",
];

const UNNAMED_EN: &[&str] = &[
    "This module matches your interests in {terms} {q}.",
    "Because this module covers {terms}, it seems to suit you {q}.",
    "Your interest in {terms} comes back in the content of this module, so it fits you well.",
];

/// Quotes terms and joins them with commas and a final conjunction
pub fn format_term_list(terms: &[String], conjunction: &str) -> String {
    let quoted: Vec<String> = terms.iter().map(|t| format!("'{t}'")).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        [head @ .., last] => format!("{} {conjunction} {last}", head.join(", ")),
    }
}

/// Terms shared by student and module, compound terms first.
///
/// Single words contained in a selected compound term are dropped.
pub fn extract_match_terms(
    space: &VectorSpace,
    student: &SparseVector,
    module: &SparseVector,
    max_terms: usize,
) -> Vec<String> {
    let shared: Vec<&str> = student
        .shared_indices(module)
        .into_iter()
        .filter_map(|i| space.term(i))
        .collect();

    let (compound, single): (Vec<&str>, Vec<&str>) =
        shared.into_iter().partition(|term| term.contains(' '));

    let filtered = single
        .into_iter()
        .filter(|word| !compound.iter().any(|c| c.contains(word)));

    compound
        .iter()
        .copied()
        .chain(filtered)
        .take(max_terms)
        .map(str::to_string)
        .collect()
}

/// Renders a bilingual justification; only the phrasing depends on `rng`
pub fn build_reason<R: Rng + ?Sized>(
    match_terms: &[String],
    module_name: Option<&str>,
    score: f64,
    rng: &mut R,
) -> Reason {
    let strength = MatchStrength::from_score(score);
    let module_name = module_name.filter(|name| !name.is_empty());

    let (dutch_pool, english_pool) = match (match_terms.is_empty(), module_name) {
        (true, _) => (GENERIC_NL, GENERIC_EN),
        (false, Some(_)) => (NAMED_NL, NAMED_EN),
        (false, None) => (UNNAMED_NL, UNNAMED_EN),
    };
    let choice = rng.gen_range(0..dutch_pool.len());

    let fill = |template: &str, qualifier: &str, conjunction: &str| {
        template
            .replace("{q}", qualifier)
            .replace("{terms}", &format_term_list(match_terms, conjunction))
            .replace("{module}", module_name.unwrap_or_default())
    };

    Reason {
        dutch: fill(dutch_pool[choice], strength.dutch(), "en"),
        english: fill(english_pool[choice], strength.english(), "and"),
    }
}
