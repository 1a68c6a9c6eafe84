use std::collections::HashSet;

/// Short technical terms that survive the length filter
pub const TECH_ABBREVIATIONS: &[&str] = &["AI", "ML", "UI", "UX", "IT", "API", "SQL", "CSS", "JS"];

/// General Dutch stopwords
const DUTCH_STOPWORDS: &[&str] = &[
    "de", "en", "van", "ik", "te", "dat", "die", "in", "een", "hij", "het", "niet", "zijn", "is",
    "was", "op", "aan", "met", "als", "voor", "had", "er", "maar", "om", "hem", "dan", "zou", "of",
    "wat", "mijn", "men", "dit", "zo", "door", "over", "ze", "zich", "bij", "ook", "tot", "je",
    "mij", "uit", "der", "daar", "haar", "naar", "heb", "hoe", "heeft", "hebben", "deze", "u",
    "want", "nog", "zal", "me", "zij", "nu", "ge", "geen", "omdat", "iets", "worden", "toch", "al",
    "waren", "veel", "meer", "doen", "toen", "moet", "ben", "zonder", "kan", "hun", "dus", "alles",
    "onder", "ja", "eens", "hier", "wie", "werd", "altijd", "doch", "wordt", "wezen", "kunnen",
    "ons", "zelf", "tegen", "na", "reeds", "wil", "kon", "niets", "uw", "iemand", "geweest",
    "andere",
];

/// Words that show up in nearly every module description and carry no signal
const DOMAIN_NOISE: &[&str] = &[
    "bij", "voor", "met", "door", "zonder", "over", "doelgroep", "werk", "werken", "proces",
    "praktijk", "ontwikkeling", "ontwikkelen", "gaan", "leren", "school", "module", "modules",
    "thema", "student", "opleiding", "kun", "vanuit", "eigen", "zelf", "samen", "samenwerken",
    "jaar", "week", "periode", "naasten", "daarnaast", "minor", "studenten", "programma",
    "keuzemodule", "casus", "casussen", "cases", "vraagstukken", "stage", "stageschool",
    "kennismakingsstage", "kennis", "vaardigheid", "vaardigheden", "ervaring", "ervaringen",
    "lessen", "onderwerpen", "theorie", "praktische", "inhoudelijke", "mee", "doe", "vinden",
    "vind", "kies", "openstaanbelangrijk", "positief", "mogelijkheden", "mogelijkheid",
    "impact", "betekenis", "betekent", "betekenen", "you", "your", "are", "will", "what", "then",
    "like", "choose", "interested", "experiencing", "hbo", "and", "the", "persoonlijke", "denken",
    "maken", "business", "verdieping", "emgeving", "bouwen", "thinking", "branding", "urban",
    "veiligheid", "nieuwe", "test", "gebouwde", "concept", "project", "omgeving", "actuele",
    "acute", "yellow", "belt", "serious", "hrm", "mensen", "snel", "binnen", "materialen",
    "active", "druk", "context", "leven", "complexe", "brede", "for", "jouw", "manieren",
];

/// Typographic quotes and accents removed along with ASCII punctuation
const EXTRA_PUNCTUATION: &[char] = &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{00B4}', '`'];

/// Lowercases, strips punctuation and digits and drops stopwords.
///
/// The same normalizer must be used for corpus documents and for student
/// profiles, otherwise both end up in different parts of the vector space.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
    abbreviations: HashSet<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Creates a normalizer with the Dutch stopword list and the domain noise list
    pub fn new() -> Self {
        let stopwords = DUTCH_STOPWORDS
            .iter()
            .chain(DOMAIN_NOISE.iter())
            .map(|word| word.to_string())
            .collect();
        let abbreviations = TECH_ABBREVIATIONS.iter().map(|a| a.to_string()).collect();

        Self {
            stopwords,
            abbreviations,
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.contains(&token.to_uppercase())
    }

    /// Cleans free text into space-separated matching tokens
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        // Punctuation is deleted, digit runs become a single space
        let mut stripped = String::with_capacity(lowered.len());
        let mut in_digits = false;
        for c in lowered.chars() {
            if c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c) {
                continue;
            }
            if c.is_numeric() {
                if !in_digits {
                    stripped.push(' ');
                    in_digits = true;
                }
                continue;
            }
            in_digits = false;
            stripped.push(c);
        }

        stripped
            .split_whitespace()
            .filter(|token| self.keep_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn keep_token(&self, token: &str) -> bool {
        if self.is_abbreviation(token) {
            return true;
        }
        !self.is_stopword(token) && token.chars().count() > 2
    }
}
