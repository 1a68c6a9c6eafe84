pub mod corpus;
pub mod explainer;
pub mod recommender;
pub mod scorer;
pub mod text;
pub mod vectorizer;

pub use corpus::{CorpusSource, CsvFile, InMemoryCorpus};
pub use recommender::{RecommendationEngine, RecommenderService};
pub use text::TextNormalizer;
pub use vectorizer::{IndexSettings, SparseVector, VectorSpace};
