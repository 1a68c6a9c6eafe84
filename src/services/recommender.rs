use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult, CorpusError},
    models::{EngineStats, ModuleRecord, RecommendItem, RecommendResponse, StudentProfile},
};

use super::corpus::CorpusSource;
use super::explainer::{build_reason, extract_match_terms, MAX_MATCH_TERMS};
use super::scorer::{ScoreOutcome, Scorer};
use super::text::TextNormalizer;
use super::vectorizer::{IndexSettings, VectorSpace};

/// Matching text derived from a module record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleText {
    pub raw_text: String,
    pub clean_text: String,
}

/// Immutable, fully fitted recommendation index
///
/// Built once per corpus load and shared read-only between requests.
#[derive(Debug)]
pub struct RecommendationEngine {
    normalizer: TextNormalizer,
    records: Vec<ModuleRecord>,
    texts: Vec<ModuleText>,
    space: VectorSpace,
    loaded_at: DateTime<Utc>,
}

impl RecommendationEngine {
    /// Normalizes every record and fits the vector space over the corpus
    pub fn build(records: Vec<ModuleRecord>, settings: &IndexSettings) -> AppResult<Self> {
        if records.is_empty() {
            return Err(CorpusError::Empty.into());
        }

        let normalizer = TextNormalizer::new();
        let texts: Vec<ModuleText> = records
            .iter()
            .map(|record| {
                let raw_text = record.raw_text();
                let clean_text = normalizer.normalize(&raw_text);
                ModuleText {
                    raw_text,
                    clean_text,
                }
            })
            .collect();

        let documents: Vec<String> = texts.iter().map(|t| t.clean_text.clone()).collect();
        let space = VectorSpace::fit(&documents, settings)?;

        Ok(Self {
            normalizer,
            records,
            texts,
            space,
            loaded_at: Utc::now(),
        })
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            modules_count: self.records.len(),
            features_count: self.space.features_count(),
        }
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn modules(&self) -> &[ModuleRecord] {
        &self.records
    }

    pub fn texts(&self) -> &[ModuleText] {
        &self.texts
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Ranks modules for a profile without generating explanations
    pub fn score(&self, profile: &StudentProfile) -> ScoreOutcome {
        Scorer::new(&self.normalizer, &self.space, &self.records).score(profile)
    }

    /// Ranks modules and explains each pick; `rng` only affects the wording of reasons
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        profile: &StudentProfile,
        rng: &mut R,
    ) -> RecommendResponse {
        let ScoreOutcome {
            ranked,
            student_vector,
        } = self.score(profile);

        let items: Vec<RecommendItem> = ranked
            .into_iter()
            .filter_map(|mut scored| {
                let module = self.records.get(scored.index)?;
                let row = self.space.row(scored.index)?;
                scored.match_terms =
                    extract_match_terms(&self.space, &student_vector, row, MAX_MATCH_TERMS);
                let reason = build_reason(
                    &scored.match_terms,
                    Some(module.name.as_str()),
                    scored.hybrid_score,
                    &mut *rng,
                );
                Some(RecommendItem::new(
                    module,
                    scored.hybrid_score,
                    scored.match_terms,
                    reason.dutch,
                    reason.english,
                ))
            })
            .collect();

        RecommendResponse::from(items)
    }
}

/// Shared handle to the current engine snapshot
///
/// The snapshot is swapped as a whole, so in-flight requests keep the index
/// they started with.
#[derive(Clone)]
pub struct RecommenderService {
    engine: Arc<RwLock<Option<Arc<RecommendationEngine>>>>,
    settings: IndexSettings,
    reason_seed: Option<u64>,
}

impl RecommenderService {
    pub fn new(settings: IndexSettings, reason_seed: Option<u64>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(None)),
            settings,
            reason_seed,
        }
    }

    /// Loads and indexes a corpus, replacing any previous index
    pub async fn load_corpus(&self, source: Arc<dyn CorpusSource>) -> AppResult<EngineStats> {
        let start = Instant::now();
        let settings = self.settings.clone();
        let description = source.describe();
        tracing::info!(source = %description, "Loading module corpus");

        let engine = tokio::task::spawn_blocking(move || {
            let records = source.load()?;
            RecommendationEngine::build(records, &settings)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        let stats = engine.stats();
        let loaded_at = engine.loaded_at();
        *self.engine.write().await = Some(Arc::new(engine));

        tracing::info!(
            source = %description,
            modules_count = stats.modules_count,
            features_count = stats.features_count,
            elapsed_ms = start.elapsed().as_millis(),
            loaded_at = %loaded_at,
            "Module corpus indexed"
        );

        Ok(stats)
    }

    /// Current snapshot, if a corpus has been loaded
    pub async fn snapshot(&self) -> Option<Arc<RecommendationEngine>> {
        self.engine.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.engine.read().await.is_some()
    }

    /// Corpus and vocabulary size; zero when nothing is loaded
    pub async fn get_stats(&self) -> EngineStats {
        self.snapshot()
            .await
            .map(|engine| engine.stats())
            .unwrap_or_default()
    }

    pub async fn get_recommendations(
        &self,
        profile: &StudentProfile,
    ) -> AppResult<RecommendResponse> {
        let engine = self.snapshot().await.ok_or(AppError::NotReady)?;
        let mut rng = self.reason_rng();
        let profile = profile.clone();

        // Scoring walks every module row
        tokio::task::spawn_blocking(move || engine.recommend(&profile, &mut rng))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    fn reason_rng(&self) -> StdRng {
        match self.reason_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
