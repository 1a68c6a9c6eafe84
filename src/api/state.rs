use crate::services::RecommenderService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: RecommenderService,
}

impl AppState {
    /// Wraps a recommender handle; the corpus may be loaded before or after
    pub fn new(recommender: RecommenderService) -> Self {
        Self { recommender }
    }
}
