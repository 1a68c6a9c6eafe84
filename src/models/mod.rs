mod module;
mod profile;
mod recommendation;

pub use module::{split_cities, ModuleRecord};
pub use profile::{Preferences, StudentProfile, DEFAULT_TOP_N, MAX_TOP_N};
pub use recommendation::{
    EngineStats, HealthResponse, RecommendItem, RecommendRequest, RecommendResponse,
};
