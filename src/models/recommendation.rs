use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::{ModuleRecord, Preferences, StudentProfile, DEFAULT_TOP_N, MAX_TOP_N};

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub study_program: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub favorites: Option<Vec<String>>,
    #[serde(default)]
    pub study_location: Option<String>,
    #[serde(default)]
    pub study_credit: Option<i64>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_k")]
    pub k: i64,
}

fn default_k() -> i64 {
    DEFAULT_TOP_N as i64
}

impl RecommendRequest {
    /// Validates the request and turns it into an engine profile
    pub fn into_profile(self) -> AppResult<StudentProfile> {
        if self.k < 1 || self.k > MAX_TOP_N as i64 {
            return Err(AppError::InvalidInput(format!(
                "k must be between 1 and {}, got {}",
                MAX_TOP_N, self.k
            )));
        }

        Ok(StudentProfile {
            study_program: self.study_program,
            interests: self.interests.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            favorites: self.favorites.unwrap_or_default(),
            preferences: Preferences {
                location: self.study_location,
                study_credit: self.study_credit,
                level: self.level,
            },
            k: self.k as usize,
        })
    }
}

/// A single recommended module with its explanation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendItem {
    pub id: i64,
    pub name: String,
    pub shortdescription: String,
    /// Hybrid score: cosine similarity adjusted by soft preferences, in [0, 1]
    pub similarity: f64,
    pub location: String,
    pub study_credit: i64,
    pub level: String,
    pub module_tags: String,
    pub match_terms: Vec<String>,
    /// Dutch explanation
    pub reason: String,
    /// English explanation
    pub reason_en: String,
}

impl RecommendItem {
    pub fn new(
        module: &ModuleRecord,
        similarity: f64,
        match_terms: Vec<String>,
        reason: String,
        reason_en: String,
    ) -> Self {
        Self {
            id: module.id,
            name: module.name.clone(),
            shortdescription: module.shortdescription.clone(),
            similarity,
            location: module.location.clone(),
            study_credit: module.study_credit,
            level: module.level.clone(),
            module_tags: module.module_tags.clone().unwrap_or_default(),
            match_terms,
            reason,
            reason_en,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub recommendations: Vec<RecommendItem>,
    pub total_found: usize,
}

impl From<Vec<RecommendItem>> for RecommendResponse {
    fn from(recommendations: Vec<RecommendItem>) -> Self {
        Self {
            total_found: recommendations.len(),
            recommendations,
        }
    }
}

/// Module and vocabulary counts of the loaded index
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineStats {
    pub modules_count: usize,
    pub features_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub dataset_loaded: bool,
    pub modules_count: usize,
    pub features_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RecommendRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_request_defaults() {
        let request = parse("{}");
        assert_eq!(request.k, 5);
        let profile = request.into_profile().unwrap();
        assert!(profile.interests.is_empty());
        assert!(profile.preferences.is_empty());
    }

    #[test]
    fn test_request_maps_study_location_to_preference() {
        let profile = parse(r#"{"study_location": "Breda", "study_credit": 15, "level": "NLQF5", "k": 3}"#)
            .into_profile()
            .unwrap();
        assert_eq!(profile.preferences.location.as_deref(), Some("Breda"));
        assert_eq!(profile.preferences.study_credit, Some(15));
        assert_eq!(profile.preferences.level.as_deref(), Some("NLQF5"));
        assert_eq!(profile.k, 3);
    }

    #[test]
    fn test_request_rejects_k_out_of_range() {
        assert!(matches!(
            parse(r#"{"k": 0}"#).into_profile(),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            parse(r#"{"k": 21}"#).into_profile(),
            Err(AppError::InvalidInput(_))
        ));
        assert!(parse(r#"{"k": 20}"#).into_profile().is_ok());
    }

    #[test]
    fn test_item_renders_missing_tags_as_empty() {
        let module = ModuleRecord {
            id: 7,
            name: "Robotica".to_string(),
            shortdescription: "Robots bouwen".to_string(),
            location: "Breda".to_string(),
            study_credit: 30,
            level: "NLQF6".to_string(),
            module_tags: None,
        };
        let item = RecommendItem::new(&module, 0.5, vec![], String::new(), String::new());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["module_tags"], "");
        assert_eq!(json["study_credit"], 30);
    }
}
