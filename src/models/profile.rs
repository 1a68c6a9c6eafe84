/// Default number of recommendations
pub const DEFAULT_TOP_N: usize = 5;

/// Largest number of recommendations a caller may ask for
pub const MAX_TOP_N: usize = 20;

/// What a student told us about themselves, valid for a single request
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub study_program: Option<String>,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub favorites: Vec<String>,
    pub preferences: Preferences,
    /// Number of modules to return
    pub k: usize,
}

/// Soft preferences; each one only nudges scores, none of them filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub location: Option<String>,
    pub study_credit: Option<i64>,
    pub level: Option<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.study_credit.is_none() && self.level.is_none()
    }
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            study_program: None,
            interests: Vec::new(),
            skills: Vec::new(),
            favorites: Vec::new(),
            preferences: Preferences::default(),
            k: DEFAULT_TOP_N,
        }
    }
}

impl StudentProfile {
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_favorites<I, S>(mut self, favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = favorites.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_study_program(mut self, program: impl Into<String>) -> Self {
        self.study_program = Some(program.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.preferences.location = Some(location.into());
        self
    }

    pub fn with_study_credit(mut self, credit: i64) -> Self {
        self.preferences.study_credit = Some(credit);
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.preferences.level = Some(level.into());
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = StudentProfile::default();
        assert_eq!(profile.k, DEFAULT_TOP_N);
        assert!(profile.preferences.is_empty());
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_builder() {
        let profile = StudentProfile::default()
            .with_interests(["data"])
            .with_location("Breda")
            .with_k(3);
        assert_eq!(profile.interests, vec!["data"]);
        assert_eq!(profile.preferences.location.as_deref(), Some("Breda"));
        assert!(!profile.preferences.is_empty());
        assert_eq!(profile.k, 3);
    }
}
