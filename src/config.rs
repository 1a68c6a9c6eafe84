use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the module dataset (CSV)
    #[serde(default = "default_csv_path")]
    pub csv_path: String,

    /// Smallest n-gram length fed to the vectorizer
    #[serde(default = "default_ngram_min")]
    pub tfidf_ngram_min: usize,

    /// Largest n-gram length fed to the vectorizer
    #[serde(default = "default_ngram_max")]
    pub tfidf_ngram_max: usize,

    /// Terms found in fewer documents than this are dropped
    #[serde(default = "default_min_df")]
    pub tfidf_min_df: usize,

    /// Terms found in a larger fraction of documents than this are dropped
    #[serde(default = "default_max_df")]
    pub tfidf_max_df: f64,

    /// Fixed seed for reason template selection
    #[serde(default)]
    pub reason_seed: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_csv_path() -> String {
    "data/modules.csv".to_string()
}

fn default_ngram_min() -> usize {
    1
}

fn default_ngram_max() -> usize {
    2
}

fn default_min_df() -> usize {
    2
}

fn default_max_df() -> f64 {
    0.8
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.csv_path, "data/modules.csv");
        assert_eq!((config.tfidf_ngram_min, config.tfidf_ngram_max), (1, 2));
        assert_eq!(config.tfidf_min_df, 2);
        assert_eq!(config.tfidf_max_df, 0.8);
        assert_eq!(config.reason_seed, None);
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("PORT".to_string(), "9000".to_string()),
            ("TFIDF_MIN_DF".to_string(), "1".to_string()),
            ("REASON_SEED".to_string(), "42".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.tfidf_min_df, 1);
        assert_eq!(config.reason_seed, Some(42));
    }
}
