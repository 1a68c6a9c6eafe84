use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised while reading module records from a corpus source
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value for {field} on record {record}: {value:?}")]
    InvalidNumber {
        field: &'static str,
        record: usize,
        value: String,
    },

    #[error("Corpus contains no module records")]
    Empty,
}

/// Errors raised while fitting the TF-IDF vector space
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IndexError {
    #[error("Empty vocabulary; the documents only contain stopwords")]
    EmptyVocabulary,

    #[error("After pruning, no terms remain. Try a lower min_df or a higher max_df")]
    NoTermsRemain,

    #[error("max_df corresponds to {max_docs} documents, fewer than min_df ({min_df})")]
    InconsistentDocumentFrequency { max_docs: f64, min_df: usize },

    #[error("Invalid n-gram range ({0}, {1})")]
    InvalidNgramRange(usize, usize),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Recommendation service not initialized")]
    NotReady,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::Corpus(_) | AppError::Index(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
