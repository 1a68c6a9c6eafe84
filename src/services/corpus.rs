use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{error::CorpusError, models::ModuleRecord};

/// Columns every corpus file must provide
pub const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "shortdescription",
    "location",
    "studycredit",
    "level",
];

/// Where module records come from
///
/// Loading is blocking and runs once per index build.
pub trait CorpusSource: Send + Sync {
    fn load(&self) -> Result<Vec<ModuleRecord>, CorpusError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// A CSV file with one module per row
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CorpusSource for CsvFile {
    fn load(&self) -> Result<Vec<ModuleRecord>, CorpusError> {
        let file = File::open(&self.path).map_err(|source| CorpusError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        read_records(file)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    records: Vec<ModuleRecord>,
}

impl InMemoryCorpus {
    pub fn new(records: Vec<ModuleRecord>) -> Self {
        Self { records }
    }
}

impl CorpusSource for InMemoryCorpus {
    fn load(&self) -> Result<Vec<ModuleRecord>, CorpusError> {
        if self.records.is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} records", self.records.len())
    }
}

/// Row as it appears in the file; numeric columns are parsed afterwards
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    shortdescription: String,
    #[serde(default)]
    location: String,
    studycredit: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    module_tags: Option<String>,
}

/// Reads module records from CSV data with a header row
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ModuleRecord>, CorpusError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(CorpusError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for (record, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        records.push(ModuleRecord {
            id: parse_integer("id", record, &row.id)?,
            study_credit: parse_integer("studycredit", record, &row.studycredit)?,
            name: row.name,
            shortdescription: row.shortdescription,
            location: row.location,
            level: row.level,
            module_tags: row.module_tags.filter(|tags| !tags.trim().is_empty()),
        });
    }

    if records.is_empty() {
        return Err(CorpusError::Empty);
    }
    Ok(records)
}

/// Accepts integers and integral floats such as "15.0"
fn parse_integer(field: &'static str, record: usize, value: &str) -> Result<i64, CorpusError> {
    let trimmed = value.trim();
    let invalid = || CorpusError::InvalidNumber {
        field,
        record,
        value: value.to_string(),
    };

    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(number);
    }
    match trimmed.parse::<f64>() {
        Ok(number)
            if number.is_finite()
                && number.fract() == 0.0
                && number >= i64::MIN as f64
                && number < i64::MAX as f64 =>
        {
            Ok(number as i64)
        }
        _ => Err(invalid()),
    }
}
