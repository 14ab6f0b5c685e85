use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use vitibrasil_scraper::Value;

/// Columns copied into every per-year row
const KEY_COLUMNS: [&str; 3] = ["id", "control", "produto"];

/// Errors reading the production file
#[derive(Error, Debug)]
pub enum ProductionError {
    #[error("Production file not found")]
    NotFound(PathBuf),

    #[error("Production file is empty")]
    Empty,

    #[error("Year {year} not found. Available years: {}", available.join(", "))]
    YearNotFound { year: i32, available: Vec<String> },

    #[error("Production file has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Failed to read production file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse production file: {0}")]
    Csv(#[from] csv::Error),
}

/// A full row, columns in file order
pub type Row = IndexMap<String, Value>;

/// One product's production in a single year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionRow {
    pub id: Value,
    pub control: Value,
    pub produto: Value,
    pub producao: Value,
}

/// The local production file (`;` or `,` separated)
#[derive(Debug, Clone)]
pub struct ProductionFile {
    path: PathBuf,
}

struct Parsed {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// `;` when the header line contains one, `,` otherwise
fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    if header.contains(';') {
        b';'
    } else {
        b','
    }
}

fn parse(content: &str) -> Result<Parsed, ProductionError> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Err(ProductionError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(content))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(Parsed { headers, rows })
}

impl ProductionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Parsed, ProductionError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProductionError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        let parsed = parse(&content)?;
        debug!(
            path = %self.path.display(),
            columns = parsed.headers.len(),
            rows = parsed.rows.len(),
            "Loaded production file"
        );
        Ok(parsed)
    }

    /// Every row with every column; missing trailing cells become empty text
    pub async fn all_rows(&self) -> Result<Vec<Row>, ProductionError> {
        let parsed = self.load().await?;
        Ok(parsed
            .rows
            .iter()
            .map(|cells| {
                parsed
                    .headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        let cell = cells.get(i).map(String::as_str).unwrap_or("");
                        (header.clone(), Value::from_cell(cell))
                    })
                    .collect()
            })
            .collect())
    }

    /// Key columns plus that year's figure, renamed to `producao`
    pub async fn rows_for_year(&self, year: i32) -> Result<Vec<ProductionRow>, ProductionError> {
        let parsed = self.load().await?;

        let column = |name: &str| parsed.headers.iter().position(|h| h == name);

        let year_key = year.to_string();
        let year_index = column(&year_key).ok_or_else(|| ProductionError::YearNotFound {
            year,
            available: parsed
                .headers
                .iter()
                .filter(|h| !h.is_empty() && h.chars().all(|c| c.is_ascii_digit()))
                .cloned()
                .collect(),
        })?;

        let mut key_indexes = [0usize; 3];
        for (slot, name) in key_indexes.iter_mut().zip(KEY_COLUMNS) {
            *slot = column(name).ok_or(ProductionError::MissingColumn(name))?;
        }

        let cell = |cells: &[String], i: usize| {
            Value::from_cell(cells.get(i).map(String::as_str).unwrap_or(""))
        };

        Ok(parsed
            .rows
            .iter()
            .map(|cells| ProductionRow {
                id: cell(cells, key_indexes[0]),
                control: cell(cells, key_indexes[1]),
                produto: cell(cells, key_indexes[2]),
                producao: cell(cells, year_index),
            })
            .collect())
    }
}
