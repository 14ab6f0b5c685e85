//! Per-category scraped endpoints
//!
//! Each handler receives its `CategoryScraper` as a route-level extension, so
//! one pair of handlers serves the whole catalogue.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use vitibrasil_scraper::{CategoryScraper, YearRecord};

use crate::server::error::{ApiError, ApiResult};

/// Oldest year the API serves
pub const MIN_YEAR: i32 = 1970;
/// Newest year the API serves
pub const MAX_YEAR: i32 = 2025;

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub ano_inicio: Option<i32>,
    pub ano_fim: Option<i32>,
}

fn check_year(field: &str, year: i32) -> ApiResult<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ApiError::BadRequest(format!(
            "{} must be between {} and {}",
            field, MIN_YEAR, MAX_YEAR
        )))
    }
}

/// Year path segment; non-numeric text is a 400 with the usual detail body
pub fn parse_year(raw: &str) -> ApiResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid year '{}'", raw)))
}

impl RangeParams {
    /// Both bounds present, inside the served years, and in order
    pub fn validate(&self) -> ApiResult<(i32, i32)> {
        let (Some(start), Some(end)) = (self.ano_inicio, self.ano_fim) else {
            return Err(ApiError::BadRequest(
                "ano_inicio and ano_fim are required".to_string(),
            ));
        };
        let start = check_year("ano_inicio", start)?;
        let end = check_year("ano_fim", end)?;
        if start > end {
            return Err(ApiError::BadRequest(
                "ano_inicio must be less than or equal to ano_fim".to_string(),
            ));
        }
        Ok((start, end))
    }
}

/// GET /<category>/:year
pub async fn year_handler(
    Extension(scraper): Extension<Arc<CategoryScraper>>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<YearRecord>>> {
    let year = check_year("year", parse_year(&year)?)?;
    let records = scraper.get_year(year).await?;
    Ok(Json(records.to_vec()))
}

/// GET /<category>?ano_inicio=&ano_fim=
pub async fn range_handler(
    Extension(scraper): Extension<Arc<CategoryScraper>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<Vec<YearRecord>>> {
    let (start, end) = params.validate()?;
    Ok(Json(scraper.get_range(start, end).await?))
}
