use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::domains::production::{ProductionRow, Row};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::routes::categories::parse_year;

/// GET /arquivo/producao
pub async fn production_rows_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<Row>>> {
    Ok(Json(state.production.all_rows().await?))
}

/// GET /arquivo/producao/:year
pub async fn production_year_handler(
    Extension(state): Extension<AppState>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<ProductionRow>>> {
    let year = parse_year(&year)?;
    Ok(Json(state.production.rows_for_year(year).await?))
}
