use crate::errors::AppError;
use crate::models::{FilterOptions, FilterParams, TrendFilters, TrendPoint, TrendResponse};
use crate::state::AppState;
use crate::trend::build_trend;
use crate::ui::{render_index, ChartState};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::error;

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Html<String>, AppError> {
    let filters = TrendFilters::from_params(&params)?;
    let page = match load_trend(&state, &filters).await {
        Ok(points) => render_index(&filters, ChartState::Loaded(&points)),
        Err(err) => {
            error!("rendering dashboard without data: {err}");
            render_index(&filters, ChartState::Failed)
        }
    };
    Ok(Html(page))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<TrendResponse>, AppError> {
    let filters = TrendFilters::from_params(&params)?;
    let data = load_trend(&state, &filters).await?;

    Ok(Json(TrendResponse {
        crime_type: filters.crime_type,
        years_to_display: filters.years.get(),
        location_area: filters.location.as_str().to_string(),
        description: filters.headline(),
        fetched_at: Utc::now(),
        data,
    }))
}

pub async fn get_options() -> Json<FilterOptions> {
    Json(FilterOptions::current())
}

async fn load_trend(state: &AppState, filters: &TrendFilters) -> Result<Vec<TrendPoint>, AppError> {
    let records = state.client.fetch(filters).await?;
    Ok(build_trend(records))
}
