use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use coinboard_market_data::VsCurrency;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{MarketsQuery, MarketsResponse},
};

async fn get_markets(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MarketsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let vs = VsCurrency::parse(query.vs.as_deref())?;

    let view = state.market_service.get_markets(vs).await?;
    tracing::debug!(
        "Serving {} markets ({:?}, {} items)",
        view.vs,
        view.source,
        view.items.len()
    );

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(MarketsResponse::from(view)),
    ))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/markets",
        get(get_markets)
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}
