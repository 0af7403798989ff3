//! Request handlers for the API endpoints.

use axum::Json;
use axum::http::StatusCode;

use super::types::{ErrorResponse, ProductionItem, ProductionPlanRequest};
use crate::dispatch::{self, DispatchRequest};

/// Computes a production plan for a wire-format request.
///
/// `POST /productionplan` → 200 + `Vec<ProductionItem>` JSON in request
/// order, or 422 + `ErrorResponse` when the request is semantically
/// invalid or the dispatch is infeasible.
pub async fn post_production_plan(
    Json(wire): Json<ProductionPlanRequest>,
) -> Result<Json<Vec<ProductionItem>>, (StatusCode, Json<ErrorResponse>)> {
    let request = DispatchRequest::from(wire);

    let errors = request.validate();
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse { error: joined }),
        ));
    }

    match dispatch::plan(&request) {
        Ok(plan) => Ok(Json(
            plan.items.into_iter().map(ProductionItem::from).collect(),
        )),
        Err(e) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
