//! JSON REST API over the dashboard.
//!
//! Handlers return structured records only; presentation is up to the
//! client.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lv_records::{
    listing::parse_party_filter, BillFilter, BillNumber, BillNumberError, BillStatus,
    BillTypeFilter,
};
use serde::{Deserialize, Serialize};

use crate::config::DefaultsConfig;
use crate::congress::Chamber;
use crate::dashboard::{
    BillDetail, BillPage, BillQuery, Dashboard, UpstreamUnavailable, VoteAnalysis,
};

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced by the REST handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidQuery(String),

    #[error(transparent)]
    UnparseableBillNumber(#[from] BillNumberError),

    #[error(transparent)]
    Upstream(#[from] UpstreamUnavailable),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::UnparseableBillNumber(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

/// Query string of `GET /bills`.
#[derive(Debug, Default, Deserialize)]
pub struct ListBillsParams {
    pub congress: Option<u32>,
    pub chamber: Option<String>,
    pub bill_type: Option<String>,
    pub party: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListBillsParams {
    fn into_query(self, defaults: &DefaultsConfig) -> Result<BillQuery, ApiError> {
        fn parse_param<T, E: std::fmt::Display>(
            raw: Option<String>,
            parse: impl Fn(&str) -> Result<T, E>,
        ) -> Result<Option<T>, ApiError> {
            raw.filter(|value| !value.trim().is_empty())
                .map(|value| parse(&value))
                .transpose()
                .map_err(|err| ApiError::InvalidQuery(err.to_string()))
        }

        let chamber =
            parse_param(self.chamber, str::parse::<Chamber>)?.unwrap_or(defaults.chamber);
        let filter = BillFilter {
            bill_type: parse_param(self.bill_type, str::parse::<BillTypeFilter>)?,
            party: parse_param(self.party, parse_party_filter)?,
            status: parse_param(self.status, str::parse::<BillStatus>)?,
        };

        Ok(BillQuery {
            congress: self.congress.unwrap_or(defaults.congress),
            chamber,
            filter,
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Create the REST router.
///
/// Expects `Extension<Arc<Dashboard>>` and `Extension<DefaultsConfig>` layers.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/bills", get(list_bills))
        .route("/bills/{congress}/{bill_number}", get(bill_detail))
        .route("/bills/{congress}/{bill_number}/votes", get(bill_votes))
}

#[allow(clippy::unused_async)] // Required for Axum handler signature
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn list_bills(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Extension(defaults): Extension<DefaultsConfig>,
    params: Result<Query<ListBillsParams>, QueryRejection>,
) -> Result<Json<BillPage>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query(&defaults)?;
    Ok(Json(dashboard.list_bills(&query).await?))
}

async fn bill_detail(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    path: Result<Path<(u32, String)>, PathRejection>,
) -> Result<Json<BillDetail>, ApiError> {
    let Path((congress, bill_number)) = path?;
    let bill = BillNumber::parse(&bill_number)?;
    Ok(Json(dashboard.bill_detail(congress, &bill).await))
}

async fn bill_votes(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    path: Result<Path<(u32, String)>, PathRejection>,
) -> Result<Json<Vec<VoteAnalysis>>, ApiError> {
    let Path((congress, bill_number)) = path?;
    let bill = BillNumber::parse(&bill_number)?;
    Ok(Json(dashboard.vote_analysis(congress, &bill).await))
}
