//! HTTP Surface
//!
//! Routes requests onto the [`QueryEngine`]. Every response body is a JSON
//! string: either the formatted result or one of the fixed error messages.

use anyhow::Result;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::engine::{QueryEngine, CHECK_QUERY};
use crate::formulas::FormulaInfo;

pub const DEFAULT_MESSAGE: &str = "For FinancialFormulas API -> /api/FinancialFormulas";

pub const USAGE_MESSAGE: &str = "Please enter query (FinancialFormulas Function Name) and parameters \
     e.g /api/FinancialFormulas/CalcAssets/10/20";

#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
}

/// Query-string form: `?query=CalcAssets&p1=10&p2=20`
#[derive(Debug, Default, Deserialize)]
pub struct ConventionalQuery {
    query: Option<String>,
    p1: Option<String>,
    p2: Option<String>,
    p3: Option<String>,
    p4: Option<String>,
}

/// Path forms with one to four parameters
const PATH_ROUTES: [&str; 4] = [
    "/api/FinancialFormulas/{query}/{p1}",
    "/api/FinancialFormulas/{query}/{p1}/{p2}",
    "/api/FinancialFormulas/{query}/{p1}/{p2}/{p3}",
    "/api/FinancialFormulas/{query}/{p1}/{p2}/{p3}/{p4}",
];

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/default", get(default_message))
        .route("/api/FinancialFormulas", get(usage))
        .route("/api/FinancialFormulas/catalogue", get(list_formulas))
        .route("/api/FinancialFormulas/conventional", get(conventional_query));

    // A trailing slash addresses the same query
    for route in PATH_ROUTES {
        router = router
            .route(route, get(path_query))
            .route(&format!("{}/", route), get(path_query));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

pub async fn run_server(config: &ServerConfig, engine: QueryEngine) -> Result<()> {
    let app = create_router(AppState { engine });

    let addr = config.addr();
    info!("🚀 Formula server listening at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn default_message() -> Json<&'static str> {
    Json(DEFAULT_MESSAGE)
}

async fn usage() -> Json<&'static str> {
    Json(USAGE_MESSAGE)
}

async fn list_formulas(State(state): State<AppState>) -> Json<Vec<FormulaInfo>> {
    Json(state.engine.catalogue().entries().map(FormulaInfo::from).collect())
}

/// `/api/FinancialFormulas/{query}/{p1}/{p2?}/{p3?}/{p4?}`
async fn path_query(
    State(state): State<AppState>,
    segments: Result<Path<Vec<String>>, PathRejection>,
) -> Json<String> {
    let Path(segments) = match segments {
        Ok(segments) => segments,
        Err(rejection) => {
            debug!("Rejected path query: {}", rejection);
            return Json(CHECK_QUERY.to_string());
        }
    };
    let (name, params) = match segments.split_first() {
        Some((name, params)) => (Some(name.as_str()), params),
        None => (None, &[][..]),
    };
    let params: Vec<Option<&str>> = params.iter().map(|p| Some(p.as_str())).collect();

    debug!("Path query {:?} with {} parameters", name, params.len());
    Json(state.engine.respond_text(name, &params))
}

/// `/api/FinancialFormulas/conventional?query=..&p1=..`
async fn conventional_query(
    State(state): State<AppState>,
    query: Result<Query<ConventionalQuery>, QueryRejection>,
) -> Json<String> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            debug!("Rejected conventional query: {}", rejection);
            return Json(CHECK_QUERY.to_string());
        }
    };
    let params = [
        query.p1.as_deref(),
        query.p2.as_deref(),
        query.p3.as_deref(),
        query.p4.as_deref(),
    ];

    debug!("Conventional query {:?}", query.query);
    Json(state.engine.respond_text(query.query.as_deref(), &params))
}
