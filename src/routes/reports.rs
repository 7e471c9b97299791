//! Report catalog and generation routes.

use axum::extract::State;
use axum::response::Json;

use crate::assistant::report::{self, CatalogEntry, GeneratedReport};
use crate::assistant::types::ReportRequest;
use crate::state::AppState;

/// `GET /api/reports`: report types offered by the dashboard.
pub async fn list_reports() -> Json<Vec<CatalogEntry>> {
    Json(report::catalog())
}

/// `POST /api/reports`: render one report after the simulated delay.
pub async fn generate(State(state): State<AppState>, Json(body): Json<ReportRequest>) -> Json<GeneratedReport> {
    Json(report::generate_report(&body, state.timing.report_delay).await)
}
