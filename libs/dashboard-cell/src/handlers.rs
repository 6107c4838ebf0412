use axum::{extract::State, response::Html, Extension};
use chrono::Local;

use shared_models::error::AppError;
use shared_utils::extractor::CurrentSession;
use shared_utils::html::page;
use shared_utils::AppState;

use crate::services::aggregate::{summarize_dashboard, summarize_reports};
use crate::services::loader::DashboardService;
use crate::views::{render_dashboard, render_reports};

pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>, AppError> {
    let service = DashboardService::new(state.client(&session.storage));
    let (appointments, patients, staff) = service.load_all().await?;

    let summary = summarize_dashboard(
        &appointments,
        &patients,
        &staff,
        state.today(),
        state.config.appointment_unit_price,
    );
    let username = session.storage.snapshot().await.username;

    Ok(Html(page("Dashboard", "/dashboard", username.as_deref(), &render_dashboard(&summary, Local::now().time()))))
}

pub async fn reports_page(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>, AppError> {
    let service = DashboardService::new(state.client(&session.storage));
    let appointments = service.load_appointments().await?;

    let report = summarize_reports(&appointments, state.config.appointment_unit_price);
    let username = session.storage.snapshot().await.username;

    Ok(Html(page("Reportes", "/reports", username.as_deref(), &render_reports(&report))))
}
