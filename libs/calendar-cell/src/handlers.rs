use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::extractor::CurrentSession;
use shared_utils::html::page;
use shared_utils::AppState;

use crate::models::{CalendarQuery, CalendarState, DayPanel};
use crate::services::grid::month_grid;
use crate::services::schedule::DayScheduleService;
use crate::views::render_calendar;

pub async fn calendar_page(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<CalendarQuery>,
) -> Result<Html<String>, AppError> {
    let today = state.today();
    let calendar = CalendarState::from_query(&query, today);
    debug!("Rendering calendar {} (selected: {:?})", calendar.title(), calendar.selected());

    let panel = match calendar.selected() {
        Some(date) => {
            let service = DayScheduleService::new(state.client(&session.storage));
            service.load_day(date).await?
        }
        None => DayPanel::Idle,
    };

    let cells = month_grid(&calendar, today);
    let body = render_calendar(&calendar, &cells, &panel);
    let username = session.storage.snapshot().await.username;

    Ok(Html(page("Calendario", "/calendar", username.as_deref(), &body)))
}
