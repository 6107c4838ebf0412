use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use serde::Deserialize;
use tracing::debug;

use shared_models::error::AppError;
use shared_resource::views::render_list;
use shared_utils::extractor::CurrentSession;
use shared_utils::html::{alert, page};
use shared_utils::AppState;

use crate::models::Appointment;
use crate::resource::APPOINTMENTS;

/// Values of the appointment filter form. Blank inputs count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilter {
    pub estado: Option<String>,
    pub fecha: Option<String>,
    pub paciente: Option<String>,
    pub especialista: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppointmentFilter {
    /// The single backend query answering this filter. The most specific
    /// criterion wins: specialist+date, specialist, patient, date, status,
    /// then the full list.
    pub fn backend_path(&self) -> String {
        let especialista = present(&self.especialista);
        let paciente = present(&self.paciente);
        let fecha = present(&self.fecha);
        let estado = present(&self.estado).filter(|e| *e != "todos");

        let enc = |v: &str| urlencoding::encode(v).into_owned();

        match (especialista, paciente, fecha, estado) {
            (Some(e), _, Some(f), _) => format!("/citas/especialista/{}/fecha/{}", enc(e), enc(f)),
            (Some(e), _, None, _) => format!("/citas/especialista/{}", enc(e)),
            (None, Some(p), _, _) => format!("/citas/paciente/{}", enc(p)),
            (None, None, Some(f), _) => format!("/citas/fecha/{}", enc(f)),
            (None, None, None, Some(s)) => format!("/citas/estado/{}", enc(s)),
            (None, None, None, None) => "/citas".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.backend_path() == "/citas"
    }

    /// Human-readable summary of the active criteria.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = [
            ("Estado", present(&self.estado).filter(|e| *e != "todos")),
            ("Fecha", present(&self.fecha)),
            ("Paciente", present(&self.paciente)),
            ("Especialista", present(&self.especialista)),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("{}: {}", label, v)))
        .collect();

        parts.join(", ")
    }
}

pub async fn filter_appointments(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Html<String>, AppError> {
    let client = state.client(&session.storage);
    let today = state.today();

    let path = filter.backend_path();
    debug!("Filtering appointments via {}", path);

    let appointments: Vec<Appointment> = client.get_list(&path).await?;
    let stats = (APPOINTMENTS.stats)(&appointments, today);

    let summary = if filter.is_empty() {
        String::new()
    } else {
        alert("info", &format!("Filtro aplicado: {}", filter.describe()))
    };

    let body = format!(
        "{}{}",
        summary,
        render_list(&APPOINTMENTS, &appointments, &stats, None, today)
    );
    let username = session.storage.snapshot().await.username;

    Ok(Html(page(APPOINTMENTS.title, APPOINTMENTS.base_path, username.as_deref(), &body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(estado: &str, fecha: &str, paciente: &str, especialista: &str) -> AppointmentFilter {
        let opt = |v: &str| Some(v.to_string());
        AppointmentFilter {
            estado: opt(estado),
            fecha: opt(fecha),
            paciente: opt(paciente),
            especialista: opt(especialista),
        }
    }

    #[test]
    fn test_specialist_and_date_use_combined_endpoint() {
        assert_eq!(
            filter("Pendiente", "2025-10-24", "1", "2").backend_path(),
            "/citas/especialista/2/fecha/2025-10-24"
        );
    }

    #[test]
    fn test_precedence_order() {
        assert_eq!(filter("Pendiente", "", "1", "2").backend_path(), "/citas/especialista/2");
        assert_eq!(filter("Pendiente", "2025-10-24", "1", "").backend_path(), "/citas/paciente/1");
        assert_eq!(filter("Pendiente", "2025-10-24", "", "").backend_path(), "/citas/fecha/2025-10-24");
        assert_eq!(filter("Pendiente", "", "", "").backend_path(), "/citas/estado/Pendiente");
    }

    #[test]
    fn test_todos_means_no_status_filter() {
        let all = filter("todos", "", " ", "");
        assert_eq!(all.backend_path(), "/citas");
        assert!(all.is_empty());
        assert_eq!(AppointmentFilter::default().backend_path(), "/citas");
    }

    #[test]
    fn test_describe_lists_active_criteria() {
        assert_eq!(
            filter("Cancelada", "", "7", "").describe(),
            "Estado: Cancelada, Paciente: 7"
        );
    }
}
