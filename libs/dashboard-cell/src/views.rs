use chrono::NaiveTime;

use appointment_cell::models::Appointment;
use shared_utils::html::{escape, or_default, progress_bar, stat_card};

use crate::models::{DashboardAlert, DashboardSummary, DistributionEntry, ReportSummary, RECENT_ACTIVITY};

/// "$1,250"
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

fn alert(alert: &DashboardAlert) -> String {
    format!(
        r#"<div class="alert alert-{} py-2" role="alert"><small><strong>{}</strong> {}</small></div>"#,
        alert.kind.css(),
        alert.kind.label(),
        escape(&alert.message)
    )
}

fn upcoming_item(appointment: &Appointment) -> String {
    let paciente = appointment.paciente.clone().unwrap_or_default();
    let especialista = appointment.especialista.clone().unwrap_or_default();

    format!(
        r#"<div class="appointment-item mb-2">
  <div class="appointment-time">{hora}</div>
  <div class="appointment-details">
    <div class="appointment-patient">{paciente} {paciente_apellido}</div>
    <div class="appointment-type">{tipo}</div>
  </div>
  <div class="appointment-doctor">{especialista} {especialista_apellido}</div>
</div>"#,
        hora = or_default(appointment.hora.as_deref(), "—"),
        paciente = or_default(paciente.nombre.as_deref(), "Paciente"),
        paciente_apellido = escape(paciente.apellido.as_deref().unwrap_or_default()),
        tipo = or_default(appointment.tipo_cita.as_deref(), "Consulta"),
        especialista = or_default(especialista.nombre.as_deref(), "Especialista"),
        especialista_apellido = escape(especialista.apellido.as_deref().unwrap_or_default()),
    )
}

fn activity(loaded_at: NaiveTime) -> String {
    let hora = loaded_at.format("%H:%M");
    RECENT_ACTIVITY
        .iter()
        .map(|text| {
            format!(
                r#"<div class="activity-item mb-2"><div class="activity-time">{}</div><div class="activity-text">{}</div></div>"#,
                hora, text
            )
        })
        .collect()
}

/// `loaded_at` stamps the "Actividad reciente" entries.
pub fn render_dashboard(summary: &DashboardSummary, loaded_at: NaiveTime) -> String {
    let cards = [
        stat_card("totalPacientesdash", "Pacientes", &summary.total_patients.to_string()),
        stat_card("totalPersonaldash", "Personal", &summary.total_staff.to_string()),
        stat_card("totalCitasdash", "Citas", &summary.total_appointments.to_string()),
        stat_card("citasHoydash", "Citas de hoy", &summary.today_appointments.to_string()),
        stat_card("ingresosMes", "Ingresos del mes", &format_money(summary.month_revenue)),
    ]
    .concat();

    let buckets = [
        stat_card("citasCompletadasdash", "Completadas", &summary.completed.to_string()),
        stat_card("citasPendientesdash", "Pendientes", &summary.pending.to_string()),
        stat_card("citasCanceladasdash", "Canceladas", &summary.cancelled.to_string()),
    ]
    .concat();

    let upcoming = if summary.upcoming.is_empty() {
        r#"<p class="text-center text-muted">No hay citas programadas</p>"#.to_string()
    } else {
        summary.upcoming.iter().map(upcoming_item).collect()
    };

    let alerts: String = summary.alerts.iter().map(alert).collect();

    format!(
        r#"<div class="row row-cols-1 row-cols-md-5 g-3 mb-3">{cards}</div>
<div class="row row-cols-1 row-cols-md-3 g-3 mb-4">{buckets}</div>
<div class="row g-4">
  <div class="col-md-8"><div class="card"><div class="card-header"><h5 class="mb-0">Próximas citas</h5></div><div class="card-body" id="proximasCitasBody">{upcoming}</div></div></div>
  <div class="col-md-4">
    <div class="card mb-4"><div class="card-header"><h5 class="mb-0">Alertas</h5></div><div class="card-body" id="alertasContainer">{alerts}</div></div>
    <div class="card"><div class="card-header"><h5 class="mb-0">Actividad reciente</h5></div><div class="card-body" id="actividadReciente">{activity}</div></div>
  </div>
</div>"#,
        cards = cards,
        buckets = buckets,
        upcoming = upcoming,
        alerts = alerts,
        activity = activity(loaded_at),
    )
}

fn distribution(id: &str, color: &str, entries: &[DistributionEntry]) -> String {
    let items: String = entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="mb-2"><strong>{}</strong> - {} citas ({:.1}%){}</div>"#,
                escape(&entry.label),
                entry.count,
                entry.percentage,
                progress_bar(color, entry.percentage)
            )
        })
        .collect();

    format!(r#"<div id="{}">{}</div>"#, id, items)
}

pub fn render_reports(report: &ReportSummary) -> String {
    format!(
        r#"<div class="row row-cols-1 row-cols-md-2 g-3 mb-4">{total}{revenue}</div>
<div class="row g-4">
  <div class="col-md-6"><div class="card"><div class="card-header"><h5 class="mb-0">Citas por especialista</h5></div><div class="card-body">{by_specialist}</div></div></div>
  <div class="col-md-6"><div class="card"><div class="card-header"><h5 class="mb-0">Tipos de cita</h5></div><div class="card-body">{by_type}</div></div></div>
</div>"#,
        total = stat_card("totalCitasReporte", "Total de citas", &report.total_appointments.to_string()),
        revenue = stat_card("ingresosReporte", "Ingresos estimados", &format_money(report.revenue)),
        by_specialist = distribution("citasPorEspecialista", "primary", &report.by_specialist),
        by_type = distribution("tiposDeCita", "success", &report.by_type),
    )
}
