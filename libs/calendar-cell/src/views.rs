use chrono::{Datelike, NaiveDate};

use appointment_cell::models::Appointment;
use shared_utils::dates::{format_long, format_short};
use shared_utils::html::{escape, or_default};

use crate::models::{CalendarCell, CalendarState, DayPanel};

const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

fn cell(state: &CalendarState, cell: &CalendarCell) -> String {
    let mut classes = vec!["calendar-day"];
    if !cell.in_month {
        classes.push("outside");
    }
    if cell.is_today {
        classes.push("today");
    }
    if cell.is_selected {
        classes.push("selected-day");
    }
    let class = classes.join(" ");
    let day = cell.date.day();

    if cell.in_month {
        format!(
            r#"<a class="{}" data-date="{}" href="{}">{}</a>"#,
            class,
            cell.date.format("%Y-%m-%d"),
            state.day_href(cell.date),
            day
        )
    } else {
        format!(
            r#"<div class="{}" data-date="{}">{}</div>"#,
            class,
            cell.date.format("%Y-%m-%d"),
            day
        )
    }
}

pub fn render_grid(state: &CalendarState, cells: &[CalendarCell]) -> String {
    let headers: String = WEEKDAY_HEADERS
        .iter()
        .map(|d| format!(r#"<div class="calendar-weekday">{}</div>"#, d))
        .collect();
    let days: String = cells.iter().map(|c| cell(state, c)).collect();

    format!(
        r#"<div class="card">
  <div class="card-header d-flex justify-content-between align-items-center">
    <h5 class="mb-0">{title}</h5>
    <div class="calendar-nav btn-group btn-group-sm">
      <a class="btn btn-outline-secondary" href="{prev}" title="Mes anterior"><i class="bi bi-chevron-left"></i></a>
      <a class="btn btn-outline-secondary" href="{next}" title="Mes siguiente"><i class="bi bi-chevron-right"></i></a>
    </div>
  </div>
  <div class="card-body">
    <div class="calendar-grid">{headers}</div>
    <div class="calendar-grid" id="calendarDays">{days}</div>
  </div>
</div>"#,
        title = state.title(),
        prev = state.previous().href(),
        next = state.next().href(),
        headers = headers,
        days = days,
    )
}

fn slot(appointment: &Appointment) -> String {
    let paciente = appointment.paciente.as_ref().and_then(|p| p.nombre.as_deref());
    let especialista = appointment.especialista.as_ref().and_then(|e| e.nombre.as_deref());

    format!(
        r#"<div class="appointment-slot">
  <div class="time-slot">{hora}</div>
  <div class="appointment-info">
    <strong>{paciente}</strong><br>
    <small class="text-muted"><i class="bi bi-person-badge"></i> {especialista}</small><br>
    <small class="text-muted"><i class="bi bi-heart-pulse"></i> {tipo}</small><br>
    <small class="text-muted"><i class="bi bi-chat-left-text"></i> {motivo}</small>
  </div>
</div>"#,
        hora = or_default(appointment.hora.as_deref(), "Sin hora"),
        paciente = or_default(paciente, "Paciente desconocido"),
        especialista = or_default(especialista, "No asignado"),
        tipo = or_default(appointment.tipo_cita.as_deref(), "Sin tipo"),
        motivo = or_default(appointment.motivo.as_deref(), "Sin motivo registrado"),
    )
}

fn panel_card(title: &str, content: &str) -> String {
    format!(
        r#"<div class="card"><div class="card-header"><h5 class="mb-0">{}</h5></div><div class="card-body day-appointments">{}</div></div>"#,
        escape(title),
        content
    )
}

fn panel_title(date: NaiveDate) -> String {
    format!("Citas del día - {}", format_short(date))
}

pub fn render_day_panel(panel: &DayPanel) -> String {
    match panel {
        DayPanel::Idle => panel_card(
            "Citas del día",
            r#"<div class="text-center text-muted py-4"><em>Seleccione un día para ver sus citas</em></div>"#,
        ),
        DayPanel::Loaded(date, appointments) => {
            let slots: String = appointments.iter().map(slot).collect();
            panel_card(&panel_title(*date), &slots)
        }
        DayPanel::Empty(date) => panel_card(
            &panel_title(*date),
            &format!(
                r#"<div class="text-center text-muted py-4"><i class="bi bi-calendar-x fs-1 d-block mb-2"></i><em>No hay citas programadas para este día</em><p class="small mt-2">Fecha: {}</p></div>"#,
                format_long(*date)
            ),
        ),
        DayPanel::Failed(date, message) => panel_card(
            &panel_title(*date),
            &format!(
                r#"<div class="text-center text-danger py-4"><i class="bi bi-exclamation-triangle fs-1 d-block mb-2"></i><em>Error al cargar las citas</em><p class="small mt-2">{}</p></div>"#,
                or_default(Some(message.as_str()), "Intente nuevamente")
            ),
        ),
    }
}

pub fn render_calendar(state: &CalendarState, cells: &[CalendarCell], panel: &DayPanel) -> String {
    format!(
        r#"<div class="row g-4"><div class="col-md-6">{}</div><div class="col-md-6">{}</div></div>"#,
        render_grid(state, cells),
        render_day_panel(panel)
    )
}
