use chrono::NaiveDate;
use serde_json::Value;

use shared_resource::{FieldKind, FormData, FormField, Notices, ResourceConfig, SearchMode, Stat};
use shared_utils::dates::iso;
use shared_utils::html::{escape, initials, or_default, or_na};

use crate::models::{Appointment, AppointmentStatus, PersonRef, DEFAULT_STATUS, DEFAULT_TYPE};

pub const REQUIRED_MESSAGE: &str = "Paciente, Especialista, Fecha y Hora son requeridos";

const FORM_FIELDS: &[FormField] = &[
    FormField::new("pacienteId", "Paciente", FieldKind::Lookup { endpoint: "/pacientes", label: patient_label }),
    FormField::new("especialistaId", "Especialista", FieldKind::Lookup { endpoint: "/personal", label: specialist_label }),
    FormField::new("fecha", "Fecha", FieldKind::Date { default_today: true }),
    FormField::new("hora", "Hora", FieldKind::Time),
    FormField::new("tipoCita", "Tipo de Cita", FieldKind::Text),
    FormField::new("estado", "Estado", FieldKind::Select(&AppointmentStatus::ALL)),
    FormField::new("notas", "Notas", FieldKind::TextArea),
];

const FILTER_FORM: &str = r#"<form method="get" action="/appointments/filter" class="row g-2 mb-3" id="filterForm">
  <div class="col-md-3"><select name="estado" class="form-select"><option value="todos">Todos los estados</option><option value="Programada">Programada</option><option value="Confirmada">Confirmada</option><option value="Pendiente">Pendiente</option><option value="Completada">Completada</option><option value="Cancelada">Cancelada</option></select></div>
  <div class="col-md-3"><input type="date" name="fecha" class="form-control" /></div>
  <div class="col-md-2"><input type="number" name="paciente" class="form-control" placeholder="ID paciente" /></div>
  <div class="col-md-2"><input type="number" name="especialista" class="form-control" placeholder="ID especialista" /></div>
  <div class="col-md-2 d-flex gap-2"><button type="submit" class="btn btn-outline-primary"><i class="bi bi-funnel"></i> Filtrar</button><a href="/appointments" class="btn btn-outline-secondary">Limpiar</a></div>
</form>"#;

pub static APPOINTMENTS: ResourceConfig<Appointment> = ResourceConfig {
    endpoint: "/citas",
    base_path: "/appointments",
    title: "Citas",
    search: SearchMode::Local { matches: appointment_matches },
    search_placeholder: "Buscar por paciente, especialista, tipo o estado...",
    toolbar: FILTER_FORM,
    required_fields: &["pacienteId", "especialistaId", "fecha", "hora"],
    required_message: REQUIRED_MESSAGE,
    form_fields: FORM_FIELDS,
    table_headers: &["Fecha y Hora", "Paciente", "Especialista", "Tipo", "Estado"],
    empty_message: "No hay citas para mostrar",
    notices: Notices {
        created: "Cita creada exitosamente",
        updated: "Cita actualizada exitosamente",
        deleted: "Cita eliminada exitosamente",
    },
    id_of: |appointment| appointment.id,
    row_template: appointment_row,
    detail_template: appointment_detail,
    stats: appointment_stats,
    from_form: appointment_from_form,
    to_form: appointment_to_form,
};

fn text(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn id_text(value: &Value) -> String {
    value.get("id").map(|id| id.to_string()).unwrap_or_default()
}

pub fn patient_label(patient: &Value) -> String {
    format!("{} {} (ID: {})", text(patient, "nombre"), text(patient, "apellido"), id_text(patient))
}

pub fn specialist_label(specialist: &Value) -> String {
    let specialty = specialist
        .get("especialidad")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Especialista");
    format!(
        "{} {} - {} (ID: {})",
        text(specialist, "nombre"),
        text(specialist, "apellido"),
        specialty,
        id_text(specialist)
    )
}

/// Case-insensitive substring match; `term` is already lowercased.
pub fn appointment_matches(appointment: &Appointment, term: &str) -> bool {
    let contains = |value: Option<&String>| value.is_some_and(|v| v.to_lowercase().contains(term));
    let paciente = appointment.paciente.as_ref();
    let especialista = appointment.especialista.as_ref();

    contains(paciente.and_then(|p| p.nombre.as_ref()))
        || contains(paciente.and_then(|p| p.apellido.as_ref()))
        || contains(especialista.and_then(|e| e.nombre.as_ref()))
        || contains(especialista.and_then(|e| e.apellido.as_ref()))
        || contains(appointment.tipo_cita.as_ref())
        || contains(appointment.estado.as_ref())
}

fn person_cell(person: Option<&PersonRef>, fallback: (&str, &str)) -> String {
    let empty = PersonRef::default();
    let person = person.unwrap_or(&empty);
    format!(
        r#"<td><div class="d-flex align-items-center"><div class="avatar me-2">{initials}</div><div><div class="fw-semibold">{first} {last}</div><small class="text-muted">ID: {id}</small></div></div></td>"#,
        initials = initials(person.nombre.as_deref(), person.apellido.as_deref(), fallback),
        first = or_na(person.nombre.as_deref()),
        last = escape(person.apellido.as_deref().unwrap_or_default()),
        id = person.id.map(|id| id.to_string()).unwrap_or_else(|| "N/A".to_string()),
    )
}

pub fn status_badge(estado: Option<&str>) -> String {
    format!(
        r#"<span class="badge {}">{}</span>"#,
        AppointmentStatus::parse(estado).badge_class(),
        or_default(estado, "Pendiente")
    )
}

pub fn appointment_row(appointment: &Appointment, _today: NaiveDate) -> String {
    format!(
        r#"<td><div class="fw-semibold">{hora}</div><small class="text-muted">{fecha}</small></td>{patient}{specialist}<td>{tipo}</td><td>{badge}</td>"#,
        hora = or_na(appointment.hora.as_deref()),
        fecha = or_na(appointment.fecha.as_deref()),
        patient = person_cell(appointment.paciente.as_ref(), ("P", "X")),
        specialist = person_cell(appointment.especialista.as_ref(), ("E", "S")),
        tipo = or_default(appointment.tipo_cita.as_deref(), DEFAULT_TYPE),
        badge = status_badge(appointment.estado.as_deref()),
    )
}

pub fn appointment_detail(appointment: &Appointment) -> String {
    format!(
        r#"<h4 class="mb-3">Detalles de la Cita</h4>
<dl class="row mb-0">
  <dt class="col-sm-4">Paciente</dt><dd class="col-sm-8">{patient}</dd>
  <dt class="col-sm-4">Especialista</dt><dd class="col-sm-8">{specialist}</dd>
  <dt class="col-sm-4">Fecha</dt><dd class="col-sm-8">{fecha}</dd>
  <dt class="col-sm-4">Hora</dt><dd class="col-sm-8">{hora}</dd>
  <dt class="col-sm-4">Tipo</dt><dd class="col-sm-8">{tipo}</dd>
  <dt class="col-sm-4">Estado</dt><dd class="col-sm-8">{badge}</dd>
  <dt class="col-sm-4">Motivo</dt><dd class="col-sm-8">{motivo}</dd>
  <dt class="col-sm-4">Notas</dt><dd class="col-sm-8">{notas}</dd>
</dl>"#,
        patient = or_na(appointment.patient_name().as_deref()),
        specialist = or_na(appointment.specialist_name().as_deref()),
        fecha = or_na(appointment.fecha.as_deref()),
        hora = or_na(appointment.hora.as_deref()),
        tipo = or_default(appointment.tipo_cita.as_deref(), DEFAULT_TYPE),
        badge = status_badge(appointment.estado.as_deref()),
        motivo = or_default(appointment.motivo.as_deref(), "Sin motivo registrado"),
        notas = or_default(appointment.notas.as_deref(), "Sin notas"),
    )
}

pub fn appointment_stats(appointments: &[Appointment], today: NaiveDate) -> Vec<Stat> {
    let with_status = |status: AppointmentStatus| appointments.iter().filter(|a| a.status() == status).count();

    vec![
        Stat::count("totalCitas", "Total Citas", appointments.len()),
        Stat::count("citasHoy", "Citas Hoy", appointments.iter().filter(|a| a.is_on(today)).count()),
        Stat::count("citasCompletadas", "Completadas", with_status(AppointmentStatus::Completada)),
        Stat::count("citasPendientes", "Pendientes", with_status(AppointmentStatus::Pendiente)),
        Stat::count("citasCanceladas", "Canceladas", with_status(AppointmentStatus::Cancelada)),
    ]
}

pub fn appointment_from_form(form: &FormData) -> Result<Appointment, String> {
    let (Some(paciente), Some(especialista)) = (form.get_id("pacienteId"), form.get_id("especialistaId")) else {
        return Err(REQUIRED_MESSAGE.to_string());
    };

    Ok(Appointment {
        id: None,
        paciente: Some(PersonRef::with_id(paciente)),
        especialista: Some(PersonRef::with_id(especialista)),
        fecha: form.get_owned("fecha"),
        hora: form.get_owned("hora"),
        tipo_cita: Some(form.get("tipoCita").unwrap_or(DEFAULT_TYPE).to_string()),
        estado: Some(form.get("estado").unwrap_or(DEFAULT_STATUS).to_string()),
        notas: form.get_owned("notas"),
        motivo: None,
    })
}

pub fn appointment_to_form(appointment: &Appointment) -> FormData {
    let id_of = |person: &Option<PersonRef>| person.as_ref().and_then(|p| p.id).map(|id| id.to_string());

    let mut form = FormData::new();
    form.set("pacienteId", id_of(&appointment.paciente));
    form.set("especialistaId", id_of(&appointment.especialista));
    form.set("fecha", appointment.date().map(iso));
    form.set("hora", appointment.hora.as_deref().map(|h| h.get(..5).unwrap_or(h).to_string()));
    form.set("tipoCita", appointment.tipo_cita.clone());
    form.set("estado", appointment.estado.clone());
    form.set("notas", appointment.notas.clone());
    form
}
