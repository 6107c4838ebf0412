use chrono::NaiveDate;

use shared_resource::{FieldKind, FormData, FormField, Notices, ResourceConfig, SearchMode, Stat};
use shared_utils::dates::{format_numeric, iso, parse_date, same_month};
use shared_utils::html::{escape, initials, or_na};

use crate::models::Patient;

pub const GENDERS: &[&str] = &["Masculino", "Femenino", "Otro"];

const FORM_FIELDS: &[FormField] = &[
    FormField::new("nombre", "Nombre", FieldKind::Text),
    FormField::new("apellido", "Apellido", FieldKind::Text),
    FormField::new("fechaNacimiento", "Fecha de Nacimiento", FieldKind::Date { default_today: false }),
    FormField::new("genero", "Género", FieldKind::Select(GENDERS)),
    FormField::new("telefono", "Teléfono", FieldKind::Tel),
    FormField::new("email", "Email", FieldKind::Email),
];

pub static PATIENTS: ResourceConfig<Patient> = ResourceConfig {
    endpoint: "/pacientes",
    base_path: "/patients",
    title: "Pacientes",
    search: SearchMode::Remote { path: "/pacientes/query", param: "nombre" },
    search_placeholder: "Buscar paciente por nombre...",
    toolbar: "",
    required_fields: &["nombre", "apellido"],
    required_message: "Nombre y apellido son requeridos",
    form_fields: FORM_FIELDS,
    table_headers: &["Paciente", "Edad", "Teléfono", "Email", "Fecha de Nacimiento", "Género"],
    empty_message: "No se encontraron pacientes",
    notices: Notices {
        created: "Paciente creado",
        updated: "Paciente actualizado exitosamente",
        deleted: "Paciente eliminado exitosamente",
    },
    id_of: |patient| patient.id,
    row_template: patient_row,
    detail_template: patient_detail,
    stats: patient_stats,
    from_form: patient_from_form,
    to_form: patient_to_form,
};

fn display_date(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(format_numeric)
        .unwrap_or_else(|| "N/A".to_string())
}

fn display_age(patient: &Patient, today: NaiveDate) -> String {
    match patient.age(today) {
        Some(age) => format!("{} años", age),
        None => "N/A años".to_string(),
    }
}

pub fn patient_row(patient: &Patient, today: NaiveDate) -> String {
    let id = patient.id.map(|id| id.to_string()).unwrap_or_default();
    format!(
        r#"<td><div class="d-flex align-items-center"><div class="avatar me-3">{initials}</div><div><div class="fw-semibold">{name}</div><small class="text-muted">ID: {id}</small></div></div></td><td>{age}</td><td>{phone}</td><td>{email}</td><td>{birth}</td><td>{gender}</td>"#,
        initials = initials(patient.nombre.as_deref(), patient.apellido.as_deref(), ("", "")),
        name = escape(&patient.full_name()),
        id = id,
        age = display_age(patient, today),
        phone = or_na(patient.telefono.as_deref()),
        email = or_na(patient.email.as_deref()),
        birth = display_date(patient.fecha_nacimiento.as_deref()),
        gender = or_na(patient.genero.as_deref()),
    )
}

pub fn patient_detail(patient: &Patient) -> String {
    format!(
        r#"<div class="d-flex align-items-center mb-3"><div class="avatar me-3">{initials}</div><h4 class="mb-0">{name}</h4></div>
<dl class="row mb-0">
  <dt class="col-sm-4">Fecha de Nacimiento</dt><dd class="col-sm-8">{birth}</dd>
  <dt class="col-sm-4">Género</dt><dd class="col-sm-8">{gender}</dd>
  <dt class="col-sm-4">Teléfono</dt><dd class="col-sm-8">{phone}</dd>
  <dt class="col-sm-4">Email</dt><dd class="col-sm-8">{email}</dd>
  <dt class="col-sm-4">Registrado</dt><dd class="col-sm-8">{created}</dd>
</dl>"#,
        initials = initials(patient.nombre.as_deref(), patient.apellido.as_deref(), ("", "")),
        name = escape(&patient.full_name()),
        birth = display_date(patient.fecha_nacimiento.as_deref()),
        gender = or_na(patient.genero.as_deref()),
        phone = or_na(patient.telefono.as_deref()),
        email = or_na(patient.email.as_deref()),
        created = display_date(patient.fecha_creacion.as_deref()),
    )
}

pub fn patient_stats(patients: &[Patient], today: NaiveDate) -> Vec<Stat> {
    let new_this_month = patients
        .iter()
        .filter(|p| p.registered_on().is_some_and(|date| same_month(date, today)))
        .count();

    vec![
        Stat::count("totalPacientes", "Total Pacientes", patients.len()),
        Stat::count("nuevosEsteMes", "Nuevos este mes", new_this_month),
    ]
}

pub fn patient_from_form(form: &FormData) -> Result<Patient, String> {
    Ok(Patient {
        id: None,
        nombre: form.get_owned("nombre"),
        apellido: form.get_owned("apellido"),
        fecha_nacimiento: form.get_owned("fechaNacimiento"),
        genero: form.get_owned("genero"),
        telefono: form.get_owned("telefono"),
        email: form.get_owned("email"),
        fecha_creacion: None,
    })
}

pub fn patient_to_form(patient: &Patient) -> FormData {
    let mut form = FormData::new();
    form.set("nombre", patient.nombre.clone());
    form.set("apellido", patient.apellido.clone());
    form.set("fechaNacimiento", patient.birth_date().map(iso));
    form.set("genero", patient.genero.clone());
    form.set("telefono", patient.telefono.clone());
    form.set("email", patient.email.clone());
    form
}
