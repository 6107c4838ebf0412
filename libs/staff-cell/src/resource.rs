use chrono::NaiveDate;

use shared_resource::{FieldKind, FormData, FormField, Notices, ResourceConfig, SearchMode, Stat};
use shared_utils::dates::format_numeric;
use shared_utils::html::{escape, initials, or_na};

use crate::models::Staff;

pub const GENDERS: &[&str] = &["Masculino", "Femenino", "Otro"];

const FORM_FIELDS: &[FormField] = &[
    FormField::new("nombre", "Nombre", FieldKind::Text),
    FormField::new("apellido", "Apellido", FieldKind::Text),
    FormField::new("numeroDni", "DNI", FieldKind::Text),
    FormField::new("email", "Email", FieldKind::Email),
    FormField::new("telefono", "Teléfono", FieldKind::Tel),
    FormField::new("especialidad", "Especialidad", FieldKind::Text),
    FormField::new("genero", "Género", FieldKind::Select(GENDERS)),
    FormField::new("numeroLicencia", "Número de Licencia", FieldKind::Text),
    FormField::new("lugarEstudio", "Lugar de Estudio", FieldKind::Text),
];

pub static STAFF: ResourceConfig<Staff> = ResourceConfig {
    endpoint: "/personal",
    base_path: "/staff",
    title: "Personal",
    search: SearchMode::Remote { path: "/personal/query", param: "nombre" },
    search_placeholder: "Buscar personal por nombre...",
    toolbar: "",
    required_fields: &["nombre", "apellido"],
    required_message: "Nombre y apellido son requeridos",
    form_fields: FORM_FIELDS,
    table_headers: &["Personal", "DNI", "Email", "Teléfono", "Especialidad", "Género"],
    empty_message: "No se encontró personal",
    notices: Notices {
        created: "Personal agregado correctamente",
        updated: "Personal actualizado exitosamente",
        deleted: "Personal eliminado exitosamente",
    },
    id_of: |staff| staff.id,
    row_template: staff_row,
    detail_template: staff_detail,
    stats: staff_stats,
    from_form: staff_from_form,
    to_form: staff_to_form,
};

pub fn staff_row(staff: &Staff, _today: NaiveDate) -> String {
    let id = staff.id.map(|id| id.to_string()).unwrap_or_default();
    format!(
        r#"<td><div class="d-flex align-items-center"><div class="avatar me-3">{initials}</div><div><div class="fw-semibold">{name}</div><small class="text-muted">ID: {id}</small></div></div></td><td>{dni}</td><td>{email}</td><td>{phone}</td><td>{specialty}</td><td>{gender}</td>"#,
        initials = initials(staff.nombre.as_deref(), staff.apellido.as_deref(), ("", "")),
        name = escape(&staff.full_name()),
        id = id,
        dni = or_na(staff.numero_dni.as_deref()),
        email = or_na(staff.email.as_deref()),
        phone = or_na(staff.telefono.as_deref()),
        specialty = or_na(staff.especialidad.as_deref()),
        gender = or_na(staff.genero.as_deref()),
    )
}

pub fn staff_detail(staff: &Staff) -> String {
    let created = staff
        .created_on()
        .map(format_numeric)
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        r#"<div class="d-flex align-items-center mb-3"><div class="avatar me-3">{initials}</div><div><h4 class="mb-0">{name}</h4><small class="text-muted">{specialty}</small></div></div>
<dl class="row mb-0">
  <dt class="col-sm-4">DNI</dt><dd class="col-sm-8">{dni}</dd>
  <dt class="col-sm-4">Email</dt><dd class="col-sm-8">{email}</dd>
  <dt class="col-sm-4">Teléfono</dt><dd class="col-sm-8">{phone}</dd>
  <dt class="col-sm-4">Género</dt><dd class="col-sm-8">{gender}</dd>
  <dt class="col-sm-4">Número de Licencia</dt><dd class="col-sm-8">{license}</dd>
  <dt class="col-sm-4">Lugar de Estudio</dt><dd class="col-sm-8">{school}</dd>
  <dt class="col-sm-4">Registrado</dt><dd class="col-sm-8">{created}</dd>
</dl>"#,
        initials = initials(staff.nombre.as_deref(), staff.apellido.as_deref(), ("", "")),
        name = escape(&staff.full_name()),
        specialty = or_na(staff.especialidad.as_deref()),
        dni = or_na(staff.numero_dni.as_deref()),
        email = or_na(staff.email.as_deref()),
        phone = or_na(staff.telefono.as_deref()),
        gender = or_na(staff.genero.as_deref()),
        license = or_na(staff.numero_licencia.as_deref()),
        school = or_na(staff.lugar_estudio.as_deref()),
        created = created,
    )
}

pub fn staff_stats(staff: &[Staff], today: NaiveDate) -> Vec<Stat> {
    let new_this_month = staff.iter().filter(|s| s.is_new_in(today)).count();

    vec![
        Stat::count("totalStaff", "Total Personal", staff.len()),
        Stat::count("nuevosStaffEsteMes", "Nuevos este mes", new_this_month),
    ]
}

pub fn staff_from_form(form: &FormData) -> Result<Staff, String> {
    Ok(Staff {
        id: None,
        nombre: form.get_owned("nombre"),
        apellido: form.get_owned("apellido"),
        numero_dni: form.get_owned("numeroDni"),
        email: form.get_owned("email"),
        telefono: form.get_owned("telefono"),
        especialidad: form.get_owned("especialidad"),
        genero: form.get_owned("genero"),
        numero_licencia: form.get_owned("numeroLicencia"),
        lugar_estudio: form.get_owned("lugarEstudio"),
        fecha_creacion: None,
    })
}

pub fn staff_to_form(staff: &Staff) -> FormData {
    let mut form = FormData::new();
    form.set("nombre", staff.nombre.clone());
    form.set("apellido", staff.apellido.clone());
    form.set("numeroDni", staff.numero_dni.clone());
    form.set("email", staff.email.clone());
    form.set("telefono", staff.telefono.clone());
    form.set("especialidad", staff.especialidad.clone());
    form.set("genero", staff.genero.clone());
    form.set("numeroLicencia", staff.numero_licencia.clone());
    form.set("lugarEstudio", staff.lugar_estudio.clone());
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 24).unwrap()
    }

    #[test]
    fn test_row_falls_back_to_na() {
        let staff = Staff {
            id: Some(2),
            nombre: Some("Luis".into()),
            apellido: Some("Mora".into()),
            especialidad: Some("Psicología".into()),
            ..Default::default()
        };

        let row = staff_row(&staff, today());
        assert!(row.contains(r#"<div class="avatar me-3">LM</div>"#));
        assert!(row.contains("<td>Psicología</td>"));
        assert_eq!(row.matches("<td>N/A</td>").count(), 4);
    }

    #[test]
    fn test_stats_treat_missing_creation_as_new() {
        let staff = vec![
            Staff::default(),
            Staff { fecha_creacion: Some("2025-10-03".into()), ..Default::default() },
            Staff { fecha_creacion: Some("2024-01-03".into()), ..Default::default() },
        ];

        let stats = staff_stats(&staff, today());
        assert_eq!(stats[0], Stat::count("totalStaff", "Total Personal", 3));
        assert_eq!(stats[1].value, "2");
    }

    #[test]
    fn test_form_mapping_skips_blank_fields() {
        let form = FormData::new()
            .with("nombre", "Luis")
            .with("apellido", "Mora")
            .with("numeroLicencia", "  ");

        let staff = staff_from_form(&form).unwrap();
        let json = serde_json::to_value(&staff).unwrap();

        assert_eq!(json, serde_json::json!({ "nombre": "Luis", "apellido": "Mora" }));
    }
}
