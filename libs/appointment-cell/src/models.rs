use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_utils::dates::{iso, parse_date};

pub const DEFAULT_TYPE: &str = "Consulta General";
pub const DEFAULT_STATUS: &str = "Programada";

/// Embedded patient or specialist. Payloads carry only the id; reads may
/// expand it to the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
}

impl PersonRef {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// "Nombre Apellido", or `None` when neither part is present.
    pub fn full_name(&self) -> Option<String> {
        let name = format!(
            "{} {}",
            self.nombre.as_deref().unwrap_or_default(),
            self.apellido.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paciente: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialista: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_cita: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    // Sent as null when empty.
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

impl Appointment {
    pub fn date(&self) -> Option<NaiveDate> {
        self.fecha.as_deref().and_then(parse_date)
    }

    /// Plain string equality against the ISO form of `day`.
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.fecha.as_deref() == Some(iso(day).as_str())
    }

    pub fn status(&self) -> AppointmentStatus {
        AppointmentStatus::parse(self.estado.as_deref())
    }

    /// Sort key for "next appointments": fecha then hora.
    pub fn schedule_key(&self) -> String {
        format!(
            "{}T{}",
            self.fecha.as_deref().unwrap_or_default(),
            self.hora.as_deref().unwrap_or_default()
        )
    }

    pub fn patient_name(&self) -> Option<String> {
        self.paciente.as_ref().and_then(PersonRef::full_name)
    }

    pub fn specialist_name(&self) -> Option<String> {
        self.especialista.as_ref().and_then(PersonRef::full_name)
    }
}

/// Known values of `estado`. Matching is exact, as the backend stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Programada,
    Confirmada,
    Pendiente,
    Completada,
    Cancelada,
    Other,
}

impl AppointmentStatus {
    pub const ALL: [&'static str; 5] = ["Programada", "Confirmada", "Pendiente", "Completada", "Cancelada"];

    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Programada") => Self::Programada,
            Some("Confirmada") => Self::Confirmada,
            Some("Pendiente") => Self::Pendiente,
            Some("Completada") => Self::Completada,
            Some("Cancelada") => Self::Cancelada,
            _ => Self::Other,
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Completada => "bg-success",
            Self::Pendiente => "bg-warning",
            Self::Programada => "bg-primary",
            Self::Cancelada => "bg-danger",
            Self::Confirmada => "bg-info",
            Self::Other => "bg-secondary",
        }
    }
}
