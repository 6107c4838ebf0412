use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_utils::dates::{parse_date, same_month};

/// A member of the clinic staff; specialists are the ones appointments point at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_dni: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_licencia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lugar_estudio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.nombre.as_deref().unwrap_or_default(),
            self.apellido.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        self.fecha_creacion.as_deref().and_then(parse_date)
    }

    /// Records without a creation date count as added this month.
    pub fn is_new_in(&self, today: NaiveDate) -> bool {
        match self.fecha_creacion.as_deref() {
            None => true,
            Some(raw) => parse_date(raw)
                .is_some_and(|date| same_month(date, today)),
        }
    }
}
