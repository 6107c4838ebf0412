use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_utils::dates::{age_on, parse_date};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.nombre.as_deref().unwrap_or_default(),
            self.apellido.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.fecha_nacimiento.as_deref().and_then(parse_date)
    }

    pub fn age(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date().map(|birth| age_on(birth, today))
    }

    /// Date used for "new this month": creation date, else birth date.
    pub fn registered_on(&self) -> Option<NaiveDate> {
        self.fecha_creacion
            .as_deref()
            .and_then(parse_date)
            .or_else(|| self.birth_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let patient = Patient {
            fecha_nacimiento: Some("2000-06-15".to_string()),
            ..Default::default()
        };

        assert_eq!(patient.age(day(2025, 6, 10)), Some(24));
        assert_eq!(patient.age(day(2025, 6, 20)), Some(25));
    }

    #[test]
    fn test_registered_on_falls_back_to_birth_date() {
        let patient = Patient {
            fecha_nacimiento: Some("1990-03-01T00:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(patient.registered_on(), Some(day(1990, 3, 1)));

        let patient = Patient {
            fecha_creacion: Some("2025-10-02T09:30:00".to_string()),
            ..patient
        };
        assert_eq!(patient.registered_on(), Some(day(2025, 10, 2)));
    }

    #[test]
    fn test_serializes_camel_case_without_nulls() {
        let patient = Patient {
            nombre: Some("Ana".to_string()),
            fecha_nacimiento: Some("2000-06-15".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json, serde_json::json!({ "nombre": "Ana", "fechaNacimiento": "2000-06-15" }));
    }
}
