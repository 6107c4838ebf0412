use chrono::NaiveDate;
use tracing::{debug, error};

use appointment_cell::models::Appointment;
use shared_client::{BackendClient, ClientError};
use shared_utils::dates::iso;

use crate::models::DayPanel;

pub struct DayScheduleService {
    client: BackendClient,
}

impl DayScheduleService {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Appointments of one day. A failed fetch becomes an inline error panel,
    /// except an expired session which still logs the user out.
    pub async fn load_day(&self, date: NaiveDate) -> Result<DayPanel, ClientError> {
        let path = format!("/citas/fecha/{}", iso(date));
        debug!("Loading appointments for {}", path);

        match self.client.get_list::<Appointment>(&path).await {
            Ok(appointments) if appointments.is_empty() => Ok(DayPanel::Empty(date)),
            Ok(appointments) => Ok(DayPanel::Loaded(date, sort_by_time(appointments))),
            Err(err) if err.is_session_expired() => Err(err),
            Err(err) => {
                error!("Failed to load appointments for {}: {}", date, err);
                Ok(DayPanel::Failed(date, err.to_string()))
            }
        }
    }
}

/// Ascending by `hora` as a string; a missing time sorts as "00:00".
pub fn sort_by_time(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by(|a, b| {
        let a = a.hora.as_deref().unwrap_or("00:00");
        let b = b.hora.as_deref().unwrap_or("00:00");
        a.cmp(b)
    });
    appointments
}
