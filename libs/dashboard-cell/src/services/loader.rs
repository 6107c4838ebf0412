use tracing::{debug, error};

use appointment_cell::models::Appointment;
use patient_cell::Patient;
use shared_client::{BackendClient, ClientError};
use staff_cell::Staff;

pub struct DashboardService {
    client: BackendClient,
}

impl DashboardService {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Appointments, patients and staff fetched concurrently. The first
    /// failure fails the whole load.
    pub async fn load_all(&self) -> Result<(Vec<Appointment>, Vec<Patient>, Vec<Staff>), ClientError> {
        debug!("Loading dashboard collections");

        futures::try_join!(
            self.client.get_list::<Appointment>("/citas"),
            self.client.get_list::<Patient>("/pacientes"),
            self.client.get_list::<Staff>("/personal"),
        )
        .map_err(|e| {
            error!("Failed to load dashboard data: {}", e);
            e
        })
    }

    pub async fn load_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        debug!("Loading appointments for reports");
        self.client.get_list("/citas").await
    }
}
