use chrono::NaiveDate;

use appointment_cell::models::{Appointment, AppointmentStatus};
use patient_cell::Patient;
use shared_utils::dates::same_month;
use staff_cell::Staff;

use crate::models::{
    AlertKind, DashboardAlert, DashboardSummary, DistributionEntry, ReportSummary, UPCOMING_LIMIT,
};

pub fn summarize_dashboard(
    appointments: &[Appointment],
    patients: &[Patient],
    staff: &[Staff],
    today: NaiveDate,
    unit_price: u32,
) -> DashboardSummary {
    let count_status = |status: AppointmentStatus| {
        appointments.iter().filter(|a| a.status() == status).count()
    };

    let this_month = appointments
        .iter()
        .filter(|a| a.date().is_some_and(|d| same_month(d, today)))
        .count();
    let month_revenue = this_month as u64 * u64::from(unit_price);

    let mut alerts = vec![DashboardAlert {
        kind: AlertKind::Info,
        message: format!("Hay {} pacientes registrados actualmente.", patients.len()),
    }];
    if appointments.is_empty() {
        alerts.push(DashboardAlert {
            kind: AlertKind::Warning,
            message: "No hay citas programadas.".to_string(),
        });
    }

    DashboardSummary {
        total_patients: patients.len(),
        total_staff: staff.len(),
        total_appointments: appointments.len(),
        today_appointments: appointments.iter().filter(|a| a.is_on(today)).count(),
        completed: count_status(AppointmentStatus::Completada),
        pending: count_status(AppointmentStatus::Pendiente),
        cancelled: count_status(AppointmentStatus::Cancelada),
        month_revenue,
        upcoming: upcoming(appointments, UPCOMING_LIMIT),
        alerts,
    }
}

/// The first `limit` appointments ordered by fecha then hora.
pub fn upcoming(appointments: &[Appointment], limit: usize) -> Vec<Appointment> {
    let mut sorted = appointments.to_vec();
    sorted.sort_by_key(Appointment::schedule_key);
    sorted.truncate(limit);
    sorted
}

pub fn summarize_reports(appointments: &[Appointment], unit_price: u32) -> ReportSummary {
    let total = appointments.len();

    let by_specialist = distribution(
        appointments.iter().map(|a| {
            a.especialista
                .as_ref()
                .and_then(|e| e.nombre.clone())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Sin Nombre".to_string())
        }),
        total,
    );
    let by_type = distribution(
        appointments.iter().map(|a| {
            a.tipo_cita
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Otro".to_string())
        }),
        total,
    );

    ReportSummary {
        total_appointments: total,
        revenue: total as u64 * u64::from(unit_price),
        by_specialist,
        by_type,
    }
}

/// Counts per label in first-seen order, each with its share of `total`.
pub fn distribution(labels: impl Iterator<Item = String>, total: usize) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = Vec::new();

    for label in labels {
        match entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.count += 1,
            None => entries.push(DistributionEntry {
                label,
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    for entry in &mut entries {
        entry.percentage = if total == 0 {
            0.0
        } else {
            entry.count as f64 / total as f64 * 100.0
        };
    }

    entries
}
