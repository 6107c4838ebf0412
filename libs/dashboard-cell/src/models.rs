use appointment_cell::models::Appointment;

/// Number of appointments listed under "Próximas citas".
pub const UPCOMING_LIMIT: usize = 5;

/// "Actividad reciente", newest first, one entry per loaded collection.
pub const RECENT_ACTIVITY: [&str; 3] = [
    "Citas cargadas correctamente",
    "Datos de personal actualizados",
    "Actualización de pacientes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
}

impl AlertKind {
    pub fn css(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertKind::Info => "Info:",
            AlertKind::Warning => "Aviso:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardAlert {
    pub kind: AlertKind,
    pub message: String,
}

/// Everything the dashboard shows, computed from one load of the three
/// collections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub total_staff: usize,
    pub total_appointments: usize,
    pub today_appointments: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
    /// Appointments dated in the current month times the unit price.
    pub month_revenue: u64,
    pub upcoming: Vec<Appointment>,
    pub alerts: Vec<DashboardAlert>,
}

/// One bar of a report distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_appointments: usize,
    /// Placeholder metric: every appointment times the unit price.
    pub revenue: u64,
    pub by_specialist: Vec<DistributionEntry>,
    pub by_type: Vec<DistributionEntry>,
}
