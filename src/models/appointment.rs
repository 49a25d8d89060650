use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// Appointment as the application sees it.
///
/// Built fresh from every backend response; nothing here is cached.
/// `updated_at` is always equal to `created_at`: the backend record carries
/// no update timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    /// ISO-8601 text, as sent by the backend.
    pub start_time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request to book a new appointment.
///
/// `reason` is accepted for the form's sake but never reaches the backend,
/// which has no field for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreateRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update of the mutable fields. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdateRequest {
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of a successful cancellation.
///
/// The backend answers a cancel with an empty body, so only the identifier
/// is known. This is not a full record: the status of the appointment is
/// whatever the backend now holds, and must be re-fetched to be observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledAppointment {
    pub id: String,
}
