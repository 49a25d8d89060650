//! Fixed capability metadata for the appointment facade.
//!
//! The backend exposes list, create and cancel only. Every other facade
//! operation is permanently degraded; which ones is a property of this build,
//! not something probed at runtime.

use serde::{Deserialize, Serialize};

use crate::models::enums::str_enum;
use crate::models::ModelError;

str_enum!(Operation {
    ListAppointments => "list_appointments",
    GetAppointmentById => "get_appointment_by_id",
    GetAppointmentsByPatient => "get_appointments_by_patient",
    GetAppointmentsByDoctor => "get_appointments_by_doctor",
    GetAppointmentsForCalendarMonth => "get_appointments_for_calendar_month",
    CreateAppointment => "create_appointment",
    UpdateAppointment => "update_appointment",
    CancelAppointment => "cancel_appointment",
    ConfirmAppointment => "confirm_appointment",
    CompleteAppointment => "complete_appointment",
});

/// Whether an operation reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Support {
    Live,
    /// No backend endpoint; the operation never issues a request.
    Unsupported,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::ListAppointments,
        Operation::GetAppointmentById,
        Operation::GetAppointmentsByPatient,
        Operation::GetAppointmentsByDoctor,
        Operation::GetAppointmentsForCalendarMonth,
        Operation::CreateAppointment,
        Operation::UpdateAppointment,
        Operation::CancelAppointment,
        Operation::ConfirmAppointment,
        Operation::CompleteAppointment,
    ];

    pub fn support(self) -> Support {
        match self {
            Operation::ListAppointments
            | Operation::GetAppointmentsByPatient
            | Operation::GetAppointmentsByDoctor
            | Operation::GetAppointmentsForCalendarMonth
            | Operation::CreateAppointment
            | Operation::CancelAppointment => Support::Live,
            // No GET /appointments/{id}, no PUT, no status-transition endpoints.
            Operation::GetAppointmentById
            | Operation::UpdateAppointment
            | Operation::ConfirmAppointment
            | Operation::CompleteAppointment => Support::Unsupported,
        }
    }

    pub fn is_supported(self) -> bool {
        self.support() == Support::Live
    }
}

/// Outcome of an operation that may have no backend counterpart.
///
/// Keeps "not implemented by the backend" apart from "not found":
/// `Supported(None)` would be a genuine miss, `Unsupported` means no request
/// was ever made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Capability<T> {
    Supported(T),
    Unsupported(Operation),
}

impl<T> Capability<T> {
    pub fn is_supported(&self) -> bool {
        matches!(self, Capability::Supported(_))
    }

    /// The value, discarding which operation was unsupported.
    pub fn supported(self) -> Option<T> {
        match self {
            Capability::Supported(value) => Some(value),
            Capability::Unsupported(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn only_list_create_and_cancel_families_are_live() {
        let live: Vec<_> = Operation::ALL
            .iter()
            .filter(|op| op.is_supported())
            .map(|op| op.as_str())
            .collect();
        assert_eq!(
            live,
            [
                "list_appointments",
                "get_appointments_by_patient",
                "get_appointments_by_doctor",
                "get_appointments_for_calendar_month",
                "create_appointment",
                "cancel_appointment",
            ]
        );
    }

    #[test]
    fn degraded_operations_are_unsupported() {
        for op in [
            Operation::GetAppointmentById,
            Operation::UpdateAppointment,
            Operation::ConfirmAppointment,
            Operation::CompleteAppointment,
        ] {
            assert_eq!(op.support(), Support::Unsupported);
        }
    }

    #[test]
    fn operation_names_parse_back() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_str(op.as_str()).unwrap(), op);
        }
    }

    #[test]
    fn capability_serializes_tagged() {
        let unsupported: Capability<u8> = Capability::Unsupported(Operation::UpdateAppointment);
        assert_eq!(
            serde_json::to_value(&unsupported).unwrap(),
            serde_json::json!({ "outcome": "unsupported", "value": "update_appointment" })
        );

        let supported = Capability::Supported(3u8);
        assert_eq!(
            serde_json::to_value(&supported).unwrap(),
            serde_json::json!({ "outcome": "supported", "value": 3 })
        );
    }

    #[test]
    fn supported_unwraps_only_live_results() {
        let live = Capability::Supported(4);
        assert!(live.is_supported());
        assert_eq!(live.supported(), Some(4));
        let none: Capability<i32> = Capability::Unsupported(Operation::ConfirmAppointment);
        assert!(!none.is_supported());
        assert_eq!(none.supported(), None);
    }
}
