//! Appointment access facade.
//!
//! Composes the schema adapter with an injected `AppointmentTransport`.
//! The service holds no state besides the transport handle; every call builds
//! its own query or body and performs at most one round trip.
//!
//! Failure policy differs per operation:
//! - reads absorb transport errors and shape mismatches into an empty list
//! - create propagates them so the caller can react
//! - cancel absorbs them into `None`
//! - unsupported operations never touch the transport

use std::sync::Arc;

use thiserror::Error;

use crate::adapter::{self, ShapeMismatch};
use crate::capability::{Capability, Operation, Support};
use crate::config::ClientConfig;
use crate::endpoints;
use crate::models::{
    Appointment, AppointmentCreateRequest, AppointmentFilter, AppointmentUpdateRequest,
    CancelledAppointment,
};
use crate::query::{self, DayRange};
use crate::transport::{AppointmentTransport, HttpTransport, TransportError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unexpected response shape: {0}")]
    Shape(#[from] ShapeMismatch),

    #[error("Cannot encode request body: {0}")]
    Encode(String),
}

/// Public operation set over the appointments API.
#[derive(Clone)]
pub struct AppointmentService {
    transport: Arc<dyn AppointmentTransport>,
}

impl AppointmentService {
    pub fn new(transport: Arc<dyn AppointmentTransport>) -> Self {
        Self { transport }
    }

    /// Service over `HttpTransport` for the given connection settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Static support table for every facade operation.
    pub fn capabilities(&self) -> Vec<(Operation, Support)> {
        Operation::ALL.iter().map(|op| (*op, op.support())).collect()
    }

    // ── Reads ───────────────────────────────────────────────

    /// List appointments matching `filter`. Never fails: transport errors and
    /// unexpected bodies yield an empty list, which therefore does not prove
    /// that nothing matched. Records the backend marks `missed` are included;
    /// a record with a status outside `AppointmentStatus` is skipped.
    pub async fn list_appointments(&self, filter: Option<&AppointmentFilter>) -> Vec<Appointment> {
        let params = filter.map(query::filter_query).unwrap_or_default();
        let path = params.append_to(endpoints::APPOINTMENTS);
        tracing::debug!(%path, "Fetching appointments");

        let body = match self.transport.get(&path).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, %path, "Appointment list failed, returning empty");
                return Vec::new();
            }
        };

        let batch = match adapter::parse_record_list(body) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, %path, "Appointment list response rejected");
                return Vec::new();
            }
        };

        for rejected in &batch.rejected {
            tracing::warn!(error = %rejected, "Skipping malformed appointment record");
        }

        batch.records.into_iter().map(adapter::from_backend).collect()
    }

    /// Always `Unsupported`: the backend has no single-appointment endpoint
    /// and its list endpoint cannot filter by id.
    pub fn get_appointment_by_id(&self, id: &str) -> Capability<Option<Appointment>> {
        unsupported(Operation::GetAppointmentById, id)
    }

    pub async fn get_appointments_by_patient(&self, patient_id: &str) -> Vec<Appointment> {
        let filter = AppointmentFilter {
            patient_id: Some(patient_id.to_string()),
            ..Default::default()
        };
        self.list_appointments(Some(&filter)).await
    }

    pub async fn get_appointments_by_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        let filter = AppointmentFilter {
            doctor_id: Some(doctor_id.to_string()),
            ..Default::default()
        };
        self.list_appointments(Some(&filter)).await
    }

    /// Appointments from the 1st of `month` 00:00:00 through its last day
    /// 23:59:59. An out-of-range month yields an empty list without a request.
    pub async fn get_appointments_for_calendar_month(
        &self,
        year: i32,
        month: u32,
    ) -> Vec<Appointment> {
        let Some(range) = DayRange::month(year, month) else {
            tracing::warn!(year, month, "Invalid calendar month, returning empty");
            return Vec::new();
        };
        self.list_appointments(Some(&range.to_filter())).await
    }

    // ── Writes ──────────────────────────────────────────────

    /// Book an appointment. Transport failures are returned unchanged in
    /// `ServiceError::Transport`. The request's `reason` is not transmitted.
    pub async fn create_appointment(
        &self,
        request: &AppointmentCreateRequest,
    ) -> Result<Appointment, ServiceError> {
        let payload = adapter::to_backend_create(request);
        let body = serde_json::to_value(&payload).map_err(|e| ServiceError::Encode(e.to_string()))?;

        let response = self.transport.post(endpoints::APPOINTMENTS, &body).await?;
        let record = adapter::parse_record(response)?;

        tracing::info!(id = %record.id, "Appointment created");
        Ok(adapter::from_backend(record))
    }

    /// Always `Unsupported`: the backend exposes no update endpoint.
    pub fn update_appointment(
        &self,
        id: &str,
        _request: &AppointmentUpdateRequest,
    ) -> Capability<Appointment> {
        unsupported(Operation::UpdateAppointment, id)
    }

    /// Cancel an appointment, optionally with a reason.
    ///
    /// The backend replies with an empty body, so success only yields the
    /// identifier. Failure of any kind yields `None`, as does an id with no
    /// path of its own (empty, `.` or `..`), which is never sent.
    pub async fn cancel_appointment(
        &self,
        id: &str,
        reason: Option<&str>,
    ) -> Option<CancelledAppointment> {
        let Some(detail) = endpoints::appointment_detail(id) else {
            tracing::warn!(id, "Refusing to cancel: id does not name a single appointment");
            return None;
        };
        let path = query::cancel_query(reason).append_to(&detail);

        match self.transport.delete(&path).await {
            Ok(body) => {
                if let Some(body) = body.filter(|b| !b.is_null()) {
                    tracing::debug!(%body, "Ignoring unexpected cancel response body");
                }
                tracing::info!(id, "Appointment cancelled");
                Some(CancelledAppointment { id: id.to_string() })
            }
            Err(e) => {
                tracing::warn!(error = %e, id, "Appointment cancellation failed");
                None
            }
        }
    }

    /// Always `Unsupported`: no status-transition endpoint.
    pub fn confirm_appointment(&self, id: &str) -> Capability<Appointment> {
        unsupported(Operation::ConfirmAppointment, id)
    }

    /// Always `Unsupported`: no status-transition endpoint.
    pub fn complete_appointment(&self, id: &str) -> Capability<Appointment> {
        unsupported(Operation::CompleteAppointment, id)
    }
}

fn unsupported<T>(op: Operation, id: &str) -> Capability<T> {
    debug_assert_eq!(op.support(), Support::Unsupported);
    tracing::debug!(operation = %op, id, "Operation not supported by the appointments API");
    Capability::Unsupported(op)
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
