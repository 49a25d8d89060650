//! Schema adapter between the appointments API wire format and the
//! application's view types.
//!
//! The backend speaks snake_case and knows fewer fields than the application:
//! - no `reason` on create (dropped silently)
//! - no `updated_at` on records (mirrored from `created_at`)
//!
//! Every function here is pure: no I/O, no shared state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    Appointment, AppointmentCreateRequest, AppointmentStatus, AppointmentUpdateRequest,
};

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

/// Appointment record as returned by the list and create endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendAppointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub start_time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    /// Not part of the current response schema; kept if a backend sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: String,
}

/// Body of `POST /appointments/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendCreatePayload {
    pub patient_id: String,
    pub doctor_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Sparse update body. Absent fields are omitted from the JSON, never `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackendUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A response body that does not match the expected record shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    #[error("Expected a JSON array of appointments, got {0}")]
    NotAList(&'static str),

    #[error("Malformed appointment record at index {index}: {reason}")]
    ListItem { index: usize, reason: String },

    #[error("Malformed appointment record: {0}")]
    Record(String),
}

/// Records decoded from a list response, plus the items that were rejected.
#[derive(Debug, Default)]
pub struct RecordBatch {
    pub records: Vec<BackendAppointment>,
    pub rejected: Vec<ShapeMismatch>,
}

// ═══════════════════════════════════════════════════════════
// Translation
// ═══════════════════════════════════════════════════════════

/// Backend record → application view.
pub fn from_backend(record: BackendAppointment) -> Appointment {
    Appointment {
        id: record.id,
        patient_id: record.patient_id,
        doctor_id: record.doctor_id,
        start_time: record.start_time,
        end_time: record.end_time,
        status: record.status,
        reason: record.reason,
        notes: record.notes,
        // No update timestamp on the backend record.
        updated_at: record.created_at.clone(),
        created_at: record.created_at,
    }
}

/// Create request → backend body. `reason` is dropped.
pub fn to_backend_create(request: &AppointmentCreateRequest) -> BackendCreatePayload {
    BackendCreatePayload {
        patient_id: request.patient_id.clone(),
        doctor_id: request.doctor_id.clone(),
        start_time: request.start_time.clone(),
        end_time: request.end_time.clone(),
        notes: request.notes.clone(),
    }
}

/// Partial update → sparse backend patch.
pub fn to_backend_update(request: &AppointmentUpdateRequest) -> BackendUpdatePayload {
    BackendUpdatePayload {
        status: request.status,
        start_time: request.start_time.clone(),
        end_time: request.end_time.clone(),
        notes: request.notes.clone(),
    }
}

// ═══════════════════════════════════════════════════════════
// Boundary parsing
// ═══════════════════════════════════════════════════════════

/// Decode a list response.
///
/// A body that is not an array is a mismatch as a whole. Inside an array,
/// each item is decoded on its own; malformed items land in `rejected`
/// so one bad record does not hide the rest.
pub fn parse_record_list(body: Value) -> Result<RecordBatch, ShapeMismatch> {
    let items = match body {
        Value::Array(items) => items,
        other => return Err(ShapeMismatch::NotAList(json_kind(&other))),
    };

    let mut batch = RecordBatch::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<BackendAppointment>(item) {
            Ok(record) => batch.records.push(record),
            Err(e) => batch.rejected.push(ShapeMismatch::ListItem {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok(batch)
}

/// Decode a single-record response (create).
pub fn parse_record(body: Value) -> Result<BackendAppointment, ShapeMismatch> {
    serde_json::from_value(body).map_err(|e| ShapeMismatch::Record(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json() -> Value {
        json!({
            "id": "A1",
            "patient_id": "P1",
            "doctor_id": "D1",
            "start_time": "2024-03-10T09:00:00",
            "end_time": "2024-03-10T09:30:00",
            "status": "scheduled",
            "notes": null,
            "created_at": "2024-03-01T12:00:00.123456"
        })
    }

    fn record() -> BackendAppointment {
        serde_json::from_value(record_json()).unwrap()
    }

    #[test]
    fn from_backend_renames_every_field() {
        let appt = from_backend(record());
        assert_eq!(appt.id, "A1");
        assert_eq!(appt.patient_id, "P1");
        assert_eq!(appt.doctor_id, "D1");
        assert_eq!(appt.start_time, "2024-03-10T09:00:00");
        assert_eq!(appt.end_time, "2024-03-10T09:30:00");
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert!(appt.notes.is_none());
        assert!(appt.reason.is_none());
    }

    #[test]
    fn from_backend_mirrors_created_at_into_updated_at() {
        for created in ["2024-03-01T12:00:00", "2025-12-31T23:59:59.999999", ""] {
            let mut r = record();
            r.created_at = created.to_string();
            let appt = from_backend(r);
            assert_eq!(appt.updated_at, appt.created_at);
            assert_eq!(appt.created_at, created);
        }
    }

    #[test]
    fn from_backend_passes_reason_through_when_present() {
        let mut raw = record_json();
        raw["reason"] = json!("follow-up");
        let appt = from_backend(parse_record(raw).unwrap());
        assert_eq!(appt.reason.as_deref(), Some("follow-up"));
    }

    #[test]
    fn to_backend_create_drops_reason() {
        let request = AppointmentCreateRequest {
            patient_id: "P1".into(),
            doctor_id: "D1".into(),
            start_time: "2024-03-10T09:00:00".into(),
            end_time: "2024-03-10T09:30:00".into(),
            reason: Some("annual checkup".into()),
            notes: Some("bring results".into()),
        };
        let body = serde_json::to_value(to_backend_create(&request)).unwrap();
        let obj = body.as_object().unwrap();

        assert!(!obj.contains_key("reason"));
        assert_eq!(obj["patient_id"], "P1");
        assert_eq!(obj["doctor_id"], "D1");
        assert_eq!(obj["start_time"], "2024-03-10T09:00:00");
        assert_eq!(obj["end_time"], "2024-03-10T09:30:00");
        assert_eq!(obj["notes"], "bring results");
        assert_eq!(obj.len(), 5);
    }

    #[test]
    fn to_backend_create_omits_missing_notes() {
        let request = AppointmentCreateRequest {
            patient_id: "P1".into(),
            doctor_id: "D1".into(),
            start_time: "s".into(),
            end_time: "e".into(),
            reason: Some("ignored".into()),
            notes: None,
        };
        let body = serde_json::to_value(to_backend_create(&request)).unwrap();
        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["doctor_id", "end_time", "patient_id", "start_time"]);
    }

    #[test]
    fn to_backend_update_emits_only_provided_fields() {
        // Every subset of the four mutable fields.
        for mask in 0u8..16 {
            let request = AppointmentUpdateRequest {
                status: (mask & 1 != 0).then_some(AppointmentStatus::Confirmed),
                start_time: (mask & 2 != 0).then(|| "2024-03-10T10:00:00".to_string()),
                end_time: (mask & 4 != 0).then(|| "2024-03-10T10:30:00".to_string()),
                notes: (mask & 8 != 0).then(|| "moved".to_string()),
            };
            let body = serde_json::to_value(to_backend_update(&request)).unwrap();
            let obj = body.as_object().unwrap();

            let expected: Vec<&str> = [
                (1u8, "status"),
                (2, "start_time"),
                (4, "end_time"),
                (8, "notes"),
            ]
            .iter()
            .filter(|(bit, _)| mask & *bit != 0)
            .map(|(_, key)| *key)
            .collect();

            assert_eq!(obj.len(), expected.len(), "mask {mask:#06b}");
            for key in expected {
                assert!(obj.contains_key(key), "mask {mask:#06b} missing {key}");
            }
            assert!(obj.values().all(|v| !v.is_null()));
        }
    }

    #[test]
    fn to_backend_update_keeps_explicit_empty_string() {
        let request = AppointmentUpdateRequest {
            notes: Some(String::new()),
            ..Default::default()
        };
        let body = serde_json::to_value(to_backend_update(&request)).unwrap();
        assert_eq!(body, json!({ "notes": "" }));
    }

    #[test]
    fn parse_record_list_rejects_non_array() {
        let err = parse_record_list(json!({ "detail": "oops" })).unwrap_err();
        assert_eq!(err, ShapeMismatch::NotAList("an object"));
        assert!(parse_record_list(Value::Null).is_err());
    }

    #[test]
    fn parse_record_list_skips_malformed_items() {
        let body = json!([record_json(), { "id": "broken" }, record_json()]);
        let batch = parse_record_list(body).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.rejected.len(), 1);
        assert!(matches!(
            batch.rejected[0],
            ShapeMismatch::ListItem { index: 1, .. }
        ));
    }

    #[test]
    fn parse_record_list_keeps_missed_appointments() {
        let mut raw = record_json();
        raw["status"] = json!("missed");
        let batch = parse_record_list(json!([raw])).unwrap();
        assert!(batch.rejected.is_empty());
        assert_eq!(
            from_backend(batch.records[0].clone()).status,
            AppointmentStatus::Missed
        );
    }

    #[test]
    fn parse_record_list_rejects_unknown_status() {
        let mut raw = record_json();
        raw["status"] = json!("archived");
        let batch = parse_record_list(json!([raw])).unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected.len(), 1);
    }

    #[test]
    fn parse_record_reports_missing_fields() {
        let err = parse_record(json!({ "id": "A1" })).unwrap_err();
        assert!(matches!(err, ShapeMismatch::Record(_)));
    }
}
