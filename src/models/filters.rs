use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter for appointment list retrieval.
///
/// `date` selects a single calendar day; `start_date`/`end_date` are passed
/// through verbatim and take precedence over the bounds derived from `date`.
/// `status` is free text: any value is accepted, and since the list endpoint
/// cannot filter on it, it is never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_status_value_is_accepted() {
        let filter: AppointmentFilter =
            serde_json::from_str(r#"{"doctorId":"D1","date":"2024-03-10","status":"all"}"#)
                .unwrap();
        assert_eq!(filter.status.as_deref(), Some("all"));
        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2024, 3, 10));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let filter: AppointmentFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter, AppointmentFilter::default());
    }
}
