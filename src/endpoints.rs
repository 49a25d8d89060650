//! Appointments API paths, relative to the configured base URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// List (GET) and create (POST).
pub const APPOINTMENTS: &str = "/appointments/";

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Single appointment (DELETE only). The id is escaped as one path segment.
///
/// `None` for ids that URL normalization would resolve to another resource:
/// the empty string and the dot segments `.` and `..`.
pub fn appointment_detail(id: &str) -> Option<String> {
    if matches!(id, "" | "." | "..") {
        return None;
    }
    Some(format!(
        "/appointments/{}",
        utf8_percent_encode(id, PATH_SEGMENT)
    ))
}
