pub mod adapter; // Schema adapter: wire records <-> view types
pub mod capability; // Fixed support table for facade operations
pub mod config;
pub mod endpoints;
pub mod models;
pub mod query; // Filter -> query string, calendar ranges
pub mod service; // Appointment access facade
pub mod transport;

pub use capability::{Capability, Operation, Support};
pub use config::ClientConfig;
pub use models::{
    Appointment, AppointmentCreateRequest, AppointmentFilter, AppointmentStatus,
    AppointmentUpdateRequest, CancelledAppointment,
};
pub use service::{AppointmentService, ServiceError};
pub use transport::{AppointmentTransport, HttpTransport, MockTransport, TransportError};
