//! Smoke-test CLI for the appointments API.
//!
//! Reads connection settings from the environment (or `.env`) and prints
//! results as JSON in the application's camelCase shape.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use medisecure_appointments::{
    config, AppointmentCreateRequest, AppointmentFilter, AppointmentService, ClientConfig,
};

#[derive(Parser)]
#[command(name = "medisecure-appointments")]
#[command(about = "MediSecure appointments API client")]
#[command(version = config::APP_VERSION)]
struct Cli {
    /// Base URL of the API (overrides MEDISECURE_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List appointments
    List {
        #[arg(long)]
        patient: Option<String>,
        #[arg(long)]
        doctor: Option<String>,
        /// Single day (YYYY-MM-DD), expanded to 00:00:00..23:59:59
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Overrides the start derived from --date
        #[arg(long)]
        start_date: Option<String>,
        /// Overrides the end derived from --date
        #[arg(long)]
        end_date: Option<String>,
        /// Accepted for parity with the UI filter; not sent to the API
        #[arg(long)]
        status: Option<String>,
    },
    /// Fetch a single appointment
    Show { id: String },
    /// List appointments for a calendar month
    Calendar {
        year: i32,
        /// 1-12
        month: u32,
    },
    /// Book an appointment
    Create {
        patient: String,
        doctor: String,
        /// ISO-8601 start time
        start: String,
        /// ISO-8601 end time
        end: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Cancel an appointment
    Cancel {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Show which operations the API supports
    Capabilities,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut client_config = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        client_config.base_url = url.trim_end_matches('/').to_string();
    }
    tracing::debug!(config = ?client_config, "{} v{}", config::APP_NAME, config::APP_VERSION);

    let service = AppointmentService::from_config(&client_config)?;

    match cli.command {
        Commands::List {
            patient,
            doctor,
            date,
            start_date,
            end_date,
            status,
        } => {
            let filter = AppointmentFilter {
                patient_id: patient,
                doctor_id: doctor,
                date,
                start_date,
                end_date,
                status,
            };
            print_json(&service.list_appointments(Some(&filter)).await)?;
        }
        Commands::Show { id } => {
            let result = service.get_appointment_by_id(&id);
            if !result.is_supported() {
                print_json(&result)?;
                std::process::exit(2);
            }
            print_json(&result.supported())?;
        }
        Commands::Calendar { year, month } => {
            print_json(&service.get_appointments_for_calendar_month(year, month).await)?;
        }
        Commands::Create {
            patient,
            doctor,
            start,
            end,
            notes,
        } => {
            let request = AppointmentCreateRequest {
                patient_id: patient,
                doctor_id: doctor,
                start_time: start,
                end_time: end,
                reason: None,
                notes,
            };
            print_json(&service.create_appointment(&request).await?)?;
        }
        Commands::Cancel { id, reason } => {
            match service.cancel_appointment(&id, reason.as_deref()).await {
                Some(cancelled) => print_json(&cancelled)?,
                None => {
                    eprintln!("Cancellation of {id} failed (see log for details)");
                    std::process::exit(1);
                }
            }
        }
        Commands::Capabilities => {
            print_json(&service.capabilities())?;
        }
    }

    Ok(())
}
