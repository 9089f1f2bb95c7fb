//! Viewing appointments (read-only)

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{AppointmentStatus, AppointmentType, Coded};
use crate::error::Result;
use crate::transport::Transport;

/// Link to a buyer, broker or property: an id, a name, or a populated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Text(String),
    Record {
        #[serde(rename = "_id", alias = "id", default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(rename = "firstName", default)]
        first_name: Option<String>,
        #[serde(rename = "lastName", default)]
        last_name: Option<String>,
    },
}

impl Reference {
    /// Best available text for a table cell
    pub fn label(&self) -> String {
        match self {
            Reference::Text(text) => text.clone(),
            Reference::Record {
                id,
                name,
                title,
                first_name,
                last_name,
            } => {
                if let Some(text) = title.as_ref().or(name.as_ref()) {
                    return text.clone();
                }
                let person = [first_name.as_deref(), last_name.as_deref()]
                    .iter()
                    .flatten()
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");
                if !person.is_empty() {
                    person
                } else {
                    id.clone().unwrap_or_default()
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub date: String,
    pub buyer: Reference,
    pub property: Reference,
    pub broker: Reference,
    #[serde(rename = "type")]
    pub appointment_type: Coded<AppointmentType>,
    pub status: Coded<AppointmentStatus>,
}

impl Appointment {
    /// Accepts RFC 3339 timestamps, `YYYY-MM-DD` and `DD/MM/YYYY`
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
            .ok()
    }

    /// Date as shown in the table, e.g. `Apr 25, 2025`; raw text if unparseable
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }
}

/// Client for `/api/appointments`
#[derive(Clone, Debug)]
pub struct AppointmentsClient {
    transport: Transport,
}

impl AppointmentsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Appointment>> {
        self.transport
            .get("/api/appointments")
            .execute_data::<Vec<Appointment>>()
            .await
    }
}
