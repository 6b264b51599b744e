//! Seam for the simulated back end. Nothing here is durable: a transport
//! only reports what it did through the [`Notice`] it returns.

use std::fmt;

use crate::models::FormState;
use crate::notice::Notice;
use crate::session::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
    /// Blank site list template offered on the site information step.
    CsvTemplate,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Csv),
            "template" | "csv-template" => Some(Self::CsvTemplate),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Csv => f.write_str("csv"),
            Self::CsvTemplate => f.write_str("csv-template"),
        }
    }
}

/// Outcome of a verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub verified: bool,
    pub notice: Notice,
}

pub trait MockTransport {
    /// "Save": receives the current snapshot.
    fn save(
        &mut self,
        form: &FormState,
    ) -> Notice;

    /// Receives the completed submission.
    fn submit(
        &mut self,
        submission: &Submission,
    ) -> Notice;

    /// Sends a verification email to `email`.
    fn verify_email(
        &mut self,
        email: &str,
    ) -> Verification;

    /// Re-checks the verification status without sending anything.
    fn refresh_email(&mut self) -> Notice;

    fn export(
        &mut self,
        format: ExportFormat,
    ) -> Notice;
}
