//! Mock back end that only logs.

use intake_core::{
    ExportFormat, FormState, MockTransport, Notice, NoticeKind, Submission, Verification,
};
use serde::Serialize;
use tracing::{info, warn};

/// Pretty JSON for the log, or a placeholder if serialization fails.
fn payload<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        warn!(%error, "cannot serialize payload");
        "<unserializable>".to_string()
    })
}

/// Logs every payload at `info` and acknowledges with the mock notices.
#[derive(Debug, Default)]
pub struct ConsoleTransport {
    saves: usize,
    submissions: usize,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn submissions(&self) -> usize {
        self.submissions
    }
}

impl MockTransport for ConsoleTransport {
    fn save(
        &mut self,
        form: &FormState,
    ) -> Notice {
        self.saves += 1;
        info!(payload = %payload(form), "saved");
        Notice::confirmation("Saved (mock).")
    }

    fn submit(
        &mut self,
        submission: &Submission,
    ) -> Notice {
        self.submissions += 1;
        info!(
            submitted_at = %submission.submitted_at,
            payload = %payload(submission),
            "form submission payload"
        );
        Notice::confirmation("Submit Application (mock)")
    }

    fn verify_email(
        &mut self,
        email: &str,
    ) -> Verification {
        if email.trim().is_empty() {
            return Verification {
                verified: false,
                notice: Notice::new(NoticeKind::Validation, "Enter an email address to verify."),
            };
        }
        info!(email, "verification email sent");
        Verification {
            verified: true,
            notice: Notice::confirmation(format!("Verification email sent to: {email}")),
        }
    }

    fn refresh_email(&mut self) -> Notice {
        Notice::confirmation("Refresh / validate email (mock)")
    }

    fn export(
        &mut self,
        format: ExportFormat,
    ) -> Notice {
        info!(%format, "export requested");
        let message = match format {
            ExportFormat::Pdf => "Download as PDF (mock)",
            ExportFormat::Csv => "Export to CSV (mock)",
            ExportFormat::CsvTemplate => "Download CSV Template (mock)",
        };
        Notice::confirmation(message)
    }
}

#[cfg(test)]
mod tests {
    use intake_core::FormSession;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn save_and_submit_are_counted() {
        let mut session = FormSession::new();
        session.go_to_step(6).unwrap();
        session.set_field(intake_core::FieldKey::ReadyCertify, true).unwrap();
        let mut transport = ConsoleTransport::new();

        let saved = transport.save(session.form());
        let submitted = transport.submit(&session.submit().unwrap());

        assert_eq!(saved.message, "Saved (mock).");
        assert_eq!(submitted.kind, NoticeKind::Confirmation);
        assert_eq!((transport.saves(), transport.submissions()), (1, 1));
    }

    #[test]
    fn verify_requires_an_address() {
        let mut transport = ConsoleTransport::new();

        assert!(!transport.verify_email("").verified);

        let sent = transport.verify_email("a@b.org");
        assert!(sent.verified);
        assert_eq!(sent.notice.message, "Verification email sent to: a@b.org");
    }

    #[test]
    fn payload_is_camel_case_json() {
        let text = payload(&FormState::new());

        assert!(text.contains("\"legalEntityName\""));
        assert!(text.contains("\"readyCertify\": false"));
    }
}
