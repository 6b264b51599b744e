//! Routes parsed commands into the form session.
//!
//! The app owns the session, the notice sink, the mock transport and the
//! review page toggles. Every rejection or misuse turns into a notice; the
//! session is never left half-updated.

use chrono::NaiveDate;
use intake_core::catalog::{self, STANDARDS};
use intake_core::{
    FieldKey, FieldValue, FormError, FormPolicy, FormSession, MockTransport, Notice, NoticeKind,
    NoticeSink, Rejection, SessionError, Step, Submission, UploadedFile,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::{self, Command, CommandError};
use crate::logging;
use crate::views::{Page, ReviewState};

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing to redraw; any notice has already been shown.
    Stay,
    /// The page changed.
    Redraw,
    Help,
    Exit,
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("'{0}' is not in the service catalog")]
    UnknownService(String),

    #[error("unknown standard '{0}' (expected Action1 .. Action4)")]
    UnknownStandard(String),

    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    BadDate(String),

    #[error("{0}")]
    Logging(String),
}

impl From<FormError> for ActionError {
    fn from(error: FormError) -> Self {
        Self::Session(error.into())
    }
}

impl From<Rejection> for ActionError {
    fn from(rejection: Rejection) -> Self {
        Self::Session(rejection.into())
    }
}

impl ActionError {
    fn to_notice(&self) -> Notice {
        match self {
            Self::Session(SessionError::Rejected(rejection)) => Notice::from(rejection),
            // Positions are shown 1-based, like the commands that take them.
            Self::Session(SessionError::Form(FormError::IndexOutOfRange { list, index, len })) => {
                Notice::new(
                    NoticeKind::Validation,
                    format!("There is no entry {} in {list} ({len} entries).", index + 1),
                )
            }
            other => Notice::new(NoticeKind::Validation, other.to_string()),
        }
    }
}

pub struct IntakeApp<N, T> {
    session: FormSession,
    notices: N,
    transport: T,
    review: ReviewState,
    submissions: Vec<Submission>,
}

impl<N: NoticeSink, T: MockTransport> IntakeApp<N, T> {
    pub fn new(
        policy: FormPolicy,
        notices: N,
        transport: T,
    ) -> Self {
        Self {
            session: FormSession::with_policy(policy),
            notices,
            transport,
            review: ReviewState::default(),
            submissions: Vec::new(),
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn notices(&self) -> &N {
        &self.notices
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn review(&self) -> &ReviewState {
        &self.review
    }

    /// The current page as text.
    pub fn render(&self) -> String {
        Page {
            form: self.session.form(),
            step: self.session.current_step(),
            review: &self.review,
        }
        .to_string()
    }

    /// Parses and runs one input line.
    pub fn run_line(
        &mut self,
        line: &str,
    ) -> Flow {
        match commands::parse_line(line) {
            Ok(Some(command)) => self.dispatch(command),
            Ok(None) => Flow::Stay,
            Err(error) => self.report(ActionError::from(error)),
        }
    }

    pub fn dispatch(
        &mut self,
        command: Command,
    ) -> Flow {
        debug!(?command, "dispatch");
        match self.apply(command) {
            Ok(flow) => flow,
            Err(error) => self.report(error),
        }
    }

    fn report(
        &mut self,
        error: ActionError,
    ) -> Flow {
        warn!(%error, step = self.session.current_step().number(), "command rejected");
        self.notices.notify(error.to_notice());
        Flow::Stay
    }

    fn notify(
        &mut self,
        notice: Notice,
    ) -> Flow {
        self.notices.notify(notice);
        Flow::Stay
    }

    fn apply(
        &mut self,
        command: Command,
    ) -> Result<Flow, ActionError> {
        let session = &mut self.session;
        match command {
            Command::Set { key, value } => {
                session.set_field(key, FieldValue::Text(value))?;
            }
            Command::Clear(key) => {
                session.set_field(key, FieldValue::cleared(key))?;
            }
            Command::Check(key) => {
                session.set_field(key, true)?;
            }
            Command::Uncheck(key) => {
                session.set_field(key, false)?;
            }
            Command::SameAsPrimary { role, on } => {
                session.toggle_same_as_primary(role, on);
            }
            Command::AddFile { name, size } => {
                session.add_uploaded_file(UploadedFile::new(name, size));
            }
            Command::RemoveFile(index) => {
                session.remove_uploaded_file(index)?;
            }
            Command::Preview(index) => {
                let len = session.form().site.uploaded_files.len();
                if index >= len {
                    return Err(FormError::IndexOutOfRange {
                        list: "uploadedFiles",
                        index,
                        len,
                    }
                    .into());
                }
                return Ok(self.notify(Notice::confirmation("Preview (mock)")));
            }
            Command::Service(name) => {
                let service =
                    catalog::find_service(&name).ok_or(ActionError::UnknownService(name))?;
                session.toggle_service(service);
            }
            Command::Search(text) => {
                session.set_field(FieldKey::ServiceSearch, text)?;
            }
            Command::AddStandard(name) => {
                let standard = canonical_standard(&name)?;
                session.add_standard(standard);
            }
            Command::RemoveStandard(name) => {
                let standard = canonical_standard(&name)?;
                session.remove_standard(standard);
            }
            Command::AddDate { list, iso } => {
                let date = NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
                    .map_err(|_| ActionError::BadDate(iso.clone()))?;
                session.pick_date_chip(list, &date.format("%Y-%m-%d").to_string())?;
            }
            Command::RemoveDate { list, index } => {
                session.remove_date_chip(list, index)?;
            }
            Command::Continue => {
                session.advance()?;
            }
            Command::Previous => {
                session.back();
            }
            Command::Step(n) => {
                session.go_to_step(n)?;
            }
            Command::Expand(section) => {
                let changed = self.review.set_open(section, true);
                debug!(section = section.id(), changed, "review section expanded");
            }
            Command::Collapse(section) => {
                let changed = self.review.set_open(section, false);
                debug!(section = section.id(), changed, "review section collapsed");
            }
            Command::Save => {
                let notice = self.transport.save(self.session.form());
                return Ok(self.notify(notice));
            }
            Command::Verify => {
                let email = session.form().primary_contact.email.clone();
                let verification = self.transport.verify_email(&email);
                if verification.verified {
                    self.session.mark_email_verified();
                }
                self.notices.notify(verification.notice);
                return Ok(Flow::Redraw);
            }
            Command::RefreshEmail => {
                let notice = self.transport.refresh_email();
                return Ok(self.notify(notice));
            }
            Command::Export(format) => {
                let notice = self.transport.export(format);
                return Ok(self.notify(notice));
            }
            Command::AddOtherService => {
                return Ok(self.notify(Notice::confirmation("Add Other Service (mock)")));
            }
            Command::SupportChat => {
                return Ok(self.notify(Notice::confirmation("Support Chat (mock)")));
            }
            Command::Submit => {
                let submission = session.submit()?;
                let notice = self.transport.submit(&submission);
                info!(count = self.submissions.len() + 1, "submission recorded");
                self.submissions.push(submission);
                return Ok(self.notify(notice));
            }
            Command::LogLevel(level) => {
                logging::set_log_level(&level).map_err(|e| ActionError::Logging(e.to_string()))?;
                return Ok(self.notify(Notice::confirmation(format!("Log level set to {level}"))));
            }
            Command::Show => {}
            Command::Help => return Ok(Flow::Help),
            Command::Exit => {
                self.notices.notify(Notice::confirmation("Exit (mock)"));
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Redraw)
    }

    pub fn current_step(&self) -> Step {
        self.session.current_step()
    }
}

fn canonical_standard(name: &str) -> Result<&'static str, ActionError> {
    STANDARDS
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ActionError::UnknownStandard(name.to_string()))
}

#[cfg(test)]
mod tests {
    use intake_core::{ChipList, ContactRole, Verification};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Records every call without logging.
    #[derive(Default)]
    struct RecordingTransport {
        saved: usize,
        submitted: usize,
    }

    impl MockTransport for RecordingTransport {
        fn save(
            &mut self,
            _form: &intake_core::FormState,
        ) -> Notice {
            self.saved += 1;
            Notice::confirmation("saved")
        }

        fn submit(
            &mut self,
            _submission: &Submission,
        ) -> Notice {
            self.submitted += 1;
            Notice::confirmation("submitted")
        }

        fn verify_email(
            &mut self,
            email: &str,
        ) -> Verification {
            Verification {
                verified: !email.is_empty(),
                notice: Notice::confirmation(format!("sent to {email}")),
            }
        }

        fn refresh_email(&mut self) -> Notice {
            Notice::confirmation("refreshed")
        }

        fn export(
            &mut self,
            format: intake_core::ExportFormat,
        ) -> Notice {
            Notice::confirmation(format.to_string())
        }
    }

    type TestApp = IntakeApp<Vec<Notice>, RecordingTransport>;

    fn app() -> TestApp {
        IntakeApp::new(FormPolicy::strict(), Vec::new(), RecordingTransport::default())
    }

    fn run(
        app: &mut TestApp,
        lines: &[&str],
    ) {
        for line in lines {
            app.run_line(line);
        }
    }

    fn last_message(app: &TestApp) -> &str {
        app.notices().last().map(|n| n.message.as_str()).unwrap_or_default()
    }

    #[test]
    fn blocked_continue_shows_validation_notice() {
        let mut app = app();

        assert_eq!(app.run_line("continue"), Flow::Stay);

        assert_eq!(app.current_step(), Step::Organization);
        assert_eq!(
            last_message(&app),
            "Please complete required fields (*) before continuing."
        );
        assert_eq!(app.notices()[0].kind, NoticeKind::Validation);
    }

    #[test]
    fn parse_errors_become_notices() {
        let mut app = app();

        assert_eq!(app.run_line("set nonsense 1"), Flow::Stay);
        assert_eq!(last_message(&app), "unknown field 'nonsense'");
    }

    #[test]
    fn verify_marks_email_verified() {
        let mut app = app();
        run(&mut app, &["set email grace@example.org", "verify"]);

        assert!(app.session().form().primary_contact.email_verified);
        assert_eq!(last_message(&app), "sent to grace@example.org");
    }

    #[test]
    fn same_as_primary_and_locked_edit() {
        let mut app = app();
        run(
            &mut app,
            &[
                "set firstName Grace",
                "same-as-primary ceo on",
                "set ceo_firstName Ada",
            ],
        );

        assert_eq!(app.session().form().contact(ContactRole::Ceo).first_name, "Grace");
        assert_eq!(
            last_message(&app),
            "field 'ceo_firstName' is mirrored while 'ceo_sameAsPrimary' is checked"
        );
    }

    #[test]
    fn duplicate_date_is_reported_once() {
        let mut app = app();
        run(
            &mut app,
            &[
                "date add thrombolytic 2025-01-31",
                "date add thrombolytic 2025-01-31",
                "date add thrombolytic 01/31/2025",
            ],
        );

        assert_eq!(app.session().form().date_chips(ChipList::Thrombolytic), ["01/31/2025"]);
        let kinds: Vec<NoticeKind> = app.notices().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Duplicate, NoticeKind::Validation]);
    }

    #[test]
    fn unpadded_date_is_a_duplicate() {
        let mut app = app();
        run(
            &mut app,
            &[
                "date add thrombolytic 2025-01-05",
                "date add thrombolytic 2025-1-5",
                "date add thrombolytic 2025-01-5",
            ],
        );

        assert_eq!(app.session().form().date_chips(ChipList::Thrombolytic), ["01/05/2025"]);
        let kinds: Vec<NoticeKind> = app.notices().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Duplicate, NoticeKind::Duplicate]);
    }

    #[test]
    fn remove_out_of_range_uses_one_based_position() {
        let mut app = app();
        run(&mut app, &["file add sites.csv 100", "file rm 2"]);

        assert_eq!(app.session().form().site.uploaded_files.len(), 1);
        assert_eq!(
            last_message(&app),
            "There is no entry 2 in uploadedFiles (1 entries)."
        );
    }

    #[test]
    fn services_and_standards_use_catalog_names() {
        let mut app = app();
        run(
            &mut app,
            &["service open heart", "standard add action3", "service Dialysis"],
        );

        let services = &app.session().form().services;
        assert_eq!(services.selected_services, vec!["Open Heart"]);
        assert_eq!(services.selected_standards, vec!["Action3"]);
        assert_eq!(last_message(&app), "'Dialysis' is not in the service catalog");
    }

    #[test]
    fn submit_flow_records_one_submission() {
        let mut app = app();
        run(&mut app, &["step 6", "submit"]);
        assert!(app.submissions().is_empty());

        run(&mut app, &["check ready_certify", "submit"]);

        assert_eq!(app.submissions().len(), 1);
        assert_eq!(app.transport().submitted, 1);
        assert!(app.submissions()[0].form.ready_certify);
    }

    #[test]
    fn expand_only_opens_and_collapse_only_closes() {
        let mut app = app();
        run(&mut app, &["step 6", "expand site"]);
        assert!(app.review().is_open(crate::views::ReviewSection::Site));
        assert!(app.render().contains("v Site Information"));

        run(&mut app, &["collapse site", "collapse site"]);
        assert!(!app.review().is_open(crate::views::ReviewSection::Site));
        assert!(app.render().contains("> Site Information"));

        run(&mut app, &["expand site"]);
        assert!(app.review().is_open(crate::views::ReviewSection::Site));
    }

    #[test]
    fn other_service_is_a_mock_request() {
        let mut app = app();

        assert_eq!(app.run_line("service other"), Flow::Stay);

        assert_eq!(last_message(&app), "Add Other Service (mock)");
        assert_eq!(app.notices()[0].kind, NoticeKind::Confirmation);
        assert!(app.session().form().services.selected_services.is_empty());
    }

    #[test]
    fn exit_and_help_flows() {
        let mut app = app();

        assert_eq!(app.run_line("help"), Flow::Help);
        assert_eq!(app.run_line("save"), Flow::Stay);
        assert_eq!(app.transport().saved, 1);
        assert_eq!(app.run_line("exit"), Flow::Exit);
        assert_eq!(last_message(&app), "Exit (mock)");
    }
}
