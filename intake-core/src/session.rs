//! The form session: current step plus the current [`FormState`] snapshot.
//!
//! Views never touch the form directly. They read [`FormSession::form`] and
//! call the operations below; each operation either installs a complete new
//! snapshot or rejects and leaves the session as it was.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{FormError, Rejection};
use crate::format::{iso_to_us, us_date};
use crate::models::{ChipList, ContactRole, FieldKey, FieldValue, FormState, UploadedFile};
use crate::policy::FormPolicy;
use crate::step::Step;
use crate::validation::{self, Requirement};

/// Completion event produced by a successful [`FormSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub form: FormState,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    current_step: Step,
    form: FormState,
    policy: FormPolicy,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// A fresh session on step 1 using the strict policy.
    pub fn new() -> Self {
        Self::with_policy(FormPolicy::default())
    }

    pub fn with_policy(policy: FormPolicy) -> Self {
        Self {
            current_step: Step::FIRST,
            form: FormState::new(),
            policy,
        }
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn policy(&self) -> &FormPolicy {
        &self.policy
    }

    fn install(
        &mut self,
        next: FormState,
    ) -> &FormState {
        self.form = next;
        &self.form
    }

    // ── field edits ─────────────────────────────────────────────────────────

    pub fn set_field(
        &mut self,
        key: FieldKey,
        value: impl Into<FieldValue>,
    ) -> Result<&FormState, FormError> {
        let next = self.form.with_field(key, value.into(), &self.policy)?;
        debug!(field = %key, "field updated");
        Ok(self.install(next))
    }

    /// Like [`set_field`](Self::set_field) but addressed by wire name.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] if `name` is not a settable field.
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&FormState, FormError> {
        let key: FieldKey = name.parse()?;
        self.set_field(key, value)
    }

    pub fn toggle_same_as_primary(
        &mut self,
        role: ContactRole,
        checked: bool,
    ) -> &FormState {
        let next = self.form.with_same_as_primary(role, checked, &self.policy);
        debug!(role = %role, checked, "same-as-primary toggled");
        self.install(next)
    }

    /// Result of the mock email verification.
    pub fn mark_email_verified(&mut self) -> &FormState {
        let next = self.form.with_email_verified();
        self.install(next)
    }

    pub fn add_uploaded_file(
        &mut self,
        file: UploadedFile,
    ) -> &FormState {
        debug!(name = %file.name, size = file.size, "file added");
        let next = self.form.with_uploaded_file(file);
        self.install(next)
    }

    pub fn remove_uploaded_file(
        &mut self,
        index: usize,
    ) -> Result<&FormState, FormError> {
        let next = self.form.without_uploaded_file(index)?;
        debug!(index, "file removed");
        Ok(self.install(next))
    }

    pub fn toggle_service(
        &mut self,
        name: &str,
    ) -> &FormState {
        let next = self.form.with_service_toggled(name);
        debug!(service = name, "service toggled");
        self.install(next)
    }

    pub fn add_standard(
        &mut self,
        name: &str,
    ) -> &FormState {
        let next = self.form.with_standard(name);
        self.install(next)
    }

    pub fn remove_standard(
        &mut self,
        name: &str,
    ) -> &FormState {
        let next = self.form.without_standard(name);
        self.install(next)
    }

    /// Adds an already formatted date (`MM/DD/YYYY`) to a chip list.
    pub fn add_date_chip(
        &mut self,
        list: ChipList,
        date: &str,
    ) -> Result<&FormState, Rejection> {
        match self.form.with_date_chip(list, date) {
            Ok(next) => {
                debug!(list = %list, date, "date chip added");
                Ok(self.install(next))
            }
            Err(rejection) => {
                warn!(list = %list, date, "date chip rejected: {rejection}");
                Err(rejection)
            }
        }
    }

    /// Adds a date chosen in the calendar picker (ISO `YYYY-MM-DD`).
    /// An empty pick is ignored. A valid date is stored zero-padded, so
    /// `2025-1-5` and `2025-01-05` are the same chip.
    pub fn pick_date_chip(
        &mut self,
        list: ChipList,
        iso: &str,
    ) -> Result<&FormState, Rejection> {
        let picked = match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            Ok(date) => us_date(&date),
            Err(_) => iso_to_us(iso),
        };
        if picked.is_empty() {
            return Ok(&self.form);
        }
        self.add_date_chip(list, &picked)
    }

    pub fn remove_date_chip(
        &mut self,
        list: ChipList,
        index: usize,
    ) -> Result<&FormState, FormError> {
        let next = self.form.without_date_chip(list, index)?;
        debug!(list = %list, index, "date chip removed");
        Ok(self.install(next))
    }

    // ── navigation ──────────────────────────────────────────────────────────

    pub fn can_advance(
        &self,
        step: Step,
    ) -> bool {
        validation::can_advance(&self.form, step, &self.policy)
    }

    pub fn missing_requirements(
        &self,
        step: Step,
    ) -> Vec<Requirement> {
        validation::missing_requirements(&self.form, step, &self.policy)
    }

    /// Moves to step `n`, clamped to `1..=6`.
    ///
    /// Targeting the step right after the current one is a "Continue" and
    /// requires the current step to be complete. Any other target (going
    /// back, or jumping through the step selector) is always allowed.
    pub fn go_to_step(
        &mut self,
        n: i64,
    ) -> Result<Step, Rejection> {
        let target = Step::clamped(n);
        let from = self.current_step;

        if target == from {
            return Ok(from);
        }
        if target.number() == from.number() + 1 {
            let missing = self.missing_requirements(from);
            if !missing.is_empty() {
                warn!(
                    step = from.number(),
                    missing = ?missing.iter().map(Requirement::label).collect::<Vec<_>>(),
                    "continue blocked"
                );
                return Err(Rejection::StepIncomplete {
                    step: from,
                    missing,
                });
            }
        }

        self.current_step = target;
        info!(from = from.number(), to = target.number(), "step changed");
        Ok(target)
    }

    /// "Continue": gated move to the next step.
    pub fn advance(&mut self) -> Result<Step, Rejection> {
        self.go_to_step(i64::from(self.current_step.next().number()))
    }

    /// "Previous": ungated move back one step.
    pub fn back(&mut self) -> Step {
        let target = self.current_step.previous();
        if target != self.current_step {
            info!(
                from = self.current_step.number(),
                to = target.number(),
                "step changed"
            );
            self.current_step = target;
        }
        target
    }

    /// Finishes the session from the review step.
    ///
    /// # Errors
    ///
    /// - [`Rejection::NotOnReviewStep`] anywhere but step 6.
    /// - [`Rejection::NotCertified`] while the certification box is unchecked.
    pub fn submit(&self) -> Result<Submission, Rejection> {
        if self.current_step != Step::ReviewAndSubmit {
            warn!(step = self.current_step.number(), "submit outside review step");
            return Err(Rejection::NotOnReviewStep {
                step: self.current_step,
            });
        }
        if !self.form.ready_certify {
            warn!("submit without certification");
            return Err(Rejection::NotCertified);
        }

        info!("application submitted");
        Ok(Submission {
            form: self.form.clone(),
            submitted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ContactField;

    fn fill_step1(session: &mut FormSession) {
        for (key, value) in [
            ("legalEntityName", "Acme Health"),
            ("dbaName", "Acme"),
            ("firstName", "Grace"),
            ("lastName", "Hopper"),
            ("title", "CNO"),
            ("workPhone", "555-0101"),
            ("email", "grace@example.org"),
        ] {
            session.set_field_by_name(key, value).unwrap();
        }
    }

    #[test]
    fn new_session_starts_blank_on_step1() {
        let session = FormSession::new();

        assert_eq!(session.current_step(), Step::Organization);
        assert_eq!(session.form(), &FormState::new());
        assert_eq!(session.policy(), &FormPolicy::strict());
    }

    #[test]
    fn continue_blocked_when_email_missing() {
        let mut session = FormSession::new();
        fill_step1(&mut session);
        session.set_field(FieldKey::Email, "").unwrap();

        let err = session.advance().unwrap_err();

        assert_eq!(
            err,
            Rejection::StepIncomplete {
                step: Step::Organization,
                missing: vec![Requirement::Field(FieldKey::Email)],
            }
        );
        assert_eq!(session.current_step(), Step::Organization);
    }

    #[test]
    fn go_to_next_step_number_is_gated() {
        let mut session = FormSession::new();

        assert!(session.go_to_step(2).is_err());
        assert_eq!(session.current_step(), Step::Organization);
    }

    #[test]
    fn jumps_and_back_are_unconditional() {
        let mut session = FormSession::new();

        assert_eq!(session.go_to_step(5), Ok(Step::ServicesAndCertifications));
        assert_eq!(session.back(), Step::SiteInformation);
        assert_eq!(session.go_to_step(1), Ok(Step::Organization));
        assert_eq!(session.back(), Step::Organization);
    }

    #[test]
    fn go_to_step_clamps_and_ignores_current() {
        let mut session = FormSession::new();

        assert_eq!(session.go_to_step(0), Ok(Step::Organization));
        assert_eq!(session.go_to_step(42), Ok(Step::ReviewAndSubmit));
        assert_eq!(session.go_to_step(6), Ok(Step::ReviewAndSubmit));
    }

    #[test]
    fn advance_on_last_step_stays_put() {
        let mut session = FormSession::new();
        session.go_to_step(6).unwrap();

        assert_eq!(session.advance(), Ok(Step::ReviewAndSubmit));
    }

    #[test]
    fn rejected_edit_leaves_session_untouched() {
        let mut session = FormSession::new();
        fill_step1(&mut session);
        let before = session.clone();

        assert!(session.set_field_by_name("svc_selected", "x").is_err());
        assert!(session.set_field(FieldKey::BillingState, "XX").is_err());
        assert!(session.remove_uploaded_file(0).is_err());

        assert_eq!(session, before);
    }

    #[test]
    fn toggle_same_as_primary_copies_then_clears() {
        let mut session = FormSession::new();
        fill_step1(&mut session);

        session.toggle_same_as_primary(ContactRole::Ceo, true);
        assert_eq!(session.form().ceo.first_name, "Grace");
        assert_eq!(session.form().ceo.phone, "555-0101");

        session.toggle_same_as_primary(ContactRole::Ceo, false);
        assert_eq!(session.form().ceo.first_name, "");
        assert_eq!(session.form().ceo.email, "");
    }

    #[test]
    fn picked_dates_are_stored_in_us_format() {
        let mut session = FormSession::new();

        session
            .pick_date_chip(ChipList::Thrombolytic, "2025-01-31")
            .unwrap();
        session.pick_date_chip(ChipList::Thrombolytic, "").unwrap();

        assert_eq!(
            session.form().date_chips(ChipList::Thrombolytic),
            ["01/31/2025"]
        );
        assert!(matches!(
            session.pick_date_chip(ChipList::Thrombolytic, "2025-01-31"),
            Err(Rejection::DuplicateDate { .. })
        ));
    }

    #[test]
    fn unpadded_pick_matches_padded_chip() {
        let mut session = FormSession::new();
        session
            .pick_date_chip(ChipList::Thrombolytic, "2025-01-05")
            .unwrap();

        for iso in ["2025-1-5", "2025-01-5"] {
            assert!(matches!(
                session.pick_date_chip(ChipList::Thrombolytic, iso),
                Err(Rejection::DuplicateDate { .. })
            ));
        }
        session
            .pick_date_chip(ChipList::Thrombectomy, "2025-2-9")
            .unwrap();

        assert_eq!(
            session.form().date_chips(ChipList::Thrombolytic),
            ["01/05/2025"]
        );
        assert_eq!(
            session.form().date_chips(ChipList::Thrombectomy),
            ["02/09/2025"]
        );
    }

    #[test]
    fn thrombectomy_rejects_sixteenth_date() {
        let mut session = FormSession::new();
        for day in 1..=15 {
            session
                .add_date_chip(ChipList::Thrombectomy, &format!("03/{day:02}/2025"))
                .unwrap();
        }

        let err = session
            .add_date_chip(ChipList::Thrombectomy, "04/01/2025")
            .unwrap_err();

        assert_eq!(
            err,
            Rejection::DateLimitReached {
                list: ChipList::Thrombectomy,
                limit: 15,
            }
        );
        assert_eq!(session.form().date_chips(ChipList::Thrombectomy).len(), 15);
    }

    #[test]
    fn submit_requires_certification() {
        let mut session = FormSession::new();
        session.go_to_step(6).unwrap();

        assert_eq!(session.submit(), Err(Rejection::NotCertified));

        session.set_field(FieldKey::ReadyCertify, true).unwrap();
        let submission = session.submit().unwrap();

        assert_eq!(&submission.form, session.form());
    }

    #[test]
    fn submit_only_from_review_step() {
        let mut session = FormSession::new();
        session.set_field(FieldKey::ReadyCertify, true).unwrap();

        assert_eq!(
            session.submit(),
            Err(Rejection::NotOnReviewStep {
                step: Step::Organization,
            })
        );
    }

    #[test]
    fn email_verification_only_through_mock_action() {
        let mut session = FormSession::new();

        assert!(session.set_field(FieldKey::EmailVerified, true).is_err());
        session.mark_email_verified();
        assert!(session.form().primary_contact.email_verified);
    }

    #[test]
    fn lenient_policy_leaves_step3_ungated() {
        let mut session = FormSession::with_policy(FormPolicy::lenient());
        session.go_to_step(3).unwrap();

        assert_eq!(session.advance(), Ok(Step::SiteInformation));
        assert!(
            session
                .set_field(
                    FieldKey::Contact(ContactRole::Quality, ContactField::Email),
                    "q@example.org"
                )
                .is_ok()
        );
    }
}
