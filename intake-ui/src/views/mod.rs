//! Text views of the form.
//!
//! Views are pure: they read a [`FormState`] snapshot and the current step
//! and hold no business state of their own. The review toggles are the only
//! view-local state.

mod review;
mod stepper;
mod steps;

use std::fmt;

use intake_core::{FormState, Step};

pub use review::{ReviewPage, ReviewSection, ReviewState, UnknownSection};
pub use stepper::{KeyHint, Stepper, hints, hints_for, status_line};
pub use steps::StepPage;

pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

pub(crate) fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Stepper, the step body and the hint line.
pub struct Page<'a> {
    pub form: &'a FormState,
    pub step: Step,
    pub review: &'a ReviewState,
}

impl fmt::Display for Page<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", Stepper(self.step))?;
        writeln!(f)?;
        if self.step == Step::ReviewAndSubmit {
            write!(
                f,
                "{}",
                ReviewPage {
                    form: self.form,
                    state: self.review,
                }
            )?;
        } else {
            write!(
                f,
                "{}",
                StepPage {
                    form: self.form,
                    step: self.step,
                }
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", status_line(&hints_for(self.step)))
    }
}
