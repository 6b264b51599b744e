//! Page heading, progress stepper and the command hint line.

use std::fmt;

use intake_core::Step;

/// Command hint shown in the status line.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

pub mod hints {
    use super::KeyHint;

    pub const CONTINUE: KeyHint = KeyHint::new("continue", "Next");
    pub const PREVIOUS: KeyHint = KeyHint::new("previous", "Back");
    pub const SAVE: KeyHint = KeyHint::new("save", "Save");
    pub const SUBMIT: KeyHint = KeyHint::new("submit", "Submit");
    pub const HELP: KeyHint = KeyHint::new("help", "Commands");
    pub const EXIT: KeyHint = KeyHint::new("exit", "Quit");
}

/// Hints that apply on `step`.
pub fn hints_for(step: Step) -> Vec<KeyHint> {
    let mut list = Vec::with_capacity(5);
    if step != Step::FIRST {
        list.push(hints::PREVIOUS);
    }
    if step == Step::LAST {
        list.push(hints::SUBMIT);
    } else {
        list.push(hints::CONTINUE);
    }
    list.extend([hints::SAVE, hints::HELP, hints::EXIT]);
    list
}

pub fn status_line(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Title plus one marker per step: `✓` done, `[n label]` current.
pub struct Stepper(pub Step);

impl fmt::Display for Stepper {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let current = self.0;
        writeln!(f, "{}", current.title())?;

        let markers: Vec<String> = Step::ALL
            .iter()
            .map(|&step| {
                let n = step.number();
                if step == current {
                    format!("[{n} {}]", step.stepper_label())
                } else if step < current {
                    format!("✓{n}")
                } else {
                    n.to_string()
                }
            })
            .collect();
        writeln!(f, "{}", markers.join(" ─ "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn stepper_marks_done_and_current() {
        let text = Stepper(Step::LeadershipContacts).to_string();

        assert_eq!(
            text,
            "Leadership Contacts\n✓1 ─ ✓2 ─ [3 Leadership Contacts] ─ 4 ─ 5 ─ 6\n"
        );
    }

    #[test]
    fn first_step_uses_stepper_label() {
        let text = Stepper(Step::Organization).to_string();

        assert!(text.starts_with("New DNV Quote Request\n[1 DNV Quote Request]"));
    }

    #[test]
    fn hints_follow_position() {
        let first = status_line(&hints_for(Step::Organization));
        let last = status_line(&hints_for(Step::ReviewAndSubmit));

        assert!(first.starts_with("continue: Next"));
        assert!(!first.contains("previous"));
        assert!(last.contains("submit: Submit"));
        assert!(!last.contains("continue"));
    }
}
