//! Switches between the two observed behaviours of the leadership-contacts
//! step. The strict variant is the default.

use serde::{Deserialize, Serialize};

/// What happens to a contact block's mirrored fields when "same as primary"
/// is unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UncheckBehavior {
    /// Blank first/last name, phone and email.
    #[default]
    Clear,
    /// Keep the copied values as editable text.
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormPolicy {
    pub contact_uncheck: UncheckBehavior,
    /// Require the CEO, invoicing and billing fields before leaving step 3.
    pub gate_leadership_step: bool,
}

impl FormPolicy {
    pub fn strict() -> Self {
        Self {
            contact_uncheck: UncheckBehavior::Clear,
            gate_leadership_step: true,
        }
    }

    pub fn lenient() -> Self {
        Self {
            contact_uncheck: UncheckBehavior::Preserve,
            gate_leadership_step: false,
        }
    }
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self::strict()
    }
}
