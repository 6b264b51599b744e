use std::fmt;

use serde::{Deserialize, Serialize};

/// The six sections of the quote request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    Organization = 1,
    FacilityDetails = 2,
    LeadershipContacts = 3,
    SiteInformation = 4,
    ServicesAndCertifications = 5,
    ReviewAndSubmit = 6,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Self::Organization,
        Self::FacilityDetails,
        Self::LeadershipContacts,
        Self::SiteInformation,
        Self::ServicesAndCertifications,
        Self::ReviewAndSubmit,
    ];

    pub const FIRST: Step = Self::Organization;
    pub const LAST: Step = Self::ReviewAndSubmit;

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Maps any integer onto a step, clamping to `1..=6`.
    pub fn clamped(n: i64) -> Step {
        let index = n.clamp(1, Self::ALL.len() as i64) as usize - 1;
        Self::ALL[index]
    }

    /// The following step, or `self` on the last one.
    pub fn next(self) -> Step {
        Self::clamped(i64::from(self.number()) + 1)
    }

    /// The preceding step, or `self` on the first one.
    pub fn previous(self) -> Step {
        Self::clamped(i64::from(self.number()) - 1)
    }

    /// Page heading shown above the stepper.
    pub fn title(self) -> &'static str {
        match self {
            Self::Organization => "New DNV Quote Request",
            Self::FacilityDetails => "Facility Details",
            Self::LeadershipContacts => "Leadership Contacts",
            Self::SiteInformation => "Site Information",
            Self::ServicesAndCertifications => "Services & Certifications",
            Self::ReviewAndSubmit => "Review & Submit",
        }
    }

    /// Short label under the stepper bar.
    pub fn stepper_label(self) -> &'static str {
        match self {
            Self::Organization => "DNV Quote Request",
            other => other.title(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.stepper_label())
    }
}
