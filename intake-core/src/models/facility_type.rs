use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FormError;
use crate::models::FieldKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    #[serde(rename = "Short-Term Acute Care")]
    ShortTermAcuteCare,
    #[serde(rename = "Long-Term Acute Care")]
    LongTermAcuteCare,
    #[serde(rename = "Critical Access")]
    CriticalAccess,
    #[serde(rename = "Children's")]
    Childrens,
    #[serde(rename = "Free-Standing Psychiatric")]
    FreeStandingPsychiatric,
    #[serde(rename = "Other")]
    Other,
}

impl FacilityType {
    pub const ALL: [FacilityType; 6] = [
        Self::ShortTermAcuteCare,
        Self::LongTermAcuteCare,
        Self::CriticalAccess,
        Self::Childrens,
        Self::FreeStandingPsychiatric,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortTermAcuteCare => "Short-Term Acute Care",
            Self::LongTermAcuteCare => "Long-Term Acute Care",
            Self::CriticalAccess => "Critical Access",
            Self::Childrens => "Children's",
            Self::FreeStandingPsychiatric => "Free-Standing Psychiatric",
            Self::Other => "Other",
        }
    }

    /// Matches a label case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for FacilityType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FacilityType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FormError::InvalidValue {
            field: FieldKey::FacilityType,
            value: s.to_string(),
        })
    }
}
