use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FormError;

/// The two capped date lists collected on the services step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipList {
    Thrombolytic,
    Thrombectomy,
}

impl ChipList {
    pub const ALL: [ChipList; 2] = [Self::Thrombolytic, Self::Thrombectomy];

    /// Maximum number of dates the list accepts.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Thrombolytic => 25,
            Self::Thrombectomy => 15,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Thrombolytic => "thrombolytic_dates",
            Self::Thrombectomy => "thrombectomy_dates",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Thrombolytic => "Dates of last twenty-five thrombolytic administrations",
            Self::Thrombectomy => "Dates of last fifteen thrombectomies",
        }
    }
}

impl fmt::Display for ChipList {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ChipList {
    type Err = FormError;

    /// Accepts the short name (`thrombolytic`) or the list key
    /// (`thrombolytic_dates`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let name = s.strip_suffix("_dates").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "thrombolytic" => Ok(Self::Thrombolytic),
            "thrombectomy" => Ok(Self::Thrombectomy),
            _ => Err(FormError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesAndCertification {
    /// Filter text for the service catalog. Never part of a submission.
    #[serde(skip)]
    pub service_search: String,
    pub selected_services: Vec<String>,
    pub selected_standards: Vec<String>,
    pub expiration_date: Option<NaiveDate>,
    pub application_date: Option<NaiveDate>,
    pub thrombolytic_dates: Vec<String>,
    pub thrombectomy_dates: Vec<String>,
}

impl ServicesAndCertification {
    pub fn chips(
        &self,
        list: ChipList,
    ) -> &[String] {
        match list {
            ChipList::Thrombolytic => &self.thrombolytic_dates,
            ChipList::Thrombectomy => &self.thrombectomy_dates,
        }
    }

    pub(crate) fn chips_mut(
        &mut self,
        list: ChipList,
    ) -> &mut Vec<String> {
        match list {
            ChipList::Thrombolytic => &mut self.thrombolytic_dates,
            ChipList::Thrombectomy => &mut self.thrombectomy_dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn chip_list_parses_short_and_key_names() {
        assert_eq!("thrombolytic".parse::<ChipList>(), Ok(ChipList::Thrombolytic));
        assert_eq!(
            "thrombectomy_dates".parse::<ChipList>(),
            Ok(ChipList::Thrombectomy)
        );
        assert!("stents".parse::<ChipList>().is_err());
    }

    #[test]
    fn capacities_match_the_form_labels() {
        assert_eq!(ChipList::Thrombolytic.capacity(), 25);
        assert_eq!(ChipList::Thrombectomy.capacity(), 15);
    }

    #[test]
    fn service_search_is_not_serialized() {
        let services = ServicesAndCertification {
            service_search: "cardiac".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&services).unwrap();

        assert!(json.get("serviceSearch").is_none());
        assert!(json.get("selectedServices").is_some());
    }
}
