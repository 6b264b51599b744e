use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FormError;
use crate::format::format_bytes;
use crate::models::FieldKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    Single,
    Multiple,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single location",
            Self::Multiple => "Multiple locations",
        }
    }
}

impl fmt::Display for LocationMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationMode {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            _ => Err(FormError::InvalidValue {
                field: FieldKey::LocationMode,
                value: s.to_string(),
            }),
        }
    }
}

/// Metadata for a site list file handed over by the file picker.
/// The contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn human_size(&self) -> String {
        format_bytes(self.size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub location_mode: Option<LocationMode>,
    pub uploaded_files: Vec<UploadedFile>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn location_mode_parses_wire_values() {
        assert_eq!("single".parse::<LocationMode>(), Ok(LocationMode::Single));
        assert_eq!(
            "Multiple".parse::<LocationMode>(),
            Ok(LocationMode::Multiple)
        );
        assert!("both".parse::<LocationMode>().is_err());
    }

    #[test]
    fn uploaded_file_reports_human_size() {
        let file = UploadedFile::new("sites.csv", 2048);

        assert_eq!(file.human_size(), "2.0KB");
    }
}
