use std::fmt;

use serde::{Deserialize, Serialize};

/// The organization's primary contact, captured on the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryContact {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub work_phone: String,
    pub cell_phone: String,
    pub email: String,
    /// Only ever set by the mock verification action.
    pub email_verified: bool,
}

/// Which leadership contact a [`ContactBlock`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactRole {
    Ceo,
    Quality,
    Invoicing,
}

impl ContactRole {
    pub const ALL: [ContactRole; 3] = [Self::Ceo, Self::Quality, Self::Invoicing];

    /// Prefix used by field keys, e.g. `ceo` in `ceo_firstName`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Ceo => "ceo",
            Self::Quality => "quality",
            Self::Invoicing => "invoicing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ceo => "Chief Executive Officer (CEO)",
            Self::Quality => "Director of Quality",
            Self::Invoicing => "Invoicing Contact",
        }
    }

    /// Short form used when listing missing fields.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Ceo => "CEO",
            Self::Quality => "Quality",
            Self::Invoicing => "Invoicing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ceo" => Some(Self::Ceo),
            "quality" => Some(Self::Quality),
            "invoicing" => Some(Self::Invoicing),
            _ => None,
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A settable attribute of a [`ContactBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    SameAsPrimary,
    FirstName,
    LastName,
    Phone,
    Email,
}

impl ContactField {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::SameAsPrimary => "sameAsPrimary",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SameAsPrimary => "Same as Primary Contact",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }

    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "sameAsPrimary" => Some(Self::SameAsPrimary),
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// CEO, Director of Quality and Invoicing contacts all share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBlock {
    pub same_as_primary: bool,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl ContactBlock {
    /// Overwrites the four mirrored fields with the primary contact's values.
    pub(crate) fn copy_from(
        &mut self,
        primary: &PrimaryContact,
    ) {
        self.first_name.clone_from(&primary.first_name);
        self.last_name.clone_from(&primary.last_name);
        self.phone.clone_from(&primary.work_phone);
        self.email.clone_from(&primary.email);
    }

    pub(crate) fn clear_details(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.phone.clear();
        self.email.clear();
    }

    pub(crate) fn text_mut(
        &mut self,
        field: ContactField,
    ) -> Option<&mut String> {
        match field {
            ContactField::SameAsPrimary => None,
            ContactField::FirstName => Some(&mut self.first_name),
            ContactField::LastName => Some(&mut self.last_name),
            ContactField::Phone => Some(&mut self.phone),
            ContactField::Email => Some(&mut self.email),
        }
    }

    /// `true` when first/last name, phone and email are all filled in.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.phone.is_empty()
            && !self.email.is_empty()
    }
}
