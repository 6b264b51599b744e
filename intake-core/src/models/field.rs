//! Typed keys for the generic field setter.
//!
//! Views address simple fields by their wire name (`legalEntityName`,
//! `ceo_phone`, `billing_state`, ...). [`FieldKey`] parses those names once at
//! the boundary so the reducer only ever matches on a closed set of variants.
//! List-valued fields (files, services, standards, date chips) are not
//! addressable here; they have dedicated operations on
//! [`FormSession`](crate::FormSession).

use std::fmt;
use std::str::FromStr;

use crate::errors::FormError;
use crate::models::{ContactField, ContactRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    LegalEntityName,
    DbaName,
    SameAsLegal,
    FirstName,
    LastName,
    Title,
    WorkPhone,
    CellPhone,
    Email,
    EmailVerified,
    FacilityType,
    Contact(ContactRole, ContactField),
    BillingStreet,
    BillingCity,
    BillingState,
    BillingZip,
    LocationMode,
    ServiceSearch,
    ExpirationDate,
    ApplicationDate,
    ReadyCertify,
}

/// The value shape a [`FieldKey`] expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
}

impl fmt::Display for FieldKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Flag => f.write_str("checkbox"),
        }
    }
}

impl FieldKey {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::SameAsLegal
            | Self::EmailVerified
            | Self::ReadyCertify
            | Self::Contact(_, ContactField::SameAsPrimary) => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    /// Human-readable label, as shown next to the input.
    pub fn label(&self) -> String {
        let label = match self {
            Self::LegalEntityName => "Legal Entity Name",
            Self::DbaName => "DBA Name",
            Self::SameAsLegal => "Same as Legal Entity Name",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Title => "Title",
            Self::WorkPhone => "Work Phone",
            Self::CellPhone => "Cell Phone",
            Self::Email => "Email",
            Self::EmailVerified => "Email Verified",
            Self::FacilityType => "Facility Type",
            Self::Contact(role, field) => {
                return format!("{} {}", role.short_label(), field.label());
            }
            Self::BillingStreet => "Street Address",
            Self::BillingCity => "City",
            Self::BillingState => "State",
            Self::BillingZip => "ZIP Code",
            Self::LocationMode => "Location Mode",
            Self::ServiceSearch => "Service Search",
            Self::ExpirationDate => "Expiration Date of Current Stroke Certification",
            Self::ApplicationDate => "Date of Application",
            Self::ReadyCertify => "Certification",
        };
        label.to_string()
    }

    /// Primary contact fields that linked contact blocks mirror.
    pub(crate) fn is_mirrored_by_contacts(&self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::WorkPhone | Self::Email
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::LegalEntityName => "legalEntityName",
            Self::DbaName => "dbaName",
            Self::SameAsLegal => "sameAsLegal",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Title => "title",
            Self::WorkPhone => "workPhone",
            Self::CellPhone => "cellPhone",
            Self::Email => "email",
            Self::EmailVerified => "emailVerified",
            Self::FacilityType => "facilityType",
            Self::Contact(role, field) => {
                return write!(f, "{}_{}", role.prefix(), field.suffix());
            }
            Self::BillingStreet => "billing_street",
            Self::BillingCity => "billing_city",
            Self::BillingState => "billing_state",
            Self::BillingZip => "billing_zip",
            Self::LocationMode => "site_locationMode",
            Self::ServiceSearch => "svc_search",
            Self::ExpirationDate => "std_expirationDate",
            Self::ApplicationDate => "std_applicationDate",
            Self::ReadyCertify => "ready_certify",
        };
        f.write_str(name)
    }
}

impl FromStr for FieldKey {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "legalEntityName" => Self::LegalEntityName,
            "dbaName" => Self::DbaName,
            "sameAsLegal" => Self::SameAsLegal,
            "firstName" => Self::FirstName,
            "lastName" => Self::LastName,
            "title" => Self::Title,
            "workPhone" => Self::WorkPhone,
            "cellPhone" => Self::CellPhone,
            "email" => Self::Email,
            "emailVerified" => Self::EmailVerified,
            "facilityType" => Self::FacilityType,
            "billing_street" => Self::BillingStreet,
            "billing_city" => Self::BillingCity,
            "billing_state" => Self::BillingState,
            "billing_zip" => Self::BillingZip,
            "site_locationMode" => Self::LocationMode,
            "svc_search" => Self::ServiceSearch,
            "std_expirationDate" => Self::ExpirationDate,
            "std_applicationDate" => Self::ApplicationDate,
            "ready_certify" => Self::ReadyCertify,
            other => other
                .split_once('_')
                .and_then(|(prefix, suffix)| {
                    let role = ContactRole::ALL.into_iter().find(|r| r.prefix() == prefix)?;
                    Some(Self::Contact(role, ContactField::from_suffix(suffix)?))
                })
                .ok_or_else(|| FormError::UnknownField(s.to_string()))?,
        };
        Ok(key)
    }
}

/// A value handed to the generic field setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// The "empty" value for a key: blank text or an unchecked box.
    pub fn cleared(key: FieldKey) -> Self {
        match key.kind() {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Flag => Self::Flag(false),
        }
    }

    pub(crate) fn into_text(
        self,
        key: FieldKey,
    ) -> Result<String, FormError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Flag(_) => Err(FormError::TypeMismatch {
                field: key,
                expected: FieldKind::Text,
            }),
        }
    }

    pub(crate) fn into_flag(
        self,
        key: FieldKey,
    ) -> Result<bool, FormError> {
        match self {
            Self::Flag(flag) => Ok(flag),
            Self::Text(_) => Err(FormError::TypeMismatch {
                field: key,
                expected: FieldKind::Flag,
            }),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}
