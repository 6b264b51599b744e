//! The complete set of values collected by the intake form, and the pure
//! reducer that produces a new snapshot for every edit.
//!
//! Every `with_*`/`without_*` method takes `&self` and returns a fresh
//! [`FormState`]; the receiver is never modified. On error nothing is
//! returned, so a rejected edit can never leave a half-applied state behind.
//!
//! Two mirror relationships are maintained here:
//!
//! - `sameAsLegal`: while checked, `dbaName` always equals `legalEntityName`.
//! - `*_sameAsPrimary`: while checked, a contact block's first/last name,
//!   phone and email track the primary contact's first/last name, work phone
//!   and email.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{FormError, Rejection};
use crate::models::{
    ChipList, ContactBlock, ContactField, ContactRole, FacilityType, FieldKey, FieldValue,
    LocationMode, PrimaryContact, ServicesAndCertification, SiteInfo, UploadedFile, UsState,
};
use crate::policy::{FormPolicy, UncheckBehavior};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub legal_entity_name: String,
    pub dba_name: String,
    pub same_as_legal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub street: String,
    pub city: String,
    pub state: Option<UsState>,
    pub zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub identity: Identity,
    pub primary_contact: PrimaryContact,
    pub facility_type: Option<FacilityType>,
    pub ceo: ContactBlock,
    pub quality: ContactBlock,
    pub invoicing: ContactBlock,
    pub billing: BillingAddress,
    pub site: SiteInfo,
    pub services: ServicesAndCertification,
    pub ready_certify: bool,
}

impl FormState {
    /// A blank form: empty text, unchecked boxes, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact(
        &self,
        role: ContactRole,
    ) -> &ContactBlock {
        match role {
            ContactRole::Ceo => &self.ceo,
            ContactRole::Quality => &self.quality,
            ContactRole::Invoicing => &self.invoicing,
        }
    }

    fn contact_mut(
        &mut self,
        role: ContactRole,
    ) -> &mut ContactBlock {
        match role {
            ContactRole::Ceo => &mut self.ceo,
            ContactRole::Quality => &mut self.quality,
            ContactRole::Invoicing => &mut self.invoicing,
        }
    }

    pub fn date_chips(
        &self,
        list: ChipList,
    ) -> &[String] {
        self.services.chips(list)
    }

    /// Applies one edit through the generic setter.
    ///
    /// Keys with propagation rules (`sameAsLegal`, `legalEntityName`, the
    /// mirrored primary contact fields and `*_sameAsPrimary`) update their
    /// dependents in the same snapshot.
    ///
    /// # Errors
    ///
    /// - [`FormError::TypeMismatch`] when a checkbox gets text or vice versa.
    /// - [`FormError::InvalidValue`] for an unknown facility type, state code,
    ///   location mode or a malformed ISO date.
    /// - [`FormError::ReadOnly`] for `emailVerified`.
    /// - [`FormError::Locked`] when editing a field that currently mirrors
    ///   another one.
    pub fn with_field(
        &self,
        key: FieldKey,
        value: FieldValue,
        policy: &FormPolicy,
    ) -> Result<FormState, FormError> {
        let mut next = self.clone();

        match key {
            FieldKey::LegalEntityName => {
                let text = value.into_text(key)?;
                if next.identity.same_as_legal {
                    next.identity.dba_name.clone_from(&text);
                }
                next.identity.legal_entity_name = text;
            }
            FieldKey::DbaName => {
                let text = value.into_text(key)?;
                if next.identity.same_as_legal {
                    return Err(FormError::Locked {
                        field: key,
                        by: FieldKey::SameAsLegal,
                    });
                }
                next.identity.dba_name = text;
            }
            FieldKey::SameAsLegal => {
                let checked = value.into_flag(key)?;
                next.identity.same_as_legal = checked;
                if checked {
                    next.identity.dba_name = next.identity.legal_entity_name.clone();
                }
            }
            FieldKey::FirstName => next.primary_contact.first_name = value.into_text(key)?,
            FieldKey::LastName => next.primary_contact.last_name = value.into_text(key)?,
            FieldKey::Title => next.primary_contact.title = value.into_text(key)?,
            FieldKey::WorkPhone => next.primary_contact.work_phone = value.into_text(key)?,
            FieldKey::CellPhone => next.primary_contact.cell_phone = value.into_text(key)?,
            FieldKey::Email => next.primary_contact.email = value.into_text(key)?,
            FieldKey::EmailVerified => return Err(FormError::ReadOnly(key)),
            FieldKey::FacilityType => {
                let text = value.into_text(key)?;
                next.facility_type = if text.is_empty() {
                    None
                } else {
                    Some(text.parse()?)
                };
            }
            FieldKey::Contact(role, ContactField::SameAsPrimary) => {
                let checked = value.into_flag(key)?;
                return Ok(self.with_same_as_primary(role, checked, policy));
            }
            FieldKey::Contact(role, field) => {
                let text = value.into_text(key)?;
                let block = next.contact_mut(role);
                if block.same_as_primary {
                    return Err(FormError::Locked {
                        field: key,
                        by: FieldKey::Contact(role, ContactField::SameAsPrimary),
                    });
                }
                if let Some(slot) = block.text_mut(field) {
                    *slot = text;
                }
            }
            FieldKey::BillingStreet => next.billing.street = value.into_text(key)?,
            FieldKey::BillingCity => next.billing.city = value.into_text(key)?,
            FieldKey::BillingState => {
                let text = value.into_text(key)?;
                next.billing.state = if text.is_empty() {
                    None
                } else {
                    Some(UsState::from_code(&text).ok_or(FormError::InvalidValue {
                        field: key,
                        value: text,
                    })?)
                };
            }
            FieldKey::BillingZip => next.billing.zip = value.into_text(key)?,
            FieldKey::LocationMode => {
                let text = value.into_text(key)?;
                next.site.location_mode = if text.is_empty() {
                    None
                } else {
                    Some(text.parse::<LocationMode>()?)
                };
            }
            FieldKey::ServiceSearch => next.services.service_search = value.into_text(key)?,
            FieldKey::ExpirationDate => {
                next.services.expiration_date = parse_iso_date(key, value.into_text(key)?)?;
            }
            FieldKey::ApplicationDate => {
                next.services.application_date = parse_iso_date(key, value.into_text(key)?)?;
            }
            FieldKey::ReadyCertify => next.ready_certify = value.into_flag(key)?,
        }

        if key.is_mirrored_by_contacts() {
            next.sync_linked_contacts();
        }
        Ok(next)
    }

    /// Links or unlinks a contact block from the primary contact.
    ///
    /// Checking copies first/last name, work phone and email from the primary
    /// contact. Unchecking clears or keeps those four fields depending on
    /// [`FormPolicy::contact_uncheck`].
    pub fn with_same_as_primary(
        &self,
        role: ContactRole,
        checked: bool,
        policy: &FormPolicy,
    ) -> FormState {
        let mut next = self.clone();
        let primary = next.primary_contact.clone();
        let block = next.contact_mut(role);

        block.same_as_primary = checked;
        if checked {
            block.copy_from(&primary);
        } else if policy.contact_uncheck == UncheckBehavior::Clear {
            block.clear_details();
        }
        next
    }

    /// Marks the primary email as verified. Only the mock verifier calls this.
    pub fn with_email_verified(&self) -> FormState {
        let mut next = self.clone();
        next.primary_contact.email_verified = true;
        next
    }

    pub fn with_uploaded_file(
        &self,
        file: UploadedFile,
    ) -> FormState {
        let mut next = self.clone();
        next.site.uploaded_files.push(file);
        next
    }

    pub fn without_uploaded_file(
        &self,
        index: usize,
    ) -> Result<FormState, FormError> {
        let mut next = self.clone();
        remove_at(&mut next.site.uploaded_files, index, "uploadedFiles")?;
        Ok(next)
    }

    /// Adds `name` to the selected services, or removes it if already there.
    /// Blank names are ignored.
    pub fn with_service_toggled(
        &self,
        name: &str,
    ) -> FormState {
        let mut next = self.clone();
        let selected = &mut next.services.selected_services;
        if let Some(pos) = selected.iter().position(|s| s == name) {
            selected.remove(pos);
        } else if !name.is_empty() {
            selected.push(name.to_string());
        }
        next
    }

    /// Appends a standard unless it is blank or already selected.
    pub fn with_standard(
        &self,
        name: &str,
    ) -> FormState {
        let mut next = self.clone();
        let selected = &mut next.services.selected_standards;
        if !name.is_empty() && !selected.iter().any(|s| s == name) {
            selected.push(name.to_string());
        }
        next
    }

    pub fn without_standard(
        &self,
        name: &str,
    ) -> FormState {
        let mut next = self.clone();
        next.services.selected_standards.retain(|s| s != name);
        next
    }

    /// Appends a formatted date to one of the capped chip lists.
    ///
    /// # Errors
    ///
    /// - [`Rejection::DuplicateDate`] if the date is already listed.
    /// - [`Rejection::DateLimitReached`] if the list is full.
    pub fn with_date_chip(
        &self,
        list: ChipList,
        date: &str,
    ) -> Result<FormState, Rejection> {
        let chips = self.services.chips(list);
        if chips.iter().any(|d| d == date) {
            return Err(Rejection::DuplicateDate {
                list,
                date: date.to_string(),
            });
        }
        if chips.len() >= list.capacity() {
            return Err(Rejection::DateLimitReached {
                list,
                limit: list.capacity(),
            });
        }

        let mut next = self.clone();
        next.services.chips_mut(list).push(date.to_string());
        Ok(next)
    }

    pub fn without_date_chip(
        &self,
        list: ChipList,
        index: usize,
    ) -> Result<FormState, FormError> {
        let mut next = self.clone();
        remove_at(next.services.chips_mut(list), index, list.key())?;
        Ok(next)
    }

    fn sync_linked_contacts(&mut self) {
        for role in ContactRole::ALL {
            let primary = &self.primary_contact;
            let block = match role {
                ContactRole::Ceo => &mut self.ceo,
                ContactRole::Quality => &mut self.quality,
                ContactRole::Invoicing => &mut self.invoicing,
            };
            if block.same_as_primary {
                block.copy_from(primary);
            }
        }
    }
}

fn parse_iso_date(
    key: FieldKey,
    text: String,
) -> Result<Option<NaiveDate>, FormError> {
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidValue {
            field: key,
            value: text,
        })
}

fn remove_at<T>(
    items: &mut Vec<T>,
    index: usize,
    list: &'static str,
) -> Result<T, FormError> {
    if index >= items.len() {
        return Err(FormError::IndexOutOfRange {
            list,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}
