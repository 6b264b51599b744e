//! Per-step completeness rules that gate the "Continue" button.
//!
//! | step | required |
//! |------|----------|
//! | 1    | legal entity name, DBA name, first/last name, title, work phone, email |
//! | 2    | facility type |
//! | 3    | CEO and invoicing first/last name, phone, email; billing street, city, state, ZIP (only when [`FormPolicy::gate_leadership_step`] is set) |
//! | 4    | location mode |
//! | 5    | at least one service |
//! | 6    | certification checkbox |

use std::fmt;

use crate::models::{ContactField, ContactRole, FieldKey, FormState};
use crate::policy::FormPolicy;
use crate::step::Step;

/// Something a step needs before the user may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Field(FieldKey),
    AtLeastOneService,
}

impl Requirement {
    pub fn label(&self) -> String {
        match self {
            Self::Field(key) => key.label(),
            Self::AtLeastOneService => "At least one service".to_string(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.label())
    }
}

const CONTACT_DETAILS: [ContactField; 4] = [
    ContactField::FirstName,
    ContactField::LastName,
    ContactField::Phone,
    ContactField::Email,
];

/// Lists what is still missing on `step`, in on-screen order.
pub fn missing_requirements(
    form: &FormState,
    step: Step,
    policy: &FormPolicy,
) -> Vec<Requirement> {
    let mut missing = Vec::new();
    let mut require_text = |key: FieldKey, value: &str| {
        if value.is_empty() {
            missing.push(Requirement::Field(key));
        }
    };

    match step {
        Step::Organization => {
            let primary = &form.primary_contact;
            require_text(FieldKey::LegalEntityName, &form.identity.legal_entity_name);
            require_text(FieldKey::DbaName, &form.identity.dba_name);
            require_text(FieldKey::FirstName, &primary.first_name);
            require_text(FieldKey::LastName, &primary.last_name);
            require_text(FieldKey::Title, &primary.title);
            require_text(FieldKey::WorkPhone, &primary.work_phone);
            require_text(FieldKey::Email, &primary.email);
        }
        Step::FacilityDetails => {
            if form.facility_type.is_none() {
                missing.push(Requirement::Field(FieldKey::FacilityType));
            }
        }
        Step::LeadershipContacts => {
            if policy.gate_leadership_step {
                for role in [ContactRole::Ceo, ContactRole::Invoicing] {
                    let block = form.contact(role);
                    for field in CONTACT_DETAILS {
                        let value = match field {
                            ContactField::FirstName => &block.first_name,
                            ContactField::LastName => &block.last_name,
                            ContactField::Phone => &block.phone,
                            _ => &block.email,
                        };
                        require_text(FieldKey::Contact(role, field), value);
                    }
                }
                let billing = &form.billing;
                require_text(FieldKey::BillingStreet, &billing.street);
                require_text(FieldKey::BillingCity, &billing.city);
                require_text(
                    FieldKey::BillingState,
                    billing.state.map(|s| s.code()).unwrap_or_default(),
                );
                require_text(FieldKey::BillingZip, &billing.zip);
            }
        }
        Step::SiteInformation => {
            if form.site.location_mode.is_none() {
                missing.push(Requirement::Field(FieldKey::LocationMode));
            }
        }
        Step::ServicesAndCertifications => {
            if form.services.selected_services.is_empty() {
                missing.push(Requirement::AtLeastOneService);
            }
        }
        Step::ReviewAndSubmit => {
            if !form.ready_certify {
                missing.push(Requirement::Field(FieldKey::ReadyCertify));
            }
        }
    }

    missing
}

/// `true` when nothing is missing on `step`.
pub fn can_advance(
    form: &FormState,
    step: Step,
    policy: &FormPolicy,
) -> bool {
    missing_requirements(form, step, policy).is_empty()
}
