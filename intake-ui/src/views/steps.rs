//! Input pages for steps 1 to 5.

use std::fmt;

use chrono::NaiveDate;
use intake_core::catalog::{self, STANDARDS};
use intake_core::format::us_date;
use intake_core::{
    ChipList, ContactBlock, ContactField, ContactRole, FacilityType, FieldKey, FormState,
    LocationMode, Step,
};

use super::{checkbox, or_dash};

/// The editable fields of one step, with their wire names for `set`.
pub struct StepPage<'a> {
    pub form: &'a FormState,
    pub step: Step,
}

fn row(
    f: &mut fmt::Formatter<'_>,
    key: FieldKey,
    required: bool,
    value: &str,
) -> fmt::Result {
    let marker = if required { " *" } else { "" };
    let label = format!("{}{marker}", key.label());
    writeln!(f, "  {label:<34} {:<28} ({key})", or_dash(value))
}

fn flag(
    f: &mut fmt::Formatter<'_>,
    key: FieldKey,
    label: &str,
    checked: bool,
) -> fmt::Result {
    writeln!(f, "  {} {label:<30} ({key})", checkbox(checked))
}

impl StepPage<'_> {
    fn organization(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let identity = &self.form.identity;
        let primary = &self.form.primary_contact;

        writeln!(f, "Organization")?;
        row(f, FieldKey::LegalEntityName, true, &identity.legal_entity_name)?;
        flag(f, FieldKey::SameAsLegal, "Same as Legal Entity Name", identity.same_as_legal)?;
        row(f, FieldKey::DbaName, true, &identity.dba_name)?;

        writeln!(f, "Primary Contact")?;
        row(f, FieldKey::FirstName, true, &primary.first_name)?;
        row(f, FieldKey::LastName, true, &primary.last_name)?;
        row(f, FieldKey::Title, true, &primary.title)?;
        row(f, FieldKey::WorkPhone, true, &primary.work_phone)?;
        row(f, FieldKey::CellPhone, false, &primary.cell_phone)?;
        row(f, FieldKey::Email, true, &primary.email)?;
        let status = if primary.email_verified {
            "verified"
        } else {
            "not verified (verify | refresh)"
        };
        writeln!(f, "  {:<34} {status}", "Email status")
    }

    fn facility(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let current = self.form.facility_type;
        writeln!(f, "Facility Type * (facilityType)")?;
        for option in FacilityType::ALL {
            let selected = current == Some(option);
            writeln!(f, "  {} {option}", if selected { "(•)" } else { "( )" })?;
        }
        Ok(())
    }

    fn contact(
        &self,
        f: &mut fmt::Formatter<'_>,
        role: ContactRole,
        block: &ContactBlock,
    ) -> fmt::Result {
        let required = role != ContactRole::Quality;
        writeln!(f, "{}", role.title())?;
        flag(
            f,
            FieldKey::Contact(role, ContactField::SameAsPrimary),
            ContactField::SameAsPrimary.label(),
            block.same_as_primary,
        )?;
        for (field, value) in [
            (ContactField::FirstName, &block.first_name),
            (ContactField::LastName, &block.last_name),
            (ContactField::Phone, &block.phone),
            (ContactField::Email, &block.email),
        ] {
            row(f, FieldKey::Contact(role, field), required, value)?;
        }
        Ok(())
    }

    fn leadership(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for role in ContactRole::ALL {
            self.contact(f, role, self.form.contact(role))?;
        }

        let billing = &self.form.billing;
        writeln!(f, "Billing Address")?;
        row(f, FieldKey::BillingStreet, true, &billing.street)?;
        row(f, FieldKey::BillingCity, true, &billing.city)?;
        let state = billing
            .state
            .map(|s| format!("{} ({})", s.name(), s.code()))
            .unwrap_or_default();
        row(f, FieldKey::BillingState, true, &state)?;
        row(f, FieldKey::BillingZip, true, &billing.zip)
    }

    fn site(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let site = &self.form.site;
        writeln!(f, "Location Mode * (site_locationMode)")?;
        for mode in [LocationMode::Single, LocationMode::Multiple] {
            let selected = site.location_mode == Some(mode);
            writeln!(
                f,
                "  {} {} ({})",
                if selected { "(•)" } else { "( )" },
                mode.label(),
                mode.as_str()
            )?;
        }

        writeln!(f, "Uploaded Files (file add | file rm | export template)")?;
        if site.uploaded_files.is_empty() {
            writeln!(f, "  -")?;
        }
        for (i, file) in site.uploaded_files.iter().enumerate() {
            writeln!(f, "  {}. {} ({})", i + 1, file.name, file.human_size())?;
        }
        Ok(())
    }

    fn services(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let services = &self.form.services;
        let search = &services.service_search;

        writeln!(f, "Services Provided * (search: {})", or_dash(search))?;
        for category in catalog::filter_services(search) {
            writeln!(f, "  {}", category.title)?;
            for item in category.items {
                let selected = services.selected_services.iter().any(|s| s == item);
                writeln!(f, "    {} {item}", checkbox(selected))?;
            }
        }

        writeln!(f, "Standards to Apply")?;
        for standard in STANDARDS {
            let selected = services.selected_standards.iter().any(|s| s == standard);
            writeln!(f, "  {} {standard}", checkbox(selected))?;
        }

        let date = |d: &Option<NaiveDate>| d.as_ref().map(us_date).unwrap_or_default();
        row(f, FieldKey::ApplicationDate, false, &date(&services.application_date))?;
        row(f, FieldKey::ExpirationDate, false, &date(&services.expiration_date))?;

        for list in ChipList::ALL {
            let chips = self.form.date_chips(list);
            writeln!(f, "{} ({}/{})", list.label(), chips.len(), list.capacity())?;
            if chips.is_empty() {
                writeln!(f, "  -")?;
            } else {
                let numbered: Vec<String> = chips
                    .iter()
                    .enumerate()
                    .map(|(i, chip)| format!("{}. {chip}", i + 1))
                    .collect();
                writeln!(f, "  {}", numbered.join("  "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for StepPage<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.step {
            Step::Organization => self.organization(f),
            Step::FacilityDetails => self.facility(f),
            Step::LeadershipContacts => self.leadership(f),
            Step::SiteInformation => self.site(f),
            Step::ServicesAndCertifications => self.services(f),
            // The review page has its own view.
            Step::ReviewAndSubmit => Ok(()),
        }
    }
}
