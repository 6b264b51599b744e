//! The read-only summary shown on step 6.

use std::fmt;
use std::str::FromStr;

use intake_core::format::us_date;
use intake_core::{ContactBlock, ContactRole, FormState, LocationMode};
use thiserror::Error;

use super::{checkbox, or_dash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSection {
    Basic,
    Facility,
    Leadership,
    Site,
    Services,
}

impl ReviewSection {
    pub const ALL: [ReviewSection; 5] = [
        Self::Basic,
        Self::Facility,
        Self::Leadership,
        Self::Site,
        Self::Services,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Facility => "facility",
            Self::Leadership => "leadership",
            Self::Site => "site",
            Self::Services => "services",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Information",
            Self::Facility => "Facility Details",
            Self::Leadership => "Leadership Contacts",
            Self::Site => "Site Information",
            Self::Services => "Services & Certifications",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown review section '{0}' (expected basic, facility, leadership, site or services)")]
pub struct UnknownSection(pub String);

impl FromStr for ReviewSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.id() == wanted)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Which review sections are expanded. View-local: never saved or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewState {
    open: [bool; 5],
}

impl Default for ReviewState {
    fn default() -> Self {
        Self { open: [true; 5] }
    }
}

impl ReviewState {
    pub fn is_open(
        &self,
        section: ReviewSection,
    ) -> bool {
        self.open[section.index()]
    }

    /// Opens or closes `section`. Returns whether anything changed.
    pub fn set_open(
        &mut self,
        section: ReviewSection,
        open: bool,
    ) -> bool {
        let slot = &mut self.open[section.index()];
        let changed = *slot != open;
        *slot = open;
        changed
    }
}

pub struct ReviewPage<'a> {
    pub form: &'a FormState,
    pub state: &'a ReviewState,
}

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "  {label:<48} {}", or_dash(value))
}

fn joined_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn full_name(
    first: &str,
    last: &str,
) -> String {
    format!("{first} {last}").trim().to_string()
}

/// Title line followed by the non-empty detail lines, or `-` when there are none.
fn card(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    title: &str,
    lines: &[String],
) -> fmt::Result {
    row(f, label, title)?;
    let lines: Vec<&String> = lines.iter().filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        writeln!(f, "  {:<48} -", "")?;
    }
    for line in lines {
        writeln!(f, "  {:<48} {line}", "")?;
    }
    Ok(())
}

fn labelled(
    prefix: &str,
    value: &str,
) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{prefix}: {value}")
    }
}

impl ReviewPage<'_> {
    fn basic(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let identity = &self.form.identity;
        let primary = &self.form.primary_contact;
        row(f, "Legal Entity Name", &identity.legal_entity_name)?;
        row(f, "d/b/a Name", &identity.dba_name)?;
        card(
            f,
            "Primary Contact",
            &full_name(&primary.first_name, &primary.last_name),
            &[
                primary.title.clone(),
                labelled("Work", &primary.work_phone),
                labelled("Mobile", &primary.cell_phone),
                labelled("Email", &primary.email),
            ],
        )
    }

    fn contact_card(
        &self,
        f: &mut fmt::Formatter<'_>,
        role: ContactRole,
        block: &ContactBlock,
    ) -> fmt::Result {
        let mut lines = vec![labelled("Phone", &block.phone), labelled("Email", &block.email)];
        if role == ContactRole::Invoicing {
            lines.push(self.billing_line());
        }
        card(
            f,
            role.title(),
            &full_name(&block.first_name, &block.last_name),
            &lines,
        )
    }

    fn billing_line(&self) -> String {
        let billing = &self.form.billing;
        let state = billing.state.map(|s| s.code()).unwrap_or_default();
        let parts = [billing.street.trim(), billing.city.trim(), state, billing.zip.trim()];
        if parts.iter().all(|p| p.is_empty()) {
            return String::new();
        }
        let [street, city, state, zip] = parts;
        let raw = format!("{street} {city}, {state} {zip}");
        let collapsed: Vec<&str> = raw.split_whitespace().collect();
        format!("Billing Address: {}", collapsed.join(" "))
    }

    fn site(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let site = &self.form.site;
        let files = &site.uploaded_files;
        let configuration = match site.location_mode {
            Some(LocationMode::Multiple) if !files.is_empty() => {
                format!("Multiple Locations ({} sites)", files.len())
            }
            Some(LocationMode::Multiple) => "Multiple Locations".to_string(),
            Some(LocationMode::Single) => "Single Location".to_string(),
            None => String::new(),
        };
        let method = match site.location_mode {
            Some(LocationMode::Multiple) => "File Upload",
            _ => "",
        };
        let names: Vec<String> = files
            .iter()
            .map(|file| format!("{} ({})", file.name, file.human_size()))
            .collect();

        row(f, "Site Configuration", &configuration)?;
        row(f, "Input Method", method)?;
        row(f, "Uploaded Files", &joined_or_dash(&names))
    }

    fn services(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let services = &self.form.services;
        let date = |d: Option<chrono::NaiveDate>| d.as_ref().map(us_date).unwrap_or_default();

        row(f, "Services Provided", &joined_or_dash(&services.selected_services))?;
        row(f, "Standards to Apply", &joined_or_dash(&services.selected_standards))?;
        row(f, "Date of Application", &date(services.application_date))?;
        row(
            f,
            "Expiration Date of Current Stroke Certification",
            &date(services.expiration_date),
        )?;
        row(
            f,
            "Dates of last 25 thrombolytic administrations",
            &joined_or_dash(&services.thrombolytic_dates),
        )?;
        row(
            f,
            "Dates of last 15 thrombectomies",
            &joined_or_dash(&services.thrombectomy_dates),
        )
    }
}

impl fmt::Display for ReviewPage<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Hospital Information")?;
        for section in ReviewSection::ALL {
            let open = self.state.is_open(section);
            let (arrow, verb) = if open { ("v", "collapse") } else { (">", "expand") };
            writeln!(f, "{arrow} {}  ({verb} {})", section.title(), section.id())?;
            if !open {
                continue;
            }
            match section {
                ReviewSection::Basic => self.basic(f)?,
                ReviewSection::Facility => row(
                    f,
                    "Facility Type",
                    self.form.facility_type.map(|t| t.label()).unwrap_or_default(),
                )?,
                ReviewSection::Leadership => {
                    for role in ContactRole::ALL {
                        self.contact_card(f, role, self.form.contact(role))?;
                    }
                }
                ReviewSection::Site => self.site(f)?,
                ReviewSection::Services => self.services(f)?,
            }
        }

        writeln!(f, "Ready to Submit?")?;
        writeln!(
            f,
            "  {} I certify that all information provided is accurate and complete (ready_certify)",
            checkbox(self.form.ready_certify)
        )?;
        writeln!(f, "  export pdf │ export csv")
    }
}

#[cfg(test)]
mod tests {
    use intake_core::{FieldKey, FormPolicy, UploadedFile};
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(
        form: &FormState,
        state: &ReviewState,
    ) -> String {
        ReviewPage { form, state }.to_string()
    }

    #[test]
    fn sections_start_open_and_stay_put_when_reopened() {
        let mut state = ReviewState::default();

        assert!(state.is_open(ReviewSection::Site));
        assert!(!state.set_open(ReviewSection::Site, true));
        assert!(state.is_open(ReviewSection::Site));
        assert!(state.set_open(ReviewSection::Site, false));
        assert!(!state.is_open(ReviewSection::Site));
        assert!(!state.set_open(ReviewSection::Site, false));
    }

    #[test]
    fn section_ids_parse() {
        assert_eq!("Leadership".parse::<ReviewSection>(), Ok(ReviewSection::Leadership));
        assert_eq!(
            "contacts".parse::<ReviewSection>(),
            Err(UnknownSection("contacts".into()))
        );
    }

    #[test]
    fn empty_values_render_as_dash() {
        let text = render(&FormState::new(), &ReviewState::default());

        assert!(text.contains("Legal Entity Name"));
        assert!(text.contains("Services Provided"));
        assert!(!text.contains("Billing Address:"));
        for line in text.lines().filter(|l| l.contains("Facility Type")) {
            assert!(line.trim_end().ends_with('-'));
        }
    }

    #[test]
    fn collapsed_section_hides_rows() {
        let mut state = ReviewState::default();
        state.set_open(ReviewSection::Basic, false);

        let text = render(&FormState::new(), &state);

        assert!(text.contains("> Basic Information  (expand basic)"));
        assert!(!text.contains("d/b/a Name"));
        assert!(text.contains("v Facility Details  (collapse facility)"));
    }

    #[test]
    fn site_and_billing_summaries() {
        let policy = FormPolicy::strict();
        let mut form = FormState::new();
        for (key, value) in [
            (FieldKey::LocationMode, "multiple"),
            (FieldKey::BillingStreet, "1 Main St"),
            (FieldKey::BillingCity, "Austin"),
            (FieldKey::BillingState, "TX"),
            (FieldKey::BillingZip, "78701"),
            (FieldKey::ApplicationDate, "2025-03-01"),
        ] {
            form = form.with_field(key, value.into(), &policy).unwrap();
        }
        form = form
            .with_uploaded_file(UploadedFile::new("a.csv", 10))
            .with_uploaded_file(UploadedFile::new("b.csv", 2048));

        let text = render(&form, &ReviewState::default());

        assert!(text.contains("Multiple Locations (2 sites)"));
        assert!(text.contains("File Upload"));
        assert!(text.contains("a.csv (10B), b.csv (2.0KB)"));
        assert!(text.contains("Billing Address: 1 Main St Austin, TX 78701"));
        assert!(text.contains("03/01/2025"));
    }
}
