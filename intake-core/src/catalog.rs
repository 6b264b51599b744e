//! Fixed option lists for the services & certifications step.

/// A titled group of selectable services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCategory {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const SERVICE_CATALOG: &[ServiceCategory] = &[
    ServiceCategory {
        title: "Emergency & Critical Care",
        items: &[
            "Emergency Department",
            "Neonatal Intensive Care Services",
            "Pediatric Intensive Care Services",
        ],
    },
    ServiceCategory {
        title: "Cardiac Services",
        items: &["Cardiac Catheterization Laboratory", "Open Heart"],
    },
    ServiceCategory {
        title: "Diagnostic Services",
        items: &[
            "Magnetic Resonance Imaging (MRI)",
            "Diagnostic Radioisotope Facility",
            "Lithotripsy",
        ],
    },
];

pub const STANDARDS: &[&str] = &["Action1", "Action2", "Action3", "Action4"];

/// A category narrowed down by the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCategory {
    pub title: &'static str,
    pub items: Vec<&'static str>,
}

/// Keeps services whose name contains `search` (case-insensitive) and drops
/// categories left empty. An empty search returns the whole catalog.
pub fn filter_services(search: &str) -> Vec<FilteredCategory> {
    let needle = search.to_lowercase();
    SERVICE_CATALOG
        .iter()
        .map(|category| FilteredCategory {
            title: category.title,
            items: category
                .items
                .iter()
                .copied()
                .filter(|item| item.to_lowercase().contains(&needle))
                .collect(),
        })
        .filter(|category| !category.items.is_empty())
        .collect()
}

/// Looks up a catalog service by name, ignoring case.
pub fn find_service(name: &str) -> Option<&'static str> {
    SERVICE_CATALOG
        .iter()
        .flat_map(|category| category.items.iter().copied())
        .find(|item| item.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_search_returns_every_category() {
        let all = filter_services("");

        assert_eq!(all.len(), SERVICE_CATALOG.len());
        assert_eq!(all[0].items.len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_and_hides_empty_categories() {
        let filtered = filter_services("CARDIAC");

        assert_eq!(
            filtered,
            vec![FilteredCategory {
                title: "Cardiac Services",
                items: vec!["Cardiac Catheterization Laboratory"],
            }]
        );
    }

    #[test]
    fn search_matches_across_categories() {
        let filtered = filter_services("care");
        let titles: Vec<&str> = filtered.iter().map(|c| c.title).collect();

        assert_eq!(titles, vec!["Emergency & Critical Care"]);
        assert!(filter_services("zzz").is_empty());
    }

    #[test]
    fn find_service_returns_canonical_name() {
        assert_eq!(find_service("open heart"), Some("Open Heart"));
        assert_eq!(find_service("Dialysis"), None);
    }
}
