mod contact;
mod facility_type;
mod field;
mod form_state;
mod location;
mod services;
mod us_state;

pub use contact::{ContactBlock, ContactField, ContactRole, PrimaryContact};
pub use facility_type::FacilityType;
pub use field::{FieldKey, FieldKind, FieldValue};
pub use form_state::{BillingAddress, FormState, Identity};
pub use location::{LocationMode, SiteInfo, UploadedFile};
pub use services::{ChipList, ServicesAndCertification};
pub use us_state::UsState;
