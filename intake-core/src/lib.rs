//! State machine behind the six-step quote request intake form.
//!
//! ```
//! use intake_core::{FieldKey, FormSession, Step};
//!
//! let mut session = FormSession::new();
//! assert!(session.advance().is_err());
//!
//! for (key, value) in [
//!     (FieldKey::LegalEntityName, "Acme Health"),
//!     (FieldKey::DbaName, "Acme"),
//!     (FieldKey::FirstName, "Grace"),
//!     (FieldKey::LastName, "Hopper"),
//!     (FieldKey::Title, "CNO"),
//!     (FieldKey::WorkPhone, "555-0101"),
//!     (FieldKey::Email, "grace@example.org"),
//! ] {
//!     session.set_field(key, value).unwrap();
//! }
//!
//! assert_eq!(session.advance(), Ok(Step::FacilityDetails));
//! ```

pub mod catalog;
pub mod errors;
pub mod format;
pub mod models;
pub mod notice;
pub mod policy;
pub mod session;
pub mod step;
pub mod transport;
pub mod validation;

pub use errors::{FormError, Rejection, SessionError};
pub use models::*;
pub use notice::{Notice, NoticeKind, NoticeSink};
pub use policy::{FormPolicy, UncheckBehavior};
pub use session::{FormSession, Submission};
pub use step::Step;
pub use transport::{ExportFormat, MockTransport, Verification};
pub use validation::Requirement;
