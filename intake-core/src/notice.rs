//! Short user-facing messages and the sink that displays them.

use std::fmt;

use serde::Serialize;

use crate::errors::Rejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Required fields are missing or the certification is unchecked.
    Validation,
    /// A date chip that is already in its list.
    Duplicate,
    /// A date chip list that is already full.
    LimitReached,
    /// Acknowledgement of a mock action.
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(
        kind: NoticeKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn confirmation(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Confirmation, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&Rejection> for Notice {
    fn from(rejection: &Rejection) -> Self {
        let kind = match rejection {
            Rejection::DuplicateDate { .. } => NoticeKind::Duplicate,
            Rejection::DateLimitReached { .. } => NoticeKind::LimitReached,
            Rejection::StepIncomplete { .. }
            | Rejection::NotCertified
            | Rejection::NotOnReviewStep { .. } => NoticeKind::Validation,
        };
        Self::new(kind, rejection.to_string())
    }
}

/// Displays notices to the user. Implementations must not block waiting for
/// an acknowledgement.
pub trait NoticeSink {
    fn notify(
        &mut self,
        notice: Notice,
    );
}

/// Collects notices in memory; handy for tests and for batching.
impl NoticeSink for Vec<Notice> {
    fn notify(
        &mut self,
        notice: Notice,
    ) {
        self.push(notice);
    }
}
