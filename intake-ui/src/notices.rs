//! Notice sink that prints to a writer.

use std::io::Write;

use intake_core::{Notice, NoticeKind, NoticeSink};
use tracing::warn;

/// Writes one line per notice, prefixed by its kind.
pub struct ConsoleNotices<W: Write> {
    out: W,
}

impl<W: Write> ConsoleNotices<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn prefix(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Validation => "!",
        NoticeKind::Duplicate | NoticeKind::LimitReached => "~",
        NoticeKind::Confirmation => "✓",
    }
}

impl<W: Write> NoticeSink for ConsoleNotices<W> {
    fn notify(
        &mut self,
        notice: Notice,
    ) {
        if let Err(error) = writeln!(self.out, "{} {notice}", prefix(notice.kind)) {
            warn!(%error, message = %notice, "notice not displayed");
        }
    }
}

#[cfg(test)]
mod tests {
    use intake_core::Rejection;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn notices_are_written_one_per_line() {
        let mut sink = ConsoleNotices::new(Vec::new());
        sink.notify(Notice::confirmation("Saved (mock)."));
        sink.notify(Notice::from(&Rejection::NotCertified));

        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(
            text,
            "✓ Saved (mock).\n! Please confirm the certification checkbox before submitting.\n"
        );
    }
}
