//! Line-oriented command language for the terminal front end.
//!
//! One command per line, split with shell quoting rules so values may
//! contain spaces (`set legalEntityName "Acme Health"`). Blank lines and
//! lines starting with `#` are ignored. Indices are 1-based.

use intake_core::{ChipList, ContactRole, ExportFormat, FieldKey, FormError};
use thiserror::Error;

use crate::views::{ReviewSection, UnknownSection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: FieldKey, value: String },
    Clear(FieldKey),
    Check(FieldKey),
    Uncheck(FieldKey),
    SameAsPrimary { role: ContactRole, on: bool },
    AddFile { name: String, size: u64 },
    /// Zero-based.
    RemoveFile(usize),
    Service(String),
    AddOtherService,
    Search(String),
    AddStandard(String),
    RemoveStandard(String),
    AddDate { list: ChipList, iso: String },
    /// Zero-based.
    RemoveDate { list: ChipList, index: usize },
    Continue,
    Previous,
    Step(i64),
    Expand(ReviewSection),
    Collapse(ReviewSection),
    Save,
    Verify,
    RefreshEmail,
    Export(ExportFormat),
    /// Zero-based.
    Preview(usize),
    SupportChat,
    Submit,
    Show,
    LogLevel(String),
    Help,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot split line: {0}")]
    Quoting(#[from] shell_words::ParseError),

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{value}' is not a valid {what}")]
    BadNumber { what: &'static str, value: String },

    #[error("indices start at 1")]
    ZeroIndex,

    #[error(transparent)]
    Field(#[from] FormError),

    #[error(transparent)]
    Section(#[from] UnknownSection),
}

pub const HELP: &str = "\
Fields
  set <key> <value>            set a text field, e.g. set legalEntityName \"Acme\"
  clear <key>                  empty a text field
  check <key> | uncheck <key>  tick or untick a checkbox
  same-as-primary <ceo|quality|invoicing> <on|off>
Site
  file add <name> <bytes>      record an uploaded site list
  file rm <n>                  remove file n
  preview <n>                  preview file n
Services
  search <text>                filter the service catalog
  service <name>               select or deselect a service
  service other                request a service not in the catalog
  standard add|rm <name>       Action1 .. Action4
  date add <thrombolytic|thrombectomy> <YYYY-MM-DD>
  date rm <list> <n>
Navigation
  continue | previous | step <n> | show
  expand <section> | collapse <section>   review page sections
Actions
  save | verify | refresh | export pdf|csv|template | support | submit
  log <level> | help | exit";

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    let n: usize = raw.parse().map_err(|_| CommandError::BadNumber {
        what: "index",
        value: raw.to_string(),
    })?;
    n.checked_sub(1).ok_or(CommandError::ZeroIndex)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parses one input line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let words = shell_words::split(trimmed)?;
    let args: Vec<&str> = words.iter().map(String::as_str).collect();
    let rest = |from: usize| args.get(from..).unwrap_or_default().join(" ");

    let command = match args.as_slice() {
        ["set", key, _, ..] => Command::Set {
            key: key.parse()?,
            value: rest(2),
        },
        ["set", ..] => return Err(CommandError::Usage("set <key> <value>")),
        ["clear", key] => Command::Clear(key.parse()?),
        ["check", key] => Command::Check(key.parse()?),
        ["uncheck", key] => Command::Uncheck(key.parse()?),
        ["same-as-primary", role, switch] => Command::SameAsPrimary {
            role: ContactRole::parse(role)
                .ok_or(CommandError::Usage("same-as-primary <ceo|quality|invoicing> <on|off>"))?,
            on: parse_switch(switch)
                .ok_or(CommandError::Usage("same-as-primary <ceo|quality|invoicing> <on|off>"))?,
        },
        ["file", "add", name, size] => Command::AddFile {
            name: name.to_string(),
            size: size.parse().map_err(|_| CommandError::BadNumber {
                what: "file size",
                value: size.to_string(),
            })?,
        },
        ["file", "rm", index] => Command::RemoveFile(parse_index(index)?),
        ["file", ..] => return Err(CommandError::Usage("file add <name> <bytes> | file rm <n>")),
        ["preview", index] => Command::Preview(parse_index(index)?),
        ["service", "other"] => Command::AddOtherService,
        ["service", _, ..] => Command::Service(rest(1)),
        ["service"] => return Err(CommandError::Usage("service <name>")),
        ["search", ..] => Command::Search(rest(1)),
        ["standard", "add", _, ..] => Command::AddStandard(rest(2)),
        ["standard", "rm", _, ..] => Command::RemoveStandard(rest(2)),
        ["standard", ..] => return Err(CommandError::Usage("standard add|rm <name>")),
        ["date", "add", list, iso] => Command::AddDate {
            list: list.parse()?,
            iso: iso.to_string(),
        },
        ["date", "rm", list, index] => Command::RemoveDate {
            list: list.parse()?,
            index: parse_index(index)?,
        },
        ["date", ..] => return Err(CommandError::Usage("date add <list> <YYYY-MM-DD> | date rm <list> <n>")),
        ["continue" | "next"] => Command::Continue,
        ["previous" | "back"] => Command::Previous,
        ["step", n] => Command::Step(n.parse().map_err(|_| CommandError::BadNumber {
            what: "step number",
            value: n.to_string(),
        })?),
        ["expand", section] => Command::Expand(section.parse()?),
        ["collapse", section] => Command::Collapse(section.parse()?),
        ["save"] => Command::Save,
        ["verify"] => Command::Verify,
        ["refresh"] => Command::RefreshEmail,
        ["export", format] => Command::Export(
            ExportFormat::parse(format).ok_or(CommandError::Usage("export pdf|csv|template"))?,
        ),
        ["support"] => Command::SupportChat,
        ["submit"] => Command::Submit,
        ["show"] => Command::Show,
        ["log", level] => Command::LogLevel(level.to_string()),
        ["help"] => Command::Help,
        ["exit" | "quit"] => Command::Exit,
        [other, ..] => return Err(CommandError::Unknown(other.to_string())),
        [] => return Ok(None),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   # fill step 1").unwrap().is_none());
    }

    #[test]
    fn set_accepts_quoted_and_unquoted_values() {
        assert_eq!(
            parse(r#"set legalEntityName "Acme Health""#),
            Command::Set {
                key: FieldKey::LegalEntityName,
                value: "Acme Health".into(),
            }
        );
        assert_eq!(
            parse("set dbaName Acme Health"),
            Command::Set {
                key: FieldKey::DbaName,
                value: "Acme Health".into(),
            }
        );
    }

    #[test]
    fn unknown_field_is_reported() {
        let err = parse_line("set svc_selected x").unwrap_err();

        assert!(matches!(err, CommandError::Field(FormError::UnknownField(_))));
    }

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse("file rm 1"), Command::RemoveFile(0));
        assert_eq!(
            parse("date rm thrombectomy 3"),
            Command::RemoveDate {
                list: ChipList::Thrombectomy,
                index: 2,
            }
        );
        assert!(matches!(
            parse_line("file rm 0"),
            Err(CommandError::ZeroIndex)
        ));
    }

    #[test]
    fn contact_and_date_commands() {
        assert_eq!(
            parse("same-as-primary CEO on"),
            Command::SameAsPrimary {
                role: ContactRole::Ceo,
                on: true,
            }
        );
        assert_eq!(
            parse("date add thrombolytic_dates 2025-01-31"),
            Command::AddDate {
                list: ChipList::Thrombolytic,
                iso: "2025-01-31".into(),
            }
        );
        assert_eq!(
            parse("service Open Heart"),
            Command::Service("Open Heart".into())
        );
        assert_eq!(parse("service other"), Command::AddOtherService);
        assert_eq!(parse("service other care"), Command::Service("other care".into()));
    }

    #[test]
    fn search_may_be_cleared() {
        assert_eq!(parse("search"), Command::Search(String::new()));
    }

    #[test]
    fn navigation_and_actions() {
        assert_eq!(parse("continue"), Command::Continue);
        assert_eq!(parse("step 6"), Command::Step(6));
        assert_eq!(parse("expand site"), Command::Expand(ReviewSection::Site));
        assert_eq!(parse("collapse services"), Command::Collapse(ReviewSection::Services));
        assert_eq!(parse("export template"), Command::Export(ExportFormat::CsvTemplate));
        assert!(matches!(
            parse_line("teleport 3"),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            parse_line("set legalEntityName \"unterminated"),
            Err(CommandError::Quoting(_))
        ));
    }
}
