//! Session commands and their parsing.

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use datatable_lib::filter::FilterKind;
use datatable_lib::filter::FilterValue;

use crate::error::CliError;

pub const HELP: &str = "\
Commands:
  show                      print the current page
  sort <column>             cycle a column: asc, desc, off
  filter <field> [value]    apply one filter value directly (empty clears it)
  open                      open the filter popover
  set <field> [value]       set a draft filter value
  apply                     apply the draft and close the popover
  cancel                    discard the draft and close the popover
  clear                     blank the draft, keeping the popover open
  page <n> | next | prev    change page
  refresh                   clear sorting
  click <n>                 click the n-th row of the page (1-based)
  options <field> [query]   list (and load) options, fuzzy-filtered by query
  load <field>              reload options for a field
  params                    print applied filters as query parameters
  help                      show this help
  quit                      exit

Values: text as-is; choices comma-separated; ranges 'min..max';
dates 'YYYY-MM-DD[THH:MM[:SS]]..YYYY-MM-DD[THH:MM[:SS]]'. Either bound
of a range may be left empty.";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Sort(String),
    Filter { field: String, value: String },
    Open,
    Set { field: String, value: String },
    Apply,
    Cancel,
    Clear,
    Page(usize),
    Next,
    Prev,
    Refresh,
    Click(usize),
    Options { field: String, query: String },
    Load(String),
    Params,
    Help,
    Quit,
}

impl Command {
    /// Parses a command line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "show" => Command::Show,
            "sort" => Command::Sort(required(rest, "sort <column>")?),
            "filter" => {
                let (field, value) = field_and_value(rest, "filter <field> [value]")?;
                Command::Filter { field, value }
            }
            "open" => Command::Open,
            "set" => {
                let (field, value) = field_and_value(rest, "set <field> [value]")?;
                Command::Set { field, value }
            }
            "apply" => Command::Apply,
            "cancel" => Command::Cancel,
            "clear" => Command::Clear,
            "page" => Command::Page(number(rest, "page")?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "refresh" => Command::Refresh,
            "click" => Command::Click(number(rest, "row")?),
            "options" => {
                let (field, query) = field_and_value(rest, "options <field> [query]")?;
                Command::Options { field, query }
            }
            "load" => Command::Load(required(rest, "load <field>")?),
            "params" => Command::Params,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required(rest: &str, usage: &str) -> Result<String, CliError> {
    if rest.is_empty() {
        return Err(CliError::usage(format!("usage: {}", usage)));
    }
    Ok(rest.to_string())
}

fn field_and_value(rest: &str, usage: &str) -> Result<(String, String), CliError> {
    let rest = required(rest, usage)?;
    Ok(match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field.to_string(), value.trim().to_string()),
        None => (rest, String::new()),
    })
}

fn number(rest: &str, what: &'static str) -> Result<usize, CliError> {
    rest.parse().map_err(|_| CliError::invalid(what, rest))
}

/// Parses a filter value typed at the prompt for a filter of `kind`.
///
/// An empty input gives the kind's blank (inactive) value.
pub fn parse_filter_value(kind: FilterKind, raw: &str) -> Result<FilterValue, CliError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(FilterValue::empty_for(kind));
    }

    match kind {
        FilterKind::Text => Ok(FilterValue::text(raw)),
        FilterKind::SingleChoice | FilterKind::SearchableSingleChoice => Ok(FilterValue::choice(raw)),
        FilterKind::MultiChoice => Ok(FilterValue::choices(
            raw.split(',').map(str::trim).filter(|s| !s.is_empty()),
        )),
        FilterKind::Range => {
            let (min, max) = bounds(raw, "range")?;
            let parse = |s: &str| s.parse::<f64>().map_err(|_| CliError::invalid("number", s));
            Ok(FilterValue::range(
                min.map(parse).transpose()?,
                max.map(parse).transpose()?,
            ))
        }
        FilterKind::DateRange => {
            let (start, end) = bounds(raw, "date range")?;
            Ok(FilterValue::date_range(
                start.map(parse_datetime).transpose()?,
                end.map(parse_datetime).transpose()?,
            ))
        }
    }
}

/// Splits `min..max`; empty sides are open bounds.
fn bounds<'a>(raw: &'a str, what: &'static str) -> Result<(Option<&'a str>, Option<&'a str>), CliError> {
    let (min, max) = raw.split_once("..").ok_or_else(|| CliError::invalid(what, raw))?;
    let side = |s: &'a str| Some(s.trim()).filter(|s| !s.is_empty());
    Ok((side(min), side(max)))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, CliError> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(at);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CliError::invalid("date", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  sort  name ").unwrap(), Some(Command::Sort("name".into())));
        assert_eq!(
            Command::parse("filter severity critical, info").unwrap(),
            Some(Command::Filter {
                field: "severity".into(),
                value: "critical, info".into()
            })
        );
        assert_eq!(
            Command::parse("options owner").unwrap(),
            Some(Command::Options {
                field: "owner".into(),
                query: String::new()
            })
        );
        assert_eq!(Command::parse("page 3").unwrap(), Some(Command::Page(3)));
        assert_eq!(Command::parse("# comment").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("dance"), Err(CliError::UnknownCommand(_))));
        assert!(matches!(Command::parse("sort"), Err(CliError::Usage(_))));
        assert!(matches!(Command::parse("page two"), Err(CliError::InvalidValue { .. })));
    }

    #[test]
    fn test_parse_choice_values() {
        assert_eq!(
            parse_filter_value(FilterKind::MultiChoice, "critical, info,").unwrap(),
            FilterValue::choices(["critical", "info"])
        );
        assert_eq!(
            parse_filter_value(FilterKind::SingleChoice, "").unwrap(),
            FilterValue::Choice(None)
        );
    }

    #[test]
    fn test_parse_ranges() {
        assert_eq!(
            parse_filter_value(FilterKind::Range, "2..").unwrap(),
            FilterValue::range(Some(2.0), None)
        );
        assert!(parse_filter_value(FilterKind::Range, "2").is_err());
        assert!(parse_filter_value(FilterKind::Range, "a..b").is_err());

        let value = parse_filter_value(FilterKind::DateRange, "2024-01-01T10:30..2024-01-02").unwrap();
        let FilterValue::DateRange { start, end } = value else {
            panic!("expected a date range");
        };
        assert_eq!(start.unwrap().to_string(), "2024-01-01 10:30:00");
        assert_eq!(end.unwrap().to_string(), "2024-01-02 00:00:00");
    }
}
