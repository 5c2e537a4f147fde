use regex::Regex;
use std::sync::OnceLock;

/// Pulls table/column/value triples out of PostgreSQL constraint violations.
///
/// PostgreSQL names implicit constraints `<table>_<column>_key` (unique) and
/// `<table>_<column>_check` for checks declared that way; the `DETAIL` line
/// carries `Key (column)=(value)`.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column: Regex,
    table: Regex,
    constraint: Regex,
}

impl Patterns {
    fn compile() -> Option<Self> {
        Some(Self {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok()?,
            column: Regex::new(r#"column "([^"]+)""#).ok()?,
            table: Regex::new(r#"(?:table|relation) "([^"]+)""#).ok()?,
            constraint: Regex::new(r#"constraint "([^"]+)""#).ok()?,
        })
    }
}

static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();

fn patterns() -> Option<&'static Patterns> {
    PATTERNS.get_or_init(Patterns::compile).as_ref()
}

/// Suffixes PostgreSQL appends to generated constraint names.
const CONSTRAINT_SUFFIXES: [&str; 4] = ["_key", "_check", "_not_null", "_pkey"];

impl ConstraintParser {
    /// Returns `(entity, field, value)` for a unique violation.
    ///
    /// `detail` is the `DETAIL` part of the server message when the driver
    /// keeps it separate from the primary message.
    pub fn parse_unique_violation(
        message: &str,
        detail: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = detail
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));

        match (constraint_name.and_then(Self::split_constraint_name), key_value) {
            (Some((entity, field)), Some((_, value))) => Some((entity, field, value)),
            (Some((entity, field)), None) => Some((entity, field, "duplicate_value".to_string())),
            (None, Some((field, value))) => {
                let entity = Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
                Some((entity, field, value))
            }
            (None, None) => None,
        }
    }

    /// Returns `(entity, field)` for a not-null violation.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = patterns()?.column.captures(message)?.get(1)?.as_str().to_string();
        let entity = Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Returns `(entity, field)` for a check violation, read from the
    /// constraint name.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        constraint_name
            .and_then(Self::split_constraint_name)
            .or_else(|| {
                let name = patterns()?.constraint.captures(message)?.get(1)?.as_str();
                Self::split_constraint_name(name)
            })
    }

    /// Splits `users_email_key` into `("users", "email")`.
    ///
    /// Table names containing underscores are ambiguous; the first segment is
    /// taken as the table.
    fn split_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    fn extract_key_value(text: &str) -> Option<(String, String)> {
        let caps = patterns()?.key_value.captures(text)?;
        Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
    }

    fn extract_table(text: &str) -> Option<String> {
        let caps = patterns()?.table.captures(text)?;
        Some(caps.get(1)?.as_str().to_string())
    }
}
