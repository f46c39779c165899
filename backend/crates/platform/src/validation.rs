//! Declarative field validation
//!
//! Each input type lists its rules as a static table of field name to
//! constraints, and exposes a key-value view of itself through
//! [`Validate::value`]. Evaluation walks the whole table and collects every
//! violation instead of stopping at the first one.

use std::fmt;

/// A single field constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Present and non-zero / non-blank
    Required,
    /// Integer `>= n`
    Min(i64),
    /// Integer `<= n`
    Max(i64),
    /// Integer within `[lo, hi]`
    Range(i64, i64),
    /// String of at most `n` characters
    MaxSize(usize),
}

/// Field value as seen by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i64),
    Str(&'a str),
    Missing,
}

impl<'a> From<Option<i64>> for Value<'a> {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Value::Missing, Value::Int)
    }
}

impl<'a> From<&'a Option<String>> for Value<'a> {
    fn from(v: &'a Option<String>) -> Self {
        v.as_deref().map_or(Value::Missing, Value::Str)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Str(v)
    }
}

/// Rule table entry
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

impl Rule {
    pub const fn new(field: &'static str, constraints: &'static [Constraint]) -> Self {
        Self { field, constraints }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// All violations found in one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![Violation {
            field,
            message: message.into(),
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Emit one log event per violated field
    pub fn log(&self) {
        for v in &self.0 {
            tracing::info!(field = v.field, message = %v.message, "Validation failed");
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

/// Check one value against one constraint
///
/// Only `Required` rejects a missing value; other constraints apply to
/// values that are present.
pub fn check(constraint: Constraint, value: Value<'_>) -> Option<String> {
    match (constraint, value) {
        (Constraint::Required, Value::Missing) => Some("can not be empty".into()),
        (Constraint::Required, Value::Int(0)) => Some("can not be empty".into()),
        (Constraint::Required, Value::Str(s)) if s.trim().is_empty() => {
            Some("can not be empty".into())
        }
        (Constraint::Required, _) => None,

        (_, Value::Missing) => None,

        (Constraint::Min(n), Value::Int(v)) if v < n => Some(format!("minimum is {n}")),
        (Constraint::Max(n), Value::Int(v)) if v > n => Some(format!("maximum is {n}")),
        (Constraint::Range(lo, hi), Value::Int(v)) if v < lo || v > hi => {
            Some(format!("range is {lo} to {hi}"))
        }
        (Constraint::MaxSize(n), Value::Str(s)) if s.chars().count() > n => {
            Some(format!("maximum size is {n}"))
        }
        (Constraint::Min(_) | Constraint::Max(_) | Constraint::Range(..), Value::Str(_)) => {
            Some("must be an integer".into())
        }
        (Constraint::MaxSize(_), Value::Int(_)) => Some("must be a string".into()),
        _ => None,
    }
}

/// Types validated through a rule table
pub trait Validate {
    const RULES: &'static [Rule];

    fn value(&self, field: &str) -> Value<'_>;

    fn validate(&self) -> Result<(), Violations> {
        let mut found = Vec::new();
        for rule in Self::RULES {
            let value = self.value(rule.field);
            for &constraint in rule.constraints {
                if let Some(message) = check(constraint, value) {
                    found.push(Violation {
                        field: rule.field,
                        message,
                    });
                }
            }
        }

        if found.is_empty() {
            Ok(())
        } else {
            let violations = Violations(found);
            violations.log();
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Constraint::*;

    struct Form {
        id: Option<i64>,
        name: Option<String>,
        state: Option<i64>,
    }

    impl Validate for Form {
        const RULES: &'static [Rule] = &[
            Rule::new("id", &[Required, Min(1)]),
            Rule::new("name", &[Required, MaxSize(5)]),
            Rule::new("state", &[Range(0, 1)]),
        ];

        fn value(&self, field: &str) -> Value<'_> {
            match field {
                "id" => self.id.into(),
                "name" => (&self.name).into(),
                "state" => self.state.into(),
                _ => Value::Missing,
            }
        }
    }

    #[test]
    fn test_valid_form() {
        let form = Form {
            id: Some(3),
            name: Some("rust".into()),
            state: None,
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_aggregates_all_violations() {
        let form = Form {
            id: Some(-1),
            name: Some("toolong".into()),
            state: Some(2),
        };
        let err = form.validate().unwrap_err();
        let fields: Vec<_> = err.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["id", "name", "state"]);
    }

    #[test]
    fn test_required_rejects_zero_blank_and_missing() {
        assert!(check(Required, Value::Int(0)).is_some());
        assert!(check(Required, Value::Str("   ")).is_some());
        assert!(check(Required, Value::Missing).is_some());
        assert!(check(Required, Value::Int(7)).is_none());
    }

    #[test]
    fn test_optional_fields_skip_bounds() {
        assert!(check(Min(1), Value::Missing).is_none());
        assert!(check(MaxSize(1), Value::Missing).is_none());
    }

    #[test]
    fn test_max_size_counts_chars() {
        assert!(check(MaxSize(2), Value::Str("日本")).is_none());
        assert!(check(MaxSize(2), Value::Str("日本語")).is_some());
    }

    #[test]
    fn test_display_joins_fields() {
        let form = Form {
            id: None,
            name: None,
            state: None,
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(
            err.to_string(),
            "id can not be empty; name can not be empty"
        );
    }
}
