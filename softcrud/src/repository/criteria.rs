//! Field-equality predicates for store lookups
//!
//! Stores are only ever queried with sets of `field = value` conditions,
//! combined with AND. The manager builds these sets; it never issues
//! arbitrary queries.
//!
//! # Example
//!
//! ```rust
//! use softcrud::repository::FilterCondition;
//! use serde_json::json;
//!
//! let criteria = [
//!     FilterCondition::eq("id", 1_u64),
//!     FilterCondition::eq("deleted", false),
//! ];
//!
//! let record = json!({ "id": 1, "deleted": false, "title": "a" });
//! assert!(FilterCondition::all_match(&criteria, &record));
//! ```

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

/// A scalar value that a record field can be compared against
///
/// # Example
///
/// ```rust
/// use softcrud::repository::FilterValue;
///
/// let text: FilterValue = "draft".into();
/// let number: FilterValue = 42_u64.into();
/// let flag: FilterValue = false.into();
/// assert_eq!(flag, FilterValue::Boolean(false));
/// # let _ = (text, number);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String value
    String(String),
    /// Signed integer value
    Integer(i64),
    /// Unsigned integer value
    Unsigned(u64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Null value
    Null,
}

impl FilterValue {
    /// Compare against a JSON field value
    ///
    /// Numbers compare by value regardless of their signed/unsigned/float
    /// representation.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(expected), Value::String(actual)) => expected == actual,
            (Self::Boolean(expected), Value::Bool(actual)) => expected == actual,
            (Self::Null, Value::Null) => true,
            (Self::Integer(expected), Value::Number(actual)) => {
                actual.as_i64() == Some(*expected)
            }
            (Self::Unsigned(expected), Value::Number(actual)) => {
                actual.as_u64() == Some(*expected)
            }
            (Self::Float(expected), Value::Number(actual)) => {
                actual.as_f64() == Some(*expected)
            }
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{}'", s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Unsigned(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u64> for FilterValue {
    fn from(n: u64) -> Self {
        Self::Unsigned(n)
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        Self::Unsigned(u64::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Uuid> for FilterValue {
    fn from(id: Uuid) -> Self {
        Self::String(id.to_string())
    }
}

/// A single `field = value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// The field name to filter on
    pub field: String,
    /// The value the field must equal
    pub value: FilterValue,
}

impl FilterCondition {
    /// Create an equality filter (field = value)
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluate this condition against a serialized record
    ///
    /// A record lacking the field only matches a `Null` condition.
    pub fn matches(&self, record: &Value) -> bool {
        match record.get(&self.field) {
            Some(value) => self.value.matches(value),
            None => self.value == FilterValue::Null,
        }
    }

    /// Evaluate a whole predicate set (AND semantics)
    pub fn all_match(criteria: &[FilterCondition], record: &Value) -> bool {
        criteria.iter().all(|condition| condition.matches(record))
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}
