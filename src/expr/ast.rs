use std::fmt;

use crate::value::Value;

/// Leaf predicate of a key-condition or filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals { key: String, value: Value },
    BeginsWith { key: String, value: Value },
    GreaterThan { key: String, value: Value },
    LessThan { key: String, value: Value },
}

impl Condition {
    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn begins_with(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::BeginsWith {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn greater_than(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::GreaterThan {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn less_than(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::LessThan {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Condition::Equals { key, .. }
            | Condition::BeginsWith { key, .. }
            | Condition::GreaterThan { key, .. }
            | Condition::LessThan { key, .. } => key,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Condition::Equals { value, .. }
            | Condition::BeginsWith { value, .. }
            | Condition::GreaterThan { value, .. }
            | Condition::LessThan { value, .. } => value,
        }
    }

    /// Placeholder token bound to this condition's value at `index`.
    ///
    /// The key and index are concatenated, so a key ending in a digit can
    /// collide with another key at a different index (`a1` at 1 and `a` at 11
    /// both give `:a11`).
    pub fn binding_key(&self, index: usize) -> String {
        format!(":{}{}", self.key(), index)
    }

    /// Expression fragment referencing the placeholder at `index`.
    pub fn render(&self, index: usize) -> String {
        let key = self.key();
        let placeholder = self.binding_key(index);
        match self {
            Condition::Equals { .. } => format!("{key} = {placeholder}"),
            Condition::BeginsWith { .. } => format!("begins_with ({key}, {placeholder})"),
            Condition::GreaterThan { .. } => format!("{key} > {placeholder}"),
            Condition::LessThan { .. } => format!("{key} < {placeholder}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connective {
    #[default]
    And,
    Or,
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => write!(f, "And"),
            Connective::Or => write!(f, "Or"),
        }
    }
}

/// Key conditions for a query, optionally against a secondary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyExpression {
    pub index_name: Option<String>,
    pub conditions: Vec<Condition>,
}

impl KeyExpression {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self {
            index_name: None,
            conditions,
        }
    }

    pub fn on_index(index_name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            index_name: Some(index_name.into()),
            conditions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub connective: Option<Connective>,
    pub condition: Condition,
}

impl Filter {
    pub fn new(condition: Condition) -> Self {
        Self {
            connective: None,
            condition,
        }
    }

    pub fn and(condition: Condition) -> Self {
        Self {
            connective: Some(Connective::And),
            condition,
        }
    }

    pub fn or(condition: Condition) -> Self {
        Self {
            connective: Some(Connective::Or),
            condition,
        }
    }
}

/// Filters rendered together; joined to earlier groups by `connective`
/// (`And` when unset).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGroup {
    pub connective: Option<Connective>,
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self {
            connective: None,
            filters,
        }
    }

    pub fn with_connective(connective: Connective, filters: Vec<Filter>) -> Self {
        Self {
            connective: Some(connective),
            filters,
        }
    }
}
