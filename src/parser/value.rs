//! The value model for attribute values.
//!
//! Only literals and literal composites are resolved. Everything that needs
//! evaluation (references, function calls, interpolated templates, conditionals,
//! `for` expressions, operators) becomes [`Value::Unresolved`].

use hcl_edit::expr::{Expression, Object, ObjectKey, UnaryOperator};
use hcl_edit::template::Element;
use std::collections::BTreeMap;
use std::fmt;

/// A resolved attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// An expression that is not evaluated. Checks must treat this as "cannot
    /// determine", never as empty, false or zero.
    Unresolved,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// True when this value and everything nested inside it is resolved.
    pub fn is_fully_resolved(&self) -> bool {
        match self {
            Self::Unresolved => false,
            Self::List(items) => items.iter().all(Value::is_fully_resolved),
            Self::Map(map) => map.values().all(Value::is_fully_resolved),
            _ => true,
        }
    }

    /// Name of the variant, used in type mismatch reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Unresolved => "unresolved expression",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", key, value)?;
                }
                write!(f, "}}")
            }
            Self::Unresolved => write!(f, "<unresolved>"),
        }
    }
}

/// Resolve an HCL expression into a [`Value`]. Never fails.
pub fn resolve(expr: &Expression) -> Value {
    match expr {
        Expression::String(s) => Value::String(s.value().to_string()),
        Expression::Bool(b) => Value::Bool(*b.value()),
        Expression::Number(n) => n
            .value()
            .as_f64()
            .map(Value::Number)
            .unwrap_or(Value::Unresolved),
        Expression::Array(array) => Value::List(array.iter().map(resolve).collect()),
        Expression::Object(object) => resolve_object(object),
        Expression::Parenthesis(parens) => resolve(parens.inner()),
        // Templates without interpolations or directives are plain strings
        Expression::StringTemplate(template) => literal_text(template.iter())
            .map(Value::String)
            .unwrap_or(Value::Unresolved),
        Expression::HeredocTemplate(heredoc) => literal_text(heredoc.template.iter())
            .map(Value::String)
            .unwrap_or(Value::Unresolved),
        Expression::UnaryOp(op) => match (op.operator.value(), resolve(&op.expr)) {
            (UnaryOperator::Neg, Value::Number(n)) => Value::Number(-n),
            (UnaryOperator::Not, Value::Bool(b)) => Value::Bool(!b),
            _ => Value::Unresolved,
        },
        _ => Value::Unresolved,
    }
}

fn resolve_object(object: &Object) -> Value {
    let mut map = BTreeMap::new();
    for (key, value) in object.iter() {
        let key = match key {
            ObjectKey::Ident(ident) => ident.as_str().to_string(),
            ObjectKey::Expression(expr) => match resolve(expr) {
                Value::String(s) => s,
                // A computed key makes the whole map unknowable
                _ => return Value::Unresolved,
            },
        };
        map.insert(key, resolve(value.expr()));
    }
    Value::Map(map)
}

fn literal_text<'a>(elements: impl Iterator<Item = &'a Element>) -> Option<String> {
    let mut text = String::new();
    for element in elements {
        match element {
            Element::Literal(literal) => text.push_str(literal.value()),
            _ => return None,
        }
    }
    Some(text)
}
