//! Single-line JSON literals with template expressions as values.
//!
//! Keys are written as JSON strings. Text values are written raw: they are
//! expected to be [`crate::expr`] / [`crate::quoted`] fragments that carry
//! their own quoting, so `{"id": expr(..)}` becomes `{"id":{{ id }}}`.
//!
//! The engine prints context values in its own style, so a bare `{{ flag }}`
//! for a boolean renders `True`/`False` and the result is not valid JSON.
//! Route such values through the engine's `tojson` filter in the context path
//! or pass a pre-rendered fragment instead.

use crate::armor::{pin, unpin, Pinned};
use crate::builder::Expr;
use crate::cond::{format_f32, format_float, Match, MatchEnd};
use crate::error::JsonError;
use crate::proxy::{Node, Render};
use std::fmt::Write;

/// A value in a JSON literal. There is no array variant.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// Emitted verbatim. Integers are stored here in their exact text form.
    Raw(String),
    Number(f64),
    Bool(bool),
    Object(JsonObject),
}

/// Object entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    entries: Vec<(String, JsonValue)>,
}

impl JsonObject {
    pub fn new() -> Self {
        JsonObject {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`JsonObject::insert`].
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append an entry. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl JsonValue {
    /// A raw value taken from any [`Render`] implementor.
    pub fn rendered(value: &impl Render) -> Self {
        JsonValue::Raw(value.render())
    }
}

impl Render for JsonObject {
    fn render(&self) -> String {
        let mut w = JsonWriter::new();
        w.write_object(self);
        w.buf
    }
}

struct JsonWriter {
    buf: String,
}

impl JsonWriter {
    fn new() -> Self {
        JsonWriter { buf: String::new() }
    }

    fn write_value(&mut self, value: &JsonValue) {
        match value {
            JsonValue::Raw(text) => self.buf.push_str(text),
            JsonValue::Number(n) => self.buf.push_str(&format_float(*n)),
            JsonValue::Bool(b) => self.buf.push_str(if *b { "true" } else { "false" }),
            JsonValue::Object(object) => self.write_object(object),
        }
    }

    fn write_object(&mut self, object: &JsonObject) {
        self.buf.push('{');
        let mut first = true;
        for (key, value) in &object.entries {
            self.entry_sep(&mut first);
            self.write_key(key);
            self.write_value(value);
        }
        self.buf.push('}');
    }

    fn entry_sep(&mut self, first: &mut bool) {
        if *first {
            *first = false;
        } else {
            self.buf.push(',');
        }
    }

    fn write_key(&mut self, key: &str) {
        self.write_string_value(key);
        self.buf.push(':');
    }

    fn write_string_value(&mut self, s: &str) {
        self.buf.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.buf.push_str("\\\""),
                '\\' => self.buf.push_str("\\\\"),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                '\u{0008}' => self.buf.push_str("\\b"),
                '\u{000C}' => self.buf.push_str("\\f"),
                c if c < '\u{0020}' => {
                    write!(&mut self.buf, "\\u{:04x}", c as u32).unwrap();
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }
}

/// Serialize `value` into one armored JSON literal.
///
/// Objects are written compactly, with entries in insertion order. Anything
/// else (a node, an expression, a conditional chain) is rendered through its
/// [`Render`] hook. Fragments nested in the literal are decoded before the
/// whole literal is armored as one unit, so a single [`unpin`] restores it.
pub fn to_json_literal(value: impl Into<JsonValue>) -> Pinned {
    let mut w = JsonWriter::new();
    w.write_value(&value.into());
    pin(&unpin(&w.buf))
}

impl From<JsonObject> for JsonValue {
    fn from(object: JsonObject) -> Self {
        JsonValue::Object(object)
    }
}

impl From<&str> for JsonValue {
    fn from(text: &str) -> Self {
        JsonValue::Raw(text.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(text: String) -> Self {
        JsonValue::Raw(text)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

macro_rules! integer_value {
    ($($t:ty),*) => {
        $(impl From<$t> for JsonValue {
            fn from(n: $t) -> Self {
                JsonValue::Raw(n.to_string())
            }
        })*
    };
}

integer_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f32> for JsonValue {
    fn from(n: f32) -> Self {
        JsonValue::Raw(format_f32(n))
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(n)
    }
}

impl From<Pinned> for JsonValue {
    fn from(pinned: Pinned) -> Self {
        JsonValue::Raw(pinned.into_string())
    }
}

impl<T> From<Expr<T>> for JsonValue {
    fn from(expr: Expr<T>) -> Self {
        JsonValue::Raw(expr.render())
    }
}

impl<T> From<Node<T>> for JsonValue {
    fn from(node: Node<T>) -> Self {
        JsonValue::Raw(node.render())
    }
}

impl<T> From<Match<T>> for JsonValue {
    fn from(chain: Match<T>) -> Self {
        JsonValue::Raw(chain.render())
    }
}

impl From<MatchEnd> for JsonValue {
    fn from(chain: MatchEnd) -> Self {
        JsonValue::Raw(chain.render())
    }
}

/// Nulls are skipped; arrays are rejected.
impl TryFrom<&serde_json::Value> for JsonObject {
    type Error = JsonError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(map) = value else {
            return Err(JsonError::NotAnObject);
        };

        let mut object = JsonObject::new();
        for (key, value) in map {
            let value = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::Bool(b) => JsonValue::Bool(*b),
                serde_json::Value::Number(n) => JsonValue::Raw(n.to_string()),
                serde_json::Value::String(s) => JsonValue::Raw(s.clone()),
                serde_json::Value::Array(_) => {
                    return Err(JsonError::UnsupportedArray { key: key.clone() });
                }
                serde_json::Value::Object(_) => JsonValue::Object(JsonObject::try_from(value)?),
            };
            object.insert(key.clone(), value);
        }
        Ok(object)
    }
}

impl TryFrom<serde_json::Value> for JsonObject {
    type Error = JsonError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        JsonObject::try_from(&value)
    }
}
