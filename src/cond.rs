//! Multi-branch conditionals.
//!
//! [`when`] starts a chain of comparisons against one node. The first branch
//! renders as `{% if ... %}`, later ones as `{% elif ... %}`, and
//! [`Match::otherwise`] closes the chain with `{% else %}`. A chain with at
//! least one branch ends with a single `{% endif %}`; an empty chain renders
//! as nothing.

use crate::armor::{pin, Pinned};
use crate::proxy::{Dynamic, Node, Render};
use std::fmt;

/// A value that can be compared against a node of type `T`.
pub trait Literal<T> {
    /// The value as it appears in a condition.
    fn to_literal(&self) -> String;
}

impl Literal<String> for &str {
    fn to_literal(&self) -> String {
        quote(self)
    }
}

impl Literal<String> for String {
    fn to_literal(&self) -> String {
        quote(self)
    }
}

impl Literal<String> for char {
    fn to_literal(&self) -> String {
        quote(&self.to_string())
    }
}

impl Literal<bool> for bool {
    fn to_literal(&self) -> String {
        self.to_string()
    }
}

impl Literal<Dynamic> for &str {
    fn to_literal(&self) -> String {
        quote(self)
    }
}

impl Literal<Dynamic> for String {
    fn to_literal(&self) -> String {
        quote(self)
    }
}

impl Literal<Dynamic> for bool {
    fn to_literal(&self) -> String {
        self.to_string()
    }
}

/// Numeric shapes; any number literal compares against any of them.
pub trait Numeric {}

macro_rules! number_literal {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {}

            impl<T: Numeric> Literal<T> for $t {
                fn to_literal(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

number_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Numeric for f32 {}
impl Numeric for f64 {}
impl Numeric for Dynamic {}

impl<T: Numeric> Literal<T> for f32 {
    fn to_literal(&self) -> String {
        format_f32(*self)
    }
}

impl<T: Numeric> Literal<T> for f64 {
    fn to_literal(&self) -> String {
        format_float(*self)
    }
}

/// Compare against another path in the context.
impl<T> Literal<T> for Node<T> {
    fn to_literal(&self) -> String {
        self.to_string()
    }
}

impl<T, L: Literal<T>> Literal<T> for Option<L> {
    fn to_literal(&self) -> String {
        match self {
            Some(value) => value.to_literal(),
            None => "none".to_string(),
        }
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Integral floats print without a fractional part.
pub(crate) fn format_float(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < (1u64 << 53) as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Like [`format_float`], without widening to `f64` first.
pub(crate) fn format_f32(n: f32) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < (1u32 << 24) as f32 {
        format!("{}", n as i32)
    } else {
        format!("{}", n)
    }
}

/// A conditional chain that can still take branches.
pub struct Match<T> {
    value: Node<T>,
    segments: Vec<String>,
}

/// A conditional chain closed by `else`.
pub struct MatchEnd {
    segments: Vec<String>,
}

/// Start a conditional chain on `value`.
pub fn when<T>(value: &Node<T>) -> Match<T> {
    Match {
        value: value.clone(),
        segments: Vec::new(),
    }
}

impl<T> Match<T> {
    fn keyword(&self) -> &'static str {
        if self.segments.is_empty() {
            "if"
        } else {
            "elif"
        }
    }

    fn push(mut self, condition: String, then: impl fmt::Display) -> Self {
        let tag = pin(&format!("{{% {} {} %}}", self.keyword(), condition));
        self.segments.push(tag.into_string());
        self.segments.push(then.to_string());
        self
    }

    fn compare(self, op: &str, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        let condition = format!("{} {} {}", self.value, op, expected.to_literal());
        self.push(condition, then)
    }

    pub fn eq(self, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        self.compare("==", expected, then)
    }

    pub fn ne(self, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        self.compare("!=", expected, then)
    }

    pub fn gt(self, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        self.compare(">", expected, then)
    }

    pub fn gte(self, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        self.compare(">=", expected, then)
    }

    pub fn lt(self, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        self.compare("<", expected, then)
    }

    pub fn lte(self, expected: impl Literal<T>, then: impl fmt::Display) -> Self {
        self.compare("<=", expected, then)
    }

    /// `min <= value <= max`, both bounds inclusive.
    pub fn between(
        self,
        min: impl Literal<T>,
        max: impl Literal<T>,
        then: impl fmt::Display,
    ) -> Self {
        let condition = format!(
            "{value} >= {} and {value} <= {}",
            min.to_literal(),
            max.to_literal(),
            value = self.value
        );
        self.push(condition, then)
    }

    /// Close the chain with an `else` branch.
    pub fn otherwise(mut self, then: impl fmt::Display) -> MatchEnd {
        self.segments.push(pin("{% else %}").into_string());
        self.segments.push(then.to_string());
        MatchEnd {
            segments: self.segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Armored tags and bodies in order, with the closing `endif`.
    pub fn segments(&self) -> Vec<String> {
        closed(&self.segments)
    }
}

impl MatchEnd {
    pub fn segments(&self) -> Vec<String> {
        closed(&self.segments)
    }
}

fn closed(segments: &[String]) -> Vec<String> {
    let mut all = segments.to_vec();
    if !all.is_empty() {
        all.push(endif().into_string());
    }
    all
}

fn endif() -> Pinned {
    pin("{% endif %}")
}

fn write_chain(f: &mut fmt::Formatter<'_>, segments: &[String]) -> fmt::Result {
    if segments.is_empty() {
        return Ok(());
    }
    for segment in segments {
        f.write_str(segment)?;
    }
    write!(f, "{}", endif())
}

impl<T> fmt::Display for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, &self.segments)
    }
}

impl fmt::Display for MatchEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, &self.segments)
    }
}

impl<T> Render for Match<T> {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for MatchEnd {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl<T> IntoIterator for Match<T> {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        closed(&self.segments).into_iter()
    }
}

impl IntoIterator for MatchEnd {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        closed(&self.segments).into_iter()
    }
}

impl<T> fmt::Debug for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("value", &self.value)
            .field("branches", &(self.segments.len() / 2))
            .finish()
    }
}

impl fmt::Debug for MatchEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchEnd")
            .field("branches", &(self.segments.len() / 2))
            .finish()
    }
}
