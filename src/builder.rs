//! Expression and statement tags.

use crate::armor::{pin, Pinned};
use crate::proxy::{Dynamic, Node, Render};
use std::fmt;
use std::marker::PhantomData;

/// An armored `{{ path }}` that remembers the type of the value it prints.
pub struct Expr<T> {
    pinned: Pinned,
    value: PhantomData<fn() -> T>,
}

impl<T> Expr<T> {
    pub fn pinned(&self) -> &Pinned {
        &self.pinned
    }

    pub fn into_pinned(self) -> Pinned {
        self.pinned
    }
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Expr {
            pinned: self.pinned.clone(),
            value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&self.pinned.decode()).finish()
    }
}

impl<T> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pinned, f)
    }
}

impl<T> Render for Expr<T> {
    fn render(&self) -> String {
        self.pinned.render()
    }
}

impl<T> From<Expr<T>> for Pinned {
    fn from(expr: Expr<T>) -> Self {
        expr.pinned
    }
}

/// Shapes whose values the engine prints as text, so they may sit inside quotes.
pub trait Textual {}

impl Textual for String {}
impl Textual for Dynamic {}
impl<T: Textual> Textual for Option<T> {}

/// `{{ path }}`
pub fn expr<T>(node: &Node<T>) -> Expr<T> {
    Expr {
        pinned: pin(&format!("{{{{ {} }}}}", node)),
        value: PhantomData,
    }
}

/// `"{{ path }}"`, for string values inside a JSON literal.
pub fn quoted<T: Textual>(node: &Node<T>) -> Pinned {
    pin(&format!("\"{{{{ {} }}}}\"", node))
}

/// `{% statement %}`
///
/// Meant for `if <cond>`, `elif <cond>`, `else` and `endif`. The statement is
/// not checked against the engine's grammar.
pub fn block(statement: impl fmt::Display) -> Pinned {
    pin(&format!("{{% {} %}}", statement))
}
