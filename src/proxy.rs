//! Path-capturing nodes.
//!
//! A [`Node<T>`] stands in for a value of type `T` without holding one. Every
//! access returns a fresh node whose path is one segment longer, and rendering
//! a node yields that path (`g.array[0].value`). `T` only steers which
//! accessors exist; at runtime all nodes are the same path accumulator.

use crate::path::Path;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

/// The text form of a builder value: a node's path, an armored fragment, a
/// rendered conditional chain.
pub trait Render {
    fn render(&self) -> String;
}

/// A typed path into the template context.
pub struct Node<T> {
    path: Path,
    shape: PhantomData<fn() -> T>,
}

/// A shape with no declared fields: any name or index may be accessed.
pub enum Dynamic {}

/// The engine's built-in `loop` variable, available inside a loop body.
pub enum LoopVars {}

/// A node for the root of a context of type `T`.
pub fn proxy<T>() -> Node<T> {
    Node::root(Path::new())
}

/// A node for the `loop` variable of the innermost enclosing loop.
pub fn loop_vars() -> Node<LoopVars> {
    Node::root(Path::from_segments(["loop"]))
}

impl<T> Node<T> {
    pub fn root(path: Path) -> Self {
        Node {
            path,
            shape: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Access a named member. The shape accessors generated by [`crate::shape!`] call this.
    pub fn member<U>(&self, name: impl Into<String>) -> Node<U> {
        Node::root(self.path.child(name))
    }

    /// Access an index. Negative and out-of-range indices are accepted as-is.
    pub fn element<U>(&self, index: i64) -> Node<U> {
        Node::root(self.path.child(index.to_string()))
    }

    /// The same path, viewed without a declared shape.
    pub fn untyped(&self) -> Node<Dynamic> {
        Node::root(self.path.clone())
    }
}

impl<E> Node<Vec<E>> {
    pub fn at(&self, index: i64) -> Node<E> {
        self.element(index)
    }
}

impl<V> Node<BTreeMap<String, V>> {
    pub fn key(&self, name: impl Into<String>) -> Node<V> {
        self.member(name)
    }
}

impl<V, S> Node<HashMap<String, V, S>> {
    pub fn key(&self, name: impl Into<String>) -> Node<V> {
        self.member(name)
    }
}

impl<T> Node<Option<T>> {
    /// The inner value. Adds no segment; the engine treats a missing value as undefined.
    pub fn some(&self) -> Node<T> {
        Node::root(self.path.clone())
    }
}

impl Node<Dynamic> {
    pub fn get(&self, name: impl Into<String>) -> Node<Dynamic> {
        self.member(name)
    }

    pub fn at(&self, index: i64) -> Node<Dynamic> {
        self.element(index)
    }
}

impl Node<LoopVars> {
    /// 1-based iteration counter.
    pub fn index(&self) -> Node<usize> {
        self.member("index")
    }

    pub fn index0(&self) -> Node<usize> {
        self.member("index0")
    }

    pub fn revindex(&self) -> Node<usize> {
        self.member("revindex")
    }

    pub fn revindex0(&self) -> Node<usize> {
        self.member("revindex0")
    }

    pub fn first(&self) -> Node<bool> {
        self.member("first")
    }

    pub fn last(&self) -> Node<bool> {
        self.member("last")
    }

    pub fn length(&self) -> Node<usize> {
        self.member("length")
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Node::root(self.path.clone())
    }
}

impl<T> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<T> Eq for Node<T> {}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(&self.path.segments()).finish()
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

impl<T> Render for Node<T> {
    fn render(&self) -> String {
        self.path.to_string()
    }
}

/// Declare the fields of a context type so its nodes get one accessor per field.
///
/// For `Order` this generates a trait `OrderShape` implemented on `Node<Order>`.
/// A field can map to a different context key with `field = "key": Type`.
///
/// ```
/// use jinpin::{proxy, shape};
///
/// pub struct Order { pub id: i64, pub lines: Vec<Line> }
/// pub struct Line { pub sku: String }
///
/// shape! {
///     pub Order { id: i64, lines: Vec<Line> }
///     pub Line { sku: String, kind = "type": String }
/// }
///
/// let order = proxy::<Order>();
/// assert_eq!(order.lines().at(2).sku().to_string(), "lines[2].sku");
/// assert_eq!(order.lines().at(0).kind().to_string(), "lines[0].type");
/// ```
#[macro_export]
macro_rules! shape {
    (@key $field:ident $key:literal) => {
        $key
    };
    (@key $field:ident) => {
        stringify!($field)
    };
    ($(
        $vis:vis $name:ident {
            $($field:ident $(= $key:literal)? : $ty:ty),* $(,)?
        }
    )*) => {
        $($crate::paste::paste! {
            $vis trait [<$name Shape>] {
                $(fn $field(&self) -> $crate::Node<$ty>;)*
            }

            impl [<$name Shape>] for $crate::Node<$name> {
                $(fn $field(&self) -> $crate::Node<$ty> {
                    self.member($crate::shape!(@key $field $($key)?))
                })*
            }
        })*
    };
}
