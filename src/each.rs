use crate::armor::{pin, Pinned};
use crate::path::Path;
use crate::proxy::{loop_vars, Dynamic, Node};

/// Shapes a loop can iterate, and the shape of one item.
pub trait Sequence {
    type Item;
}

impl<E> Sequence for Vec<E> {
    type Item = E;
}

impl Sequence for Dynamic {
    type Item = Dynamic;
}

impl<S: Sequence> Sequence for Option<S> {
    type Item = S::Item;
}

/// Build `{% for binding in array %}`, the loop body and `{% endfor %}`.
///
/// `callback` receives a node for the loop item (rooted at `binding`) and one
/// for `loop.index0`. The three parts are returned separately so the caller
/// can nest the body inside its own markup; concatenated in order they form
/// the complete loop.
pub fn for_each<S, B, F>(array: &Node<S>, binding: &str, callback: F) -> (Pinned, B, Pinned)
where
    S: Sequence,
    F: FnOnce(Node<S::Item>, Node<usize>) -> B,
{
    let open = pin(&format!("{{% for {} in {} %}}", binding, array));
    let item = Node::root(Path::from_segments([binding]));
    let body = callback(item, loop_vars().index0());
    (open, body, pin("{% endfor %}"))
}
