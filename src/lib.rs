//! Type-checked Jinja fragments that survive a foreign escaping pass.
//!
//! Build a [`Node`] for your context type with [`proxy`], turn its paths into
//! template syntax with the builders, embed the resulting armored fragments in
//! markup produced by any other renderer, then run that renderer's output
//! through [`unpin`] to recover the literal `{{ }}` / `{% %}` syntax.
//!
//! ```
//! use jinpin::{expr, proxy, shape, unpin, when};
//!
//! pub struct Page { pub title: String, pub status: String }
//!
//! shape! {
//!     pub Page { title: String, status: String }
//! }
//!
//! let page = proxy::<Page>();
//! let html = format!(
//!     "<h1>{}</h1>{}",
//!     expr(&page.title()),
//!     when(&page.status()).eq("draft", "Draft").otherwise("Live"),
//! );
//! assert_eq!(
//!     unpin(html),
//!     r#"<h1>{{ title }}</h1>{% if status == "draft" %}Draft{% else %}Live{% endif %}"#
//! );
//! ```

pub mod armor;
pub mod builder;
pub mod cond;
pub mod each;
pub mod error;
pub mod json;
pub mod path;
pub mod proxy;

#[doc(hidden)]
pub use paste;

pub use armor::{pin, try_unpin, unpin, Pinned};
pub use builder::{block, expr, quoted, Expr, Textual};
pub use cond::{when, Literal, Match, MatchEnd, Numeric};
pub use each::{for_each, Sequence};
pub use error::{ArmorError, JsonError};
pub use json::{to_json_literal, JsonObject, JsonValue};
pub use path::Path;
pub use proxy::{loop_vars, proxy, Dynamic, LoopVars, Node, Render};

/// Short names for use inside markup-heavy code.
pub mod short {
    pub use crate::armor::unpin as decode;
    pub use crate::builder::{block as b, expr as e, quoted as q};
    pub use crate::each::for_each as map;
    pub use crate::json::to_json_literal as json;
    pub use crate::proxy::proxy;
}
