//! Textual rendering of element sequences.
//!
//! Renders as `{ e0 e1 ... }`, with `{ }` for an empty sequence. This is a
//! presentation layer over a read-only slice; it never touches capacity.

use std::fmt;

/// `Display` adapter rendering a slice as `{ e0 e1 ... }`.
#[derive(Clone, Copy, Debug)]
pub struct Rendered<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for item in self.0 {
            write!(f, "{item} ")?;
        }
        f.write_str("}")
    }
}

/// Render `items` as `{ e0 e1 ... }`.
pub fn render<T: fmt::Display>(items: &[T]) -> String {
    Rendered(items).to_string()
}
