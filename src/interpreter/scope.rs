use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use crate::{interpreter::value::core::Value, span::Span};

/// Display name of the root frame.
pub const PROGRAM_NAME: &str = "<program>";

/// A name → value mapping: the symbol table of one [`Context`].
///
/// Keys are unique and the last write wins. A scope never reaches into its
/// parent on writes; lookups through the parent chain are done by
/// [`Context::lookup`].
#[derive(Default)]
pub struct Scope {
    symbols: RefCell<HashMap<String, Value>>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value bound to `name` in this scope only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.symbols.borrow().get(name).cloned()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&self, name: &str, value: Value) {
        self.symbols.borrow_mut().insert(name.to_string(), value);
    }

    /// The names bound in this scope, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.symbols.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

/// One evaluation frame.
///
/// There is one root context per session (`<program>`) and one child context
/// per function invocation. A function's frame is a child of the context the
/// function was *defined* in, not the one it was called from, which gives the
/// language lexical scoping and lets closures outlive the call that created
/// them.
///
/// A context exclusively owns its [`Scope`]. Children hold a strong handle to
/// their parent and only ever read through it.
///
/// Every frame descended from one root shares a single evaluation depth
/// counter, so recursion through closures is bounded like any other.
pub struct Context {
    /// Name shown in tracebacks (`<program>` or the function name).
    pub display_name:      String,
    /// The enclosing frame, absent for the root.
    pub parent:            Option<Rc<Self>>,
    /// Where in the parent's code this frame was entered.
    pub call_site:         Option<Span>,
    /// Expressions currently being evaluated across the whole session.
    pub(crate) eval_depth: Rc<Cell<usize>>,
    scope:                 Scope,
}

impl Context {
    /// Creates a root frame with an empty scope.
    ///
    /// # Example
    /// ```
    /// use scenev::interpreter::scope::Context;
    ///
    /// let root = Context::root("<program>");
    /// assert!(root.parent.is_none());
    /// assert!(root.lookup("x").is_none());
    /// ```
    #[must_use]
    pub fn root(display_name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { display_name: display_name.into(),
                       parent:       None,
                       call_site:    None,
                       eval_depth:   Rc::new(Cell::new(0)),
                       scope:        Scope::new(), })
    }

    /// Creates a frame nested in `parent`, entered from `call_site`.
    #[must_use]
    pub fn child(parent: &Rc<Self>, display_name: impl Into<String>, call_site: Span) -> Rc<Self> {
        Rc::new(Self { display_name: display_name.into(),
                       parent:       Some(Rc::clone(parent)),
                       call_site:    Some(call_site),
                       eval_depth:   Rc::clone(&parent.eval_depth),
                       scope:        Scope::new(), })
    }

    /// Resolves `name`, walking from this frame's scope up through its
    /// parents. Returns `None` if no frame binds it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.scope.get(name) {
                return Some(value);
            }
            frame = frame.parent.as_deref()?;
        }
    }

    /// Binds `name` in this frame's own scope, shadowing any binding in a
    /// parent frame.
    pub fn define(&self, name: &str, value: Value) {
        self.scope.set(name, value);
    }

    /// Number of frames above this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.parent.as_deref();
        while let Some(f) = frame {
            depth += 1;
            frame = f.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
         .field("display_name", &self.display_name)
         .field("depth", &self.depth())
         .field("symbols", &self.scope.names())
         .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::core::Value;

    #[test]
    fn child_reads_parent_but_writes_locally() {
        let root = Context::root(PROGRAM_NAME);
        root.define("x", Value::int(1, Span::synthetic("1")));

        let child = Context::child(&root, "f", Span::synthetic("f()"));
        assert_eq!(child.lookup("x").unwrap().to_string(), "1");

        child.define("x", Value::int(2, Span::synthetic("2")));
        assert_eq!(child.lookup("x").unwrap().to_string(), "2");
        assert_eq!(root.lookup("x").unwrap().to_string(), "1");
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn last_write_wins() {
        let scope = Scope::new();
        scope.set("a", Value::int(1, Span::synthetic("1")));
        scope.set("a", Value::int(5, Span::synthetic("5")));
        assert_eq!(scope.get("a").unwrap().to_string(), "5");
        assert_eq!(scope.names(), vec!["a".to_string()]);
        assert!(scope.get("b").is_none());
    }

    #[test]
    fn frames_share_the_depth_counter() {
        let root = Context::root(PROGRAM_NAME);
        let child = Context::child(&root, "f", Span::synthetic("f()"));
        let grandchild = Context::child(&child, "g", Span::synthetic("g()"));
        grandchild.eval_depth.set(3);
        assert_eq!(root.eval_depth.get(), 3);
        assert_eq!(Context::root(PROGRAM_NAME).eval_depth.get(), 0);
    }
}
