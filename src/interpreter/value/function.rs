use std::{fmt, rc::Rc};

use crate::{ast::FunctionDef, error::RuntimeErrorKind, interpreter::scope::Context};

/// Name shown for functions defined without one.
pub const ANONYMOUS: &str = "<anonymous>";

/// A callable user-defined function.
///
/// Holds the shared parsed definition and a strong handle to the frame the
/// definition was evaluated in. Each call runs in a fresh child of that frame,
/// so the body sees the variables that were in scope where it was written.
pub struct Function {
    /// The parsed definition.
    pub def:      Rc<FunctionDef>,
    /// The frame the function was defined in.
    pub defining: Rc<Context>,
}

impl Function {
    /// Creates a function closing over `defining`.
    #[must_use]
    pub const fn new(def: Rc<FunctionDef>, defining: Rc<Context>) -> Self {
        Self { def, defining }
    }

    /// The function's name, or `<anonymous>`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name.as_deref().unwrap_or(ANONYMOUS)
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.def.params.len()
    }

    /// Checks that `found` arguments match the declared parameters.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::ArityMismatch`] if the counts differ.
    pub fn check_arity(&self, found: usize) -> Result<(), RuntimeErrorKind> {
        let expected = self.arity();
        if found == expected {
            Ok(())
        } else {
            Err(RuntimeErrorKind::ArityMismatch { function: self.name().to_string(),
                                                  expected,
                                                  found })
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name())
         .field("params", &self.def.params)
         .finish_non_exhaustive()
    }
}
