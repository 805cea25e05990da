use alloc::{vec, vec::Vec};

/// Grammar context a value is being read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    Root,
    Array,
    Object,
    /// A property name and its colon were read; the value comes next.
    Property,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scope {
    pub(crate) kind: ScopeKind,
    /// Values (or properties, for objects) already started in this scope.
    pub(crate) value_count: usize,
}

/// Stack of open scopes. The root scope sits at the bottom for the lifetime
/// of the stack and is never popped.
#[derive(Debug, Clone)]
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Root,
                value_count: 0,
            }],
        }
    }

    pub(crate) fn push(&mut self, kind: ScopeKind) {
        debug_assert!(
            kind != ScopeKind::Root,
            "only the stack itself creates the root scope"
        );
        debug_assert!(
            kind != ScopeKind::Property || self.peek().kind == ScopeKind::Object,
            "property scopes live directly inside objects"
        );
        self.scopes.push(Scope {
            kind,
            value_count: 0,
        });
    }

    /// Pops the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics when asked to pop the root scope; the tokenizer never does so
    /// for any input.
    pub(crate) fn pop(&mut self) -> Scope {
        assert!(self.scopes.len() > 1, "attempted to pop the root scope");
        self.scopes.pop().unwrap_or_else(|| unreachable!())
    }

    pub(crate) fn peek(&self) -> Scope {
        self.scopes[self.scopes.len() - 1]
    }

    pub(crate) fn peek_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Number of scopes above the root.
    pub(crate) fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Number of open arrays and objects.
    pub(crate) fn container_depth(&self) -> usize {
        self.scopes
            .iter()
            .filter(|s| matches!(s.kind, ScopeKind::Array | ScopeKind::Object))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_always_present() {
        let mut stack = ScopeStack::new();
        assert_eq!(stack.peek().kind, ScopeKind::Root);
        assert_eq!(stack.depth(), 0);

        stack.push(ScopeKind::Object);
        stack.push(ScopeKind::Property);
        stack.peek_mut().value_count += 1;
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.container_depth(), 1);
        assert_eq!(stack.pop().value_count, 1);
        assert_eq!(stack.pop().kind, ScopeKind::Object);
        assert_eq!(stack.peek().kind, ScopeKind::Root);
    }

    #[test]
    #[should_panic(expected = "root scope")]
    fn popping_root_panics() {
        let mut stack = ScopeStack::new();
        stack.pop();
    }
}
