//! The engine-owned view handed to activities, guards, tests and hooks.

use crate::pushdown::{Frame, FrameStack};

/// Where the run currently is: the active state name and the frame stack.
///
/// Callbacks may read everything and may mutate per-frame data, but only the
/// engine moves the current state or pushes and pops frames.
#[derive(Clone, Debug)]
pub struct Scope<S, F> {
    current: S,
    frames: FrameStack<S, F>,
}

impl<S: Clone, F> Scope<S, F> {
    /// Scope positioned at `current` with `root` as the root frame's data.
    pub fn new(current: S, root: F) -> Self {
        Self {
            current,
            frames: FrameStack::new(root),
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn frames(&self) -> &FrameStack<S, F> {
        &self.frames
    }

    /// Number of suspended frames.
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    pub fn stack_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn active_frame(&self) -> &Frame<S, F> {
        self.frames.active()
    }

    pub fn active_frame_mut(&mut self) -> &mut Frame<S, F> {
        self.frames.active_mut()
    }

    /// Most recently suspended frame, `None` at the root.
    pub fn top_frame(&self) -> Option<&Frame<S, F>> {
        self.frames.top()
    }

    pub fn top_frame_mut(&mut self) -> Option<&mut Frame<S, F>> {
        self.frames.top_mut()
    }

    /// Engine-level part of an acceptance test: no frame may remain
    /// suspended. Grammars combine this with their own end-of-input check.
    pub fn accept_test(&self) -> bool {
        self.stack_empty()
    }

    pub(crate) fn set_current(&mut self, state: S) {
        self.current = state;
    }

    pub(crate) fn frames_mut(&mut self) -> &mut FrameStack<S, F> {
        &mut self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scope_is_at_root() {
        let scope: Scope<&str, u8> = Scope::new("scan", 3);
        assert_eq!(scope.current(), &"scan");
        assert!(scope.stack_empty());
        assert!(scope.accept_test());
        assert!(scope.top_frame().is_none());
        assert_eq!(scope.active_frame().data, 3);
    }

    #[test]
    fn accept_test_fails_with_suspended_frames() {
        let mut scope: Scope<&str, u8> = Scope::new("scan", 0);
        scope.frames_mut().suspend("(", "scan", 1);

        assert_eq!(scope.depth(), 1);
        assert!(!scope.accept_test());
        assert_eq!(scope.top_frame().unwrap().pushed_by(), Some(&"("));
    }

    #[test]
    fn frame_data_is_mutable_through_scope() {
        let mut scope: Scope<&str, Vec<u8>> = Scope::new("a", Vec::new());
        scope.active_frame_mut().data.push(1);
        scope.frames_mut().suspend("p", "a", Vec::new());
        scope.top_frame_mut().unwrap().data.push(2);

        assert_eq!(scope.top_frame().unwrap().data, vec![1, 2]);
        assert!(scope.active_frame().data.is_empty());
    }
}
