//! Frame stack for the pushdown extension.
//!
//! A push state suspends the active frame and opens a fresh one; the matching
//! pop state discards the fresh frame and resumes the suspended one at the
//! push state's resume target. The active frame is never on the stack: with
//! nothing suspended it is the root frame.
//!
//! # Example
//!
//! ```rust
//! use cogwork::pushdown::FrameStack;
//!
//! let stack: FrameStack<&str, usize> = FrameStack::new(0);
//! assert!(stack.is_empty());
//! assert_eq!(stack.depth(), 0);
//! assert!(stack.top().is_none());
//! ```

use serde::Serialize;

/// One execution context. `data` is the caller's per-frame record.
#[derive(Clone, Debug)]
pub struct Frame<S, F> {
    pub data: F,
    suspension: Option<Resumption<S>>,
}

impl<S, F> Frame<S, F> {
    pub fn new(data: F) -> Self {
        Self {
            data,
            suspension: None,
        }
    }

    /// Push state that suspended this frame, while it is suspended.
    pub fn pushed_by(&self) -> Option<&S> {
        self.suspension.as_ref().map(|s| &s.pushed_by)
    }

    /// State the run resumes at when this frame is restored.
    pub fn resume(&self) -> Option<&S> {
        self.suspension.as_ref().map(|s| &s.resume)
    }
}

/// Restored frame information handed back by [`FrameStack::restore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resumption<S> {
    pub pushed_by: S,
    pub resume: S,
}

/// Last-in-first-out stack of suspended frames plus the active frame.
#[derive(Clone, Debug)]
pub struct FrameStack<S, F> {
    active: Frame<S, F>,
    suspended: Vec<Frame<S, F>>,
}

impl<S: Clone, F> FrameStack<S, F> {
    pub fn new(root: F) -> Self {
        Self {
            active: Frame::new(root),
            suspended: Vec::new(),
        }
    }

    pub fn active(&self) -> &Frame<S, F> {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut Frame<S, F> {
        &mut self.active
    }

    /// Most recently suspended frame.
    pub fn top(&self) -> Option<&Frame<S, F>> {
        self.suspended.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame<S, F>> {
        self.suspended.last_mut()
    }

    /// Suspended frames, oldest first.
    pub fn suspended(&self) -> &[Frame<S, F>] {
        &self.suspended
    }

    pub fn depth(&self) -> usize {
        self.suspended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suspended.is_empty()
    }

    /// Suspend the active frame on behalf of `pushed_by` and make `fresh`
    /// the active frame.
    pub(crate) fn suspend(&mut self, pushed_by: S, resume: S, fresh: F) {
        let mut frame = std::mem::replace(&mut self.active, Frame::new(fresh));
        frame.suspension = Some(Resumption { pushed_by, resume });
        self.suspended.push(frame);
    }

    /// Discard the active frame and restore the most recently suspended one.
    /// Returns `None` when nothing is suspended; the stack is left untouched.
    pub(crate) fn restore(&mut self) -> Option<Resumption<S>> {
        let mut frame = self.suspended.pop()?;
        let resumption = frame.suspension.take();
        self.active = frame;
        resumption
    }

    pub(crate) fn reset(&mut self, root: F) {
        self.suspended.clear();
        self.active = Frame::new(root);
    }
}
