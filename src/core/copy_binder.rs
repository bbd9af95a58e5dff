//! Copy affordance attached to every rendered code block.
//!
//! The binder remembers which blocks it has already wired up, so re-running it
//! after each new reply never doubles the action on older blocks. Labels flip
//! to a transient confirmation and revert on their own once the deadline
//! passes.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::core::constants::{
    COPIED_LABEL, COPIED_LABEL_DURATION, COPY_FAILED_LABEL, COPY_FAILED_LABEL_DURATION,
    COPY_LABEL,
};
use crate::core::transcript::{CodeBlockId, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feedback {
    Copied { until: Instant },
    Failed { until: Instant },
}

#[derive(Debug, Default)]
pub struct CopyBinder {
    bound: HashSet<CodeBlockId>,
    order: Vec<CodeBlockId>,
    feedback: HashMap<CodeBlockId, Feedback>,
}

impl CopyBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every code block not bound yet. Returns how many were new.
    pub fn bind_new(&mut self, transcript: &Transcript) -> usize {
        let mut added = 0;
        for id in transcript.code_block_ids() {
            if self.bound.insert(id) {
                self.order.push(id);
                added += 1;
            }
        }
        if added > 0 {
            tracing::debug!(added, total = self.order.len(), "bound copy actions");
        }
        added
    }

    pub fn is_bound(&self, id: CodeBlockId) -> bool {
        self.bound.contains(&id)
    }

    /// Bound blocks in display order.
    pub fn targets(&self) -> &[CodeBlockId] {
        &self.order
    }

    /// Resolve the text a press on `id` should copy.
    pub fn press(&self, id: CodeBlockId, transcript: &Transcript) -> Option<String> {
        if !self.is_bound(id) {
            return None;
        }
        transcript.code_block(id).map(|block| block.code.clone())
    }

    pub fn finish(&mut self, id: CodeBlockId, result: Result<(), String>, now: Instant) {
        let feedback = match result {
            Ok(()) => Feedback::Copied {
                until: now + COPIED_LABEL_DURATION,
            },
            Err(err) => {
                tracing::warn!(entry = id.entry.value(), index = id.index, "clipboard write failed: {err}");
                Feedback::Failed {
                    until: now + COPY_FAILED_LABEL_DURATION,
                }
            }
        };
        self.feedback.insert(id, feedback);
    }

    pub fn label(&self, id: CodeBlockId, now: Instant) -> &'static str {
        match self.feedback.get(&id) {
            Some(Feedback::Copied { until }) if now < *until => COPIED_LABEL,
            Some(Feedback::Failed { until }) if now < *until => COPY_FAILED_LABEL,
            _ => COPY_LABEL,
        }
    }

    /// Drop expired feedback. Returns true if any label changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.feedback.len();
        self.feedback.retain(|_, feedback| match feedback {
            Feedback::Copied { until } | Feedback::Failed { until } => now < *until,
        });
        before != self.feedback.len()
    }
}
