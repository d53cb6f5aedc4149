//! Single-pending-frame render scheduling
//!
//! At most one render is pending at any time: a newer request replaces the
//! pending one wholesale, and a render that has started always runs to
//! completion. Inputs travel as immutable snapshots, so a replaced request
//! is simply dropped.

use std::sync::Arc;

use scattermap_core::{Domain, Result, Surface, Viewport};
use tracing::debug;

use crate::field::Field;
use crate::params::{RenderMode, RenderParams};
use crate::render::{render, FrameBudget, RenderStats};

/// Everything one render needs, captured at schedule time.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub field: Arc<Field>,
    pub params: RenderParams,
    pub domain: Domain,
    pub viewport: Viewport,
    pub mode: RenderMode,
}

/// Holds at most one pending render request; the latest wins.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<RenderRequest>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a render. Returns `true` when an earlier pending request
    /// was discarded in favor of this one.
    pub fn request(&mut self, request: RenderRequest) -> bool {
        let replaced = self.pending.is_some();
        if replaced {
            debug!("pending render request replaced by newer inputs");
        }
        self.pending = Some(request);
        replaced
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Remove and return the pending request without executing it.
    pub fn take_pending(&mut self) -> Option<RenderRequest> {
        self.pending.take()
    }

    /// Execute the pending request, if any, to completion.
    ///
    /// Returns `None` when nothing was pending. Once execution starts it is
    /// not interruptible; only not-yet-started requests can be displaced.
    pub fn run_pending<S: Surface>(
        &mut self,
        budget: Option<&FrameBudget>,
        surface: &mut S,
    ) -> Option<Result<RenderStats>> {
        let request = self.pending.take()?;
        Some(render(
            &request.field,
            &request.params,
            &request.domain,
            &request.viewport,
            request.mode,
            budget,
            surface,
        ))
    }
}
