//! Shared HTTP adapter state.
//!
//! Handlers receive the workspace behind one `RwLock`: every mutation runs
//! to completion under the write lock, so operations never interleave.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::insights::InsightService;
use crate::domain::workspace::Workspace;
use crate::domain::{ApiResult, Error};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    workspace: Arc<RwLock<Workspace>>,
    insights: Arc<InsightService>,
}

impl HttpState {
    pub fn new(workspace: Workspace, insights: Arc<InsightService>) -> Self {
        Self {
            workspace: Arc::new(RwLock::new(workspace)),
            insights,
        }
    }

    /// Acquire the workspace for reading.
    ///
    /// A poisoned lock means a previous mutation panicked mid-flight; it is
    /// surfaced as an internal error rather than unwrapped.
    pub fn workspace(&self) -> ApiResult<RwLockReadGuard<'_, Workspace>> {
        self.workspace
            .read()
            .map_err(|_| Error::internal("workspace lock poisoned"))
    }

    /// Acquire the workspace for a mutation.
    pub fn workspace_mut(&self) -> ApiResult<RwLockWriteGuard<'_, Workspace>> {
        self.workspace
            .write()
            .map_err(|_| Error::internal("workspace lock poisoned"))
    }

    pub fn insights(&self) -> &InsightService {
        &self.insights
    }
}
