//! Module proxies bound to one module identifier.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::router::Router;

/// A lightweight logging handle bound to one module identifier.
///
/// Proxies are cheap and side-effect-free to create; clone, share, or
/// discard them per call site. Every call forwards to the shared
/// [`Router`] with the bound identifier attached.
///
/// The named methods cover the built-in four-level set; callers with a
/// custom level set use [`log`](Self::log) with the configured level name.
#[derive(Clone)]
pub struct ModuleLogger {
    router: Arc<Router>,
    module_id: String,
}

impl ModuleLogger {
    /// Creates a proxy bound to `module_id`.
    #[must_use]
    pub fn new(router: Arc<Router>, module_id: impl Into<String>) -> Self {
        Self {
            router,
            module_id: module_id.into(),
        }
    }

    /// The bound module identifier.
    #[must_use]
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Logs at an arbitrary configured level.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown level name or a sink failure; a
    /// filtered-out call is a success.
    pub fn log(&self, level: &str, message: &str) -> Result<()> {
        self.router.log(level, &self.module_id, message, None)
    }

    /// Logs at an arbitrary configured level with a structured payload.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown level name or a sink failure.
    pub fn log_with(&self, level: &str, message: &str, meta: Value) -> Result<()> {
        self.router.log(level, &self.module_id, message, Some(meta))
    }

    /// Logs at `debug`.
    ///
    /// # Errors
    ///
    /// Returns an error for a sink failure, or when `debug` is not in the
    /// configured level set.
    pub fn debug(&self, message: &str) -> Result<()> {
        self.log("debug", message)
    }

    /// Logs at `info`.
    ///
    /// # Errors
    ///
    /// See [`debug`](Self::debug).
    pub fn info(&self, message: &str) -> Result<()> {
        self.log("info", message)
    }

    /// Logs at `warn`.
    ///
    /// # Errors
    ///
    /// See [`debug`](Self::debug).
    pub fn warn(&self, message: &str) -> Result<()> {
        self.log("warn", message)
    }

    /// Logs at `error`.
    ///
    /// # Errors
    ///
    /// See [`debug`](Self::debug).
    pub fn error(&self, message: &str) -> Result<()> {
        self.log("error", message)
    }
}
