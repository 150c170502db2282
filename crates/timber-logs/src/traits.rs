//! The sink abstraction targeted by the router.

use crate::error::Result;
use crate::types::LogRecord;

/// A durable destination for formatted log lines.
///
/// Implementations serialize their own writes internally; the router calls
/// sinks from whatever thread the log call arrived on.
pub trait Sink: Send + Sync {
    /// Appends one record to the sink.
    ///
    /// Implementations report success without writing when the sink is
    /// silent or the record falls below the sink's minimum level.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be durably written.
    fn write(&self, record: &LogRecord) -> Result<()>;

    /// A short name identifying the sink in diagnostics.
    fn name(&self) -> &str;
}
