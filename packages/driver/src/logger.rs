//! Pluggable logging sink handed to a [`Driver`](crate::Driver) at construction.
//!
//! The driver only ever reports at debug level, and only while it sets up its
//! root directory. Callers that want those notices in their usual log output
//! can pass [`LogFacade`], which forwards everything to the `log` crate.

use std::fmt;
use std::sync::Arc;

/// A leveled notification sink.
pub trait Logger: Send + Sync {
    fn fatal(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
    fn trace(&self, args: fmt::Arguments<'_>);
}

/// Forwards every level to the `log` facade. `fatal` is reported as an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn fatal(&self, args: fmt::Arguments<'_>) {
        log::error!("{}", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        log::error!("{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        log::warn!("{}", args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        log::info!("{}", args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        log::debug!("{}", args);
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        log::trace!("{}", args);
    }
}

/// Construction options for a [`Driver`](crate::Driver).
#[derive(Clone, Default)]
pub struct Options {
    /// Receives the root directory notices. `None` suppresses them.
    pub logger: Option<Arc<dyn Logger>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("logger", &self.logger.as_ref().map(|_| "<logger>"))
            .finish()
    }
}
