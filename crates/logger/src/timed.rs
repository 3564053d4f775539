//! Scoped operation timing

use crate::context::Context;
use crate::level::Level;
use crate::manager::Logger;
use crate::record::Record;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Category used for operation-start records
const START_CATEGORY: &str = "timed.start";

/// Category used for completion records
const STOP_CATEGORY: &str = "timed.stop";

/// Times an operation and reports its completion exactly once
///
/// Starting emits a Debug record immediately; [`stop`](Self::stop) emits an
/// Info record with the elapsed wall-clock time and returns it. The guard
/// stops itself on drop, so the completion record is emitted on every exit
/// path — explicit stop, early return, or panic unwind — and never twice.
pub struct TimedOperation {
    name: String,
    start: Instant,
    context: Context,
    logger: Arc<Logger>,
    stopped: bool,
}

impl TimedOperation {
    /// Begin timing with a fresh context
    pub fn start(logger: Arc<Logger>, name: impl Into<String>) -> Self {
        Self::start_with_context(logger, name, Context::new())
    }

    /// Begin timing with an explicit context
    pub fn start_with_context(
        logger: Arc<Logger>,
        name: impl Into<String>,
        context: Context,
    ) -> Self {
        let name = name.into();
        let start = Instant::now();
        logger.log(
            Record::new(Level::Debug, format!("Starting timed operation: {name}"))
                .in_category(START_CATEGORY)
                .with_context(&context),
        );
        Self {
            name,
            start,
            context,
            logger,
            stopped: false,
        }
    }

    /// Stop and report the elapsed time
    ///
    /// The first call emits the completion record and returns the elapsed
    /// duration; later calls return `Duration::ZERO` without logging.
    pub fn stop(&mut self) -> Duration {
        if self.stopped {
            return Duration::ZERO;
        }
        self.stopped = true;
        let elapsed = self.start.elapsed();
        self.logger.log(
            Record::new(
                Level::Info,
                format!(
                    "Operation {} finished in {} ms",
                    self.name,
                    elapsed.as_millis()
                ),
            )
            .in_category(STOP_CATEGORY)
            .with_context(&self.context),
        );
        elapsed
    }
}

impl Drop for TimedOperation {
    fn drop(&mut self) {
        self.stop();
    }
}
