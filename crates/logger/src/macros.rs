//! Leveled logging macros with lazy message construction
//!
//! The macros check the installed pipeline's threshold before touching
//! their format arguments, so a filtered-out record never pays for message
//! construction.

/// Log at an explicit level through the installed pipeline
///
/// Accepts an optional `category:` prefix; without one the record goes to
/// the default category.
#[macro_export]
macro_rules! log_at {
    ($level:expr, category: $category:expr, $($arg:tt)+) => {{
        let level = $level;
        let category = $category;
        if $crate::facade::enabled(level, category) {
            $crate::facade::log(
                $crate::Record::new(level, format!($($arg)+)).in_category(category),
            );
        }
    }};
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at!($level, category: $crate::DEFAULT_CATEGORY, $($arg)+)
    };
}

/// Log at Trace
#[macro_export]
macro_rules! trace {
    (category: $category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Trace, category: $category, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Trace, $($arg)+)
    };
}

/// Log at Debug
#[macro_export]
macro_rules! debug {
    (category: $category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Debug, category: $category, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Debug, $($arg)+)
    };
}

/// Log at Info
#[macro_export]
macro_rules! info {
    (category: $category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Info, category: $category, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Info, $($arg)+)
    };
}

/// Log at Warn
#[macro_export]
macro_rules! warn {
    (category: $category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Warn, category: $category, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Warn, $($arg)+)
    };
}

/// Log at Error
#[macro_export]
macro_rules! error {
    (category: $category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Error, category: $category, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Error, $($arg)+)
    };
}

/// Log at Fatal
#[macro_export]
macro_rules! fatal {
    (category: $category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Fatal, category: $category, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Fatal, $($arg)+)
    };
}
