//! Type-safe logging macros using Code types with Display support
//!
//! Context values accept anything implementing `Display`.

/// Log error with Code type
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::error($code, $message),
            vec![],
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::error($code, $message),
            vec![$(($key, format!("{}", $value))),+],
        )
    };
}

/// Log warning with Code type
#[macro_export]
macro_rules! log_warning {
    ($code:expr, $message:expr) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::warning($code, $message),
            vec![],
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::warning($code, $message),
            vec![$(($key, format!("{}", $value))),+],
        )
    };
}

/// Log success with Code type
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::success($code, $message),
            vec![],
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::success($code, $message),
            vec![$(($key, format!("{}", $value))),+],
        )
    };
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_event_with_context($crate::logging::LogEvent::info($message), vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::logging::log_event_with_context(
            $crate::logging::LogEvent::info($message),
            vec![$(($key, format!("{}", $value))),+],
        )
    };
}

/// Log debug message, context is only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_event_with_context(
                $crate::logging::LogEvent::debug($message),
                vec![],
            )
        }
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_event_with_context(
                $crate::logging::LogEvent::debug($message),
                vec![$(($key, format!("{}", $value))),+],
            )
        }
    };
}
