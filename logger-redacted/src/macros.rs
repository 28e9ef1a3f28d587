// Logging macros that redact an utterance field before it is recorded

#[macro_export]
macro_rules! redacted_debug {
    ($redactor:expr, $utterance:expr, $($arg:tt)+) => {
        $crate::tracing::debug!(utterance = %$redactor.redact($utterance), $($arg)+)
    };
}

#[macro_export]
macro_rules! redacted_info {
    ($redactor:expr, $utterance:expr, $($arg:tt)+) => {
        $crate::tracing::info!(utterance = %$redactor.redact($utterance), $($arg)+)
    };
}

#[macro_export]
macro_rules! redacted_warn {
    ($redactor:expr, $utterance:expr, $($arg:tt)+) => {
        $crate::tracing::warn!(utterance = %$redactor.redact($utterance), $($arg)+)
    };
}
