// Error reporting through tracing

use crate::context::ErrorContext;
use crate::types::CareVoiceError;

/// Log an error with structured context
pub fn log_error_with_context(context: &ErrorContext, error: &CareVoiceError) {
    tracing::error!(
        component = context.component.as_deref().unwrap_or("unknown"),
        action = context.action.as_deref(),
        additional = ?context.additional,
        error_code = error.code(),
        error_type = error.error_type(),
        "{}",
        error
    );
}
