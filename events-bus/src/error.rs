use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventBusError {
    #[error("Event bus capacity must be greater than zero")]
    InvalidCapacity,

    #[error("Event subscription closed")]
    SubscriptionClosed,

    #[error("Event handler failed: {0}")]
    HandlerFailed(String),
}

pub type Result<T> = std::result::Result<T, EventBusError>;
