// Standardized error codes for CareVoice

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const DUPLICATE_ALIAS: &str = "VALIDATION_1002";
    pub const UNKNOWN_ROUTE: &str = "VALIDATION_1003";
    pub const INVALID_ACTION: &str = "VALIDATION_1004";
}

pub mod voice {
    pub const RECOGNITION_FAILED: &str = "VOICE_1101";
    pub const RECOGNITION_UNSUPPORTED: &str = "VOICE_1102";
    pub const SYNTHESIS_FAILED: &str = "VOICE_1103";
    pub const NAVIGATION_FAILED: &str = "VOICE_1104";
}

pub mod config {
    pub const SOURCE_INVALID: &str = "CONFIG_2001";
    pub const PARSE_FAILED: &str = "CONFIG_2002";
}

pub mod bus {
    pub const PUBLISH_FAILED: &str = "BUS_3001";
    pub const SUBSCRIPTION_CLOSED: &str = "BUS_3002";
}

pub mod session {
    pub const STORAGE_FAILED: &str = "SESSION_4001";
    pub const INVALID_ROLE: &str = "SESSION_4002";
}

pub mod system {
    pub const IO_FAILED: &str = "SYSTEM_9001";
    pub const INTERNAL: &str = "SYSTEM_9999";
}
