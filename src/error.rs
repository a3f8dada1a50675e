//! Grepable error codes shared by every error type the crate surfaces to users.

/// Attach a stable machine-readable code to an error.
///
/// The HTTP layer and host views report `error_code()` next to the display
/// message so failures can be matched without parsing prose.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
