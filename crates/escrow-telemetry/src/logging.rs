//! Structured logging helpers.
//!
//! Every escrow log line carries the same field names so log pipelines can
//! index them:
//! - `subsystem`: component emitting the line (service, registry, ledger)
//! - `transfer_id`: hex transfer identifier, when the line concerns a transfer
//! - additional context fields

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    // Info level with subsystem
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    // Warn level with subsystem
    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    // Error level with subsystem
    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    // Debug level with subsystem
    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a transfer-related event with standard fields.
#[macro_export]
macro_rules! log_transfer_event {
    ($level:ident, $subsystem:expr, $msg:expr, $transfer_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            transfer_id = %$transfer_id,
            $($($field)*,)?
            $msg
        )
    };
}
