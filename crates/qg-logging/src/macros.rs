//! ---
//! qg_section: "02-logging"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Structured logging adapters and sinks."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
/// Emit an informational log enriched with component context.
#[macro_export]
macro_rules! qg_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            component = ctx.component.unwrap_or(""),
            version = ctx.version.unwrap_or(""),
            operation = ctx.operation.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        $crate::qg_info!(context = $crate::LogContext::default(), $($arg)+)
    }};
}

/// Emit a debug log enriched with component context.
#[macro_export]
macro_rules! qg_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            component = ctx.component.unwrap_or(""),
            version = ctx.version.unwrap_or(""),
            operation = ctx.operation.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        $crate::qg_debug!(context = $crate::LogContext::default(), $($arg)+)
    }};
}

/// Emit an error log enriched with component context.
#[macro_export]
macro_rules! qg_error {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::ERROR,
            component = ctx.component.unwrap_or(""),
            version = ctx.version.unwrap_or(""),
            operation = ctx.operation.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        $crate::qg_error!(context = $crate::LogContext::default(), $($arg)+)
    }};
}
