//! Output macros for user-facing messages.
//!
//! Commands never call `println!` directly for status text. They pass a
//! [`Message`](super::Message) to one of these macros, which picks the sink:
//!
//! - plain mode: stdout (stderr for errors), with an emoji prefix
//! - debug mode (`TASKDASH_DEBUG` or `RUST_LOG` set): the same text goes
//!   through `tracing`, so it interleaves with the store's debug lines
//!
//! ```rust
//! use taskdash::{msg_info, msg_print, msg_success};
//! use taskdash::libs::messages::Message;
//!
//! msg_print!(Message::DashboardHeader, true);
//! msg_success!(Message::CategoryCreated("Work".into()));
//! msg_info!(Message::NoActiveTasks);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Environment variable that switches message output to `tracing`.
pub const DEBUG_ENV: &str = "TASKDASH_DEBUG";

/// Whether debug output was requested. Read once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var(DEBUG_ENV).is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a message without a prefix.
///
/// The `true` form surrounds it with blank lines; section headers above
/// tables use it.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Reports a completed write (task created, task closed, config saved).
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

/// Reports a failure on stderr. Used for the final error in `main` and
/// for failed migrations.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

/// Informational notes such as empty result sets.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

/// Emitted only in debug mode; silent otherwise.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Returns early from an `anyhow::Result` function with the message text.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
