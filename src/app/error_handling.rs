//! Error handling utilities
//!
//! This module provides centralized fatal error reporting for the binary.

use crate::error::RankError;
use tracing::error;

/// Render a fatal error the way it is shown on stderr
///
/// - `verbose = 0`: one line with the full cause chain
/// - `verbose >= 1`: additionally the numbered chain and the error code description
pub fn format_fatal_error(error: &anyhow::Error, verbose: u8) -> String {
    let mut message = format!("Error: {:#}", error);

    if verbose >= 1 {
        message.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            message.push_str(&format!("\n  {}: {}", i, cause));
        }
        if let Some(rank_err) = error.downcast_ref::<RankError>() {
            message.push_str(&format!("\n\n{}", rank_err.developer_message()));
        }
    }

    message
}

/// Report a fatal error on stderr and exit with status 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);
    eprintln!("{}", format_fatal_error(&error, verbose));
    std::process::exit(1)
}
