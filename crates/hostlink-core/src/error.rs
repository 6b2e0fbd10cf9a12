// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Hostlink.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Host port --
    /// The injected host object, or the handler for one function, is missing.
    #[error("native host unavailable: {0}")]
    HostUnavailable(String),

    /// The native call was reached but raised.
    #[error("native call `{function}` failed: {reason}")]
    HostCallThrew { function: String, reason: String },

    // -- Payloads --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Callbacks --
    #[error("no callback registered under `{0}`")]
    UnknownCallback(String),

    // -- Configuration --
    #[error("invalid bridge configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// Shorthand for a missing handler on the named function.
    pub fn missing_handler(function: &str) -> Self {
        Self::HostUnavailable(format!("no handler for `{function}`"))
    }

    /// Shorthand for a native call that raised.
    pub fn threw(function: &str, reason: impl Into<String>) -> Self {
        Self::HostCallThrew {
            function: function.to_owned(),
            reason: reason.into(),
        }
    }

    /// Whether the failure came from the host not being there at all,
    /// as opposed to a present host that rejected the call.
    pub fn is_host_unavailable(&self) -> bool {
        matches!(self, Self::HostUnavailable(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
