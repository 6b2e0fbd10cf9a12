// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hostlink — Core types, payloads and error definitions shared across crates.

pub mod config;
pub mod error;
pub mod payloads;
pub mod types;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use payloads::*;
pub use types::*;
