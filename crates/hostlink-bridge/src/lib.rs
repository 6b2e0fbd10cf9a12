// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Hostlink — bridge from web content to the native app hosting its webview.
//!
//! The page calls typed methods on [`JsBridge`]; the bridge detects whether
//! it runs inside the iOS or Android app from the user agent and forwards the
//! call through that host's injected objects. The host objects are reached
//! through the [`traits::NativeHost`] port, so tests and desktop builds run
//! against [`stub::RecordingHost`].

pub mod bridge;
pub mod callbacks;
pub mod detect;
pub mod dispatch;
pub mod logging;
pub mod stub;
pub mod traits;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bridge::JsBridge;
pub use callbacks::CallbackRegistry;
pub use detect::{detect_environment, detect_platform};
pub use dispatch::Dispatcher;

use hostlink_core::config::BridgeConfig;

/// Host implementation for the compilation target.
#[cfg(target_arch = "wasm32")]
pub type DefaultHost = web::WebHost;

/// Host implementation for the compilation target.
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultHost = stub::RecordingHost;

/// Host for the current target.
///
/// In the browser this is the page's real `window`. Elsewhere (desktop/CI)
/// it is an empty recording host on which every call is a no-op.
pub fn platform_host(config: &BridgeConfig) -> DefaultHost {
    #[cfg(target_arch = "wasm32")]
    {
        web::WebHost::new(config)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = config;
        stub::RecordingHost::default()
    }
}

/// Bridge over [`platform_host`] with the given configuration.
pub fn page_bridge(config: BridgeConfig) -> JsBridge<DefaultHost> {
    let host = platform_host(&config);
    JsBridge::new(host, config)
}
