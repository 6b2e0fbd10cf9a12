// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host port traits.
//
// The native app injects its bridge objects into the page. The traits below
// describe what the bridge needs from them, so the dispatcher never reads
// ambient globals and tests can substitute a recording host.

use hostlink_core::error::Result;

/// Everything the dispatcher needs from the hosting webview.
///
/// A host that lacks one of the channels (e.g. a desktop browser) still
/// implements the trait and returns `BridgeError::HostUnavailable`.
pub trait NativeHost:
    UserAgentSource + WebkitMessageHandlers + PromptChannel + AndroidInterface
{
}

impl<T> NativeHost for T where
    T: UserAgentSource + WebkitMessageHandlers + PromptChannel + AndroidInterface
{
}

/// Source of the user-agent string used for platform detection.
pub trait UserAgentSource {
    /// Current user agent. Read on every call; never cached.
    fn user_agent(&self) -> String;
}

/// iOS `window.webkit.messageHandlers`.
pub trait WebkitMessageHandlers {
    /// `messageHandlers[handler].postMessage(body)`; `None` posts `null`.
    fn post_message(&self, handler: &str, body: Option<&str>) -> Result<()>;
}

/// iOS synchronous return channel over the blocking `prompt()` dialog.
pub trait PromptChannel {
    /// Show `message` to the native prompt handler and return its reply.
    /// Blocks the calling thread until native answers.
    fn prompt(&self, message: &str) -> Result<Option<String>>;
}

/// Android JavaScript interface object (`window.js_android` by default).
pub trait AndroidInterface {
    /// `namespace[method](argument)`; `None` passes `null`.
    /// Returns the method's string result, if it produced one.
    fn call_method(&self, method: &str, argument: Option<&str>) -> Result<Option<String>>;
}

impl<T: UserAgentSource + ?Sized> UserAgentSource for &T {
    fn user_agent(&self) -> String {
        (**self).user_agent()
    }
}

impl<T: WebkitMessageHandlers + ?Sized> WebkitMessageHandlers for &T {
    fn post_message(&self, handler: &str, body: Option<&str>) -> Result<()> {
        (**self).post_message(handler, body)
    }
}

impl<T: PromptChannel + ?Sized> PromptChannel for &T {
    fn prompt(&self, message: &str) -> Result<Option<String>> {
        (**self).prompt(message)
    }
}

impl<T: AndroidInterface + ?Sized> AndroidInterface for &T {
    fn call_method(&self, method: &str, argument: Option<&str>) -> Result<Option<String>> {
        (**self).call_method(method, argument)
    }
}
