// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory host for desktop/CI builds where no webview injects a bridge.
//
// A freshly built `RecordingHost` has an empty user agent, so the dispatcher
// classifies it as `Platform::Unknown` and every call is a no-op. Tests give
// it a user agent and a set of handlers and then inspect the recorded calls.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use hostlink_core::error::{BridgeError, Result};

use crate::traits::*;

/// A native call that reached an installed handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `webkit.messageHandlers[handler].postMessage(body)`
    PostMessage { handler: String, body: Option<String> },
    /// `prompt(message)`
    Prompt { message: String },
    /// `js_android[method](argument)`
    AndroidMethod {
        method: String,
        argument: Option<String>,
    },
}

impl HostCall {
    /// Handler or method name the call targeted (`None` for prompts).
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::PostMessage { handler, .. } => Some(handler.as_str()),
            Self::AndroidMethod { method, .. } => Some(method.as_str()),
            Self::Prompt { .. } => None,
        }
    }

    /// Serialized argument the host received (`None` is `null`).
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::PostMessage { body, .. } => body.as_deref(),
            Self::AndroidMethod { argument, .. } => argument.as_deref(),
            Self::Prompt { message } => Some(message),
        }
    }
}

/// Host double that records every native call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    user_agent: String,
    /// Handler / method names the host has injected.
    installed: HashSet<String>,
    /// Installed names whose call raises.
    throwing: HashSet<String>,
    /// `None` means the page has no prompt channel at all.
    prompt_reply: Option<Option<String>>,
    /// Return values of Android methods.
    returns: HashMap<String, String>,
    calls: RefCell<Vec<HostCall>>,
}

impl RecordingHost {
    /// Host reporting `user_agent` with nothing injected yet.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Inject a handler (iOS) or method (Android).
    pub fn with_handler(mut self, name: impl Into<String>) -> Self {
        self.installed.insert(name.into());
        self
    }

    pub fn with_handlers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed.extend(names.into_iter().map(Into::into));
        self
    }

    /// Inject a handler whose invocation raises.
    pub fn with_throwing_handler(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.installed.insert(name.clone());
        self.throwing.insert(name);
        self
    }

    /// Answer prompts with `reply` (`None` models a dismissed prompt).
    pub fn with_prompt_reply(mut self, reply: Option<&str>) -> Self {
        self.prompt_reply = Some(reply.map(str::to_owned));
        self
    }

    /// Make the Android method `name` return `value`. Installs the method.
    pub fn with_return(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.installed.insert(name.clone());
        self.returns.insert(name, value.into());
        self
    }

    /// Every call that reached an installed handler, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls that targeted `name`.
    pub fn calls_to(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.target() == Some(name))
            .count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Shared handler lookup: missing names never record a call.
    fn reach(&self, name: &str, call: HostCall) -> Result<()> {
        if !self.installed.contains(name) {
            tracing::trace!(handler = name, "recording host: no handler installed");
            return Err(BridgeError::missing_handler(name));
        }
        self.calls.borrow_mut().push(call);
        if self.throwing.contains(name) {
            return Err(BridgeError::threw(name, "handler raised"));
        }
        Ok(())
    }
}

impl UserAgentSource for RecordingHost {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }
}

impl WebkitMessageHandlers for RecordingHost {
    fn post_message(&self, handler: &str, body: Option<&str>) -> Result<()> {
        self.reach(
            handler,
            HostCall::PostMessage {
                handler: handler.to_owned(),
                body: body.map(str::to_owned),
            },
        )
    }
}

impl PromptChannel for RecordingHost {
    fn prompt(&self, message: &str) -> Result<Option<String>> {
        let Some(reply) = &self.prompt_reply else {
            return Err(BridgeError::HostUnavailable("prompt channel missing".into()));
        };
        self.calls.borrow_mut().push(HostCall::Prompt {
            message: message.to_owned(),
        });
        Ok(reply.clone())
    }
}

impl AndroidInterface for RecordingHost {
    fn call_method(&self, method: &str, argument: Option<&str>) -> Result<Option<String>> {
        self.reach(
            method,
            HostCall::AndroidMethod {
                method: method.to_owned(),
                argument: argument.map(str::to_owned),
            },
        )?;
        Ok(self.returns.get(method).cloned())
    }
}
