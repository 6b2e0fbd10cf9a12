// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Browser host for wasm32 builds running inside the app's webview.
//
// Reaches the objects the native app injects into `window`:
//
// - iOS (WKWebView): `window.webkit.messageHandlers[name].postMessage(arg)`
//   and the blocking `window.prompt(text)` answered by the app's
//   `runJavaScriptTextInputPanel` delegate.
// - Android: `window.<namespace>[name](arg)` registered through
//   `addJavascriptInterface`.
//
// Every lookup goes through `Reflect` because none of these objects have
// web-sys bindings. A missing object is `HostUnavailable`; an exception
// raised by the native side is `HostCallThrew`.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::{BridgeError, Result};
use js_sys::{Function, Reflect};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::bridge::JsBridge;
use crate::callbacks::CallbackRegistry;
use crate::traits::*;

/// Host backed by the real `window` of the page.
#[derive(Debug, Clone)]
pub struct WebHost {
    android_namespace: String,
}

impl WebHost {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            android_namespace: config.android_namespace.clone(),
        }
    }
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| BridgeError::HostUnavailable("no global window".into()))
}

/// `target[key]`, treating `undefined`/`null` as a missing host object.
fn property(target: &JsValue, key: &str, path: &str) -> Result<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key))
        .map_err(|_| BridgeError::HostUnavailable(format!("`{path}` is not reachable")))?;
    if value.is_undefined() || value.is_null() {
        return Err(BridgeError::HostUnavailable(format!("`{path}` is not injected")));
    }
    Ok(value)
}

fn function(target: &JsValue, key: &str, path: &str) -> Result<Function> {
    property(target, key, path)?
        .dyn_into::<Function>()
        .map_err(|_| BridgeError::HostUnavailable(format!("`{path}` is not a function")))
}

fn argument(body: Option<&str>) -> JsValue {
    body.map(JsValue::from_str).unwrap_or(JsValue::NULL)
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl UserAgentSource for WebHost {
    fn user_agent(&self) -> String {
        window()
            .ok()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default()
    }
}

impl WebkitMessageHandlers for WebHost {
    fn post_message(&self, handler: &str, body: Option<&str>) -> Result<()> {
        let window: JsValue = window()?.into();
        let webkit = property(&window, "webkit", "window.webkit")?;
        let handlers = property(&webkit, "messageHandlers", "webkit.messageHandlers")?;
        let path = format!("webkit.messageHandlers.{handler}");
        let target = property(&handlers, handler, &path)?;
        let post = function(&target, "postMessage", &format!("{path}.postMessage"))?;
        post.call1(&target, &argument(body))
            .map_err(|e| BridgeError::threw(handler, describe(&e)))?;
        Ok(())
    }
}

impl PromptChannel for WebHost {
    fn prompt(&self, message: &str) -> Result<Option<String>> {
        window()?
            .prompt_with_message(message)
            .map_err(|e| BridgeError::threw("prompt", describe(&e)))
    }
}

impl AndroidInterface for WebHost {
    fn call_method(&self, method: &str, arg: Option<&str>) -> Result<Option<String>> {
        let window: JsValue = window()?.into();
        let namespace = property(
            &window,
            &self.android_namespace,
            &format!("window.{}", self.android_namespace),
        )?;
        let path = format!("{}.{method}", self.android_namespace);
        let target = function(&namespace, method, &path)?;
        let returned = target
            .call1(&namespace, &argument(arg))
            .map_err(|e| BridgeError::threw(method, describe(&e)))?;
        Ok(returned.as_string())
    }
}

/// Define `window[name]` so native can invoke a registered callback the way
/// it always has: by calling a global function with one argument.
///
/// Once the registry no longer holds `name` (a one-shot handler has run, or
/// the entry was removed) the global is deleted on its next invocation.
pub fn expose_callback(registry: &Rc<CallbackRegistry>, name: &str) -> Result<()> {
    let window = window()?;
    let registry = Rc::clone(registry);
    let key = name.to_owned();
    let entry = Closure::<dyn Fn(JsValue)>::new(move |payload: JsValue| {
        let raw = payload.as_string().unwrap_or_else(|| {
            js_sys::JSON::stringify(&payload)
                .ok()
                .and_then(|s| JsValue::from(s).as_string())
                .unwrap_or_default()
        });
        if let Err(e) = registry.deliver(&key, &raw) {
            tracing::warn!(callback = %key, error = %e, "native callback dropped");
        }
        if !registry.contains(&key) {
            unexpose_callback(&key);
        }
    });
    Reflect::set(&window, &JsValue::from_str(name), entry.as_ref())
        .map_err(|e| BridgeError::threw(name, describe(&e)))?;
    // A Closure cannot be dropped while it runs, so the page keeps the
    // (small) wasm-side allocation; the global itself is removed above.
    entry.forget();
    Ok(())
}

/// Delete `window[name]`. Missing properties are ignored.
pub fn unexpose_callback(name: &str) {
    let Ok(window) = window() else {
        return;
    };
    if let Err(e) = Reflect::delete_property(&window, &JsValue::from_str(name)) {
        tracing::warn!(callback = name, error = %describe(&e), "could not remove global callback");
    }
}

impl JsBridge<WebHost> {
    /// Register a one-shot `handler` under a fresh name and expose it on
    /// `window`. Both the entry and the global go away after native answers.
    /// Returns the name to hand to native.
    pub fn register_global_callback<F>(&self, handler: F) -> Result<String>
    where
        F: Fn(&Value) + 'static,
    {
        let name = self.register_callback_once(handler);
        if let Err(e) = expose_callback(self.callbacks(), &name) {
            self.callbacks().remove(&name);
            return Err(e);
        }
        Ok(name)
    }
}
