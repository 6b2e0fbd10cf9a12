// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Hostlink bridge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Native host family the page is running inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// WKWebView with `window.webkit.messageHandlers`.
    Ios,
    /// Android WebView with an injected JavaScript interface object.
    Android,
    /// Any other browser. Every dispatch is a no-op.
    Unknown,
}

impl Platform {
    /// Whether native calls can be routed at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ios => write!(f, "ios"),
            Self::Android => write!(f, "android"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Platform plus the in-app browser flags derived from the same user agent.
///
/// `in_wechat` never changes routing: calls still go through the iOS or
/// Android branch of `platform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEnvironment {
    pub platform: Platform,
    pub in_wechat: bool,
}

/// Request for the iOS synchronous `prompt` channel.
///
/// Serialized as one flat object: `{"type":"GET_TOKEN", ...extra}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptProbe {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PromptProbe {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra field to the probe object.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// JSON text handed to `prompt()`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One native call, built per operation and dropped after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Native function / message handler name.
    pub function: String,
    /// JSON-serialized payload. `None` is sent to the host as `null`.
    pub payload: Option<String>,
    /// iOS-only synchronous probe; when set, iOS ignores `payload`.
    pub probe: Option<PromptProbe>,
}

impl Invocation {
    /// Call without a payload (the host receives `null`).
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            payload: None,
            probe: None,
        }
    }

    /// Call with a payload serialized to JSON.
    ///
    /// A payload that encodes to `null` (unit, `None`, `Value::Null`) is the
    /// null sentinel, not the text `"null"`.
    pub fn with_payload<T: Serialize + ?Sized>(
        function: impl Into<String>,
        payload: &T,
    ) -> Result<Self> {
        let encoded = serde_json::to_string(payload)?;
        Ok(Self {
            function: function.into(),
            payload: (encoded != "null").then_some(encoded),
            probe: None,
        })
    }

    /// Attach a synchronous probe used on iOS.
    pub fn with_probe(mut self, probe: PromptProbe) -> Self {
        self.probe = Some(probe);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_serializes_flat() {
        let probe = PromptProbe::new("GET_TOKEN").with("scope", "user");
        let value: Value = serde_json::from_str(&probe.to_json().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "GET_TOKEN", "scope": "user"}));
    }

    #[test]
    fn bare_probe_has_only_type() {
        assert_eq!(
            PromptProbe::new("GET_TOKEN").to_json().unwrap(),
            r#"{"type":"GET_TOKEN"}"#
        );
    }

    #[test]
    fn invocation_without_payload_is_null_sentinel() {
        let call = Invocation::new("openWeChat");
        assert_eq!(call.payload, None);
        assert_eq!(call.probe, None);
    }

    #[test]
    fn invocation_payload_is_json_text() {
        let call = Invocation::with_payload("saveImages", &["a", "b"]).unwrap();
        assert_eq!(call.payload.as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn null_payloads_become_null_sentinel() {
        assert_eq!(Invocation::with_payload("scanCode", &()).unwrap().payload, None);
        assert_eq!(
            Invocation::with_payload("scanCode", &None::<String>).unwrap().payload,
            None
        );
        assert_eq!(
            Invocation::with_payload("scanCode", &Value::Null).unwrap().payload,
            None
        );
        assert_eq!(
            Invocation::with_payload("scanCode", "null").unwrap().payload.as_deref(),
            Some(r#""null""#)
        );
    }

    #[test]
    fn platform_display_and_support() {
        assert_eq!(Platform::Ios.to_string(), "ios");
        assert!(Platform::Android.is_supported());
        assert!(!Platform::Unknown.is_supported());
    }
}
