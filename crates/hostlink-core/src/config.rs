// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.
//
// The defaults are the names the native apps register today. Embedders whose
// host app uses different names override them from a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Names the bridge uses when talking to the native host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Global object the Android app injects (`window.<namespace>`).
    pub android_namespace: String,
    /// Handler asked to pop the native view controller / activity.
    pub back_handler: String,
    /// Older handler name tried when `back_handler` is missing or throws.
    pub legacy_back_handler: String,
    /// Android method returning the session token.
    pub token_function: String,
    /// `type` tag of the iOS synchronous token probe.
    pub token_probe_type: String,
    /// User-agent marker of the WeChat in-app browser.
    pub wechat_marker: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            android_namespace: "js_android".into(),
            back_handler: "nativeBack".into(),
            legacy_back_handler: "gobackAPP".into(),
            token_function: "getToken".into(),
            token_probe_type: "GET_TOKEN".into(),
            wechat_marker: "MicroMessenger".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse a (possibly partial) JSON document; missing keys keep defaults.
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names; a blank handler can never be reached on either host.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("androidNamespace", &self.android_namespace),
            ("backHandler", &self.back_handler),
            ("legacyBackHandler", &self.legacy_back_handler),
            ("tokenFunction", &self.token_function),
            ("tokenProbeType", &self.token_probe_type),
            ("wechatMarker", &self.wechat_marker),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(BridgeError::Config(format!("`{name}` must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_native_names() {
        let config = BridgeConfig::default();
        assert_eq!(config.android_namespace, "js_android");
        assert_eq!(config.back_handler, "nativeBack");
        assert_eq!(config.legacy_back_handler, "gobackAPP");
        assert_eq!(config.token_function, "getToken");
        assert_eq!(config.token_probe_type, "GET_TOKEN");
        assert_eq!(config.wechat_marker, "MicroMessenger");
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config = BridgeConfig::from_json(r#"{"androidNamespace":"AppBridge"}"#).unwrap();
        assert_eq!(config.android_namespace, "AppBridge");
        assert_eq!(config.back_handler, "nativeBack");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = BridgeConfig::from_json(r#"{"backHandler":"  "}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("backHandler")));
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = BridgeConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }
}
