// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform detection from the user-agent string.

use hostlink_core::types::{HostEnvironment, Platform};

/// WeChat's in-app browser tags its user agent with this marker.
pub const WECHAT_MARKER: &str = "MicroMessenger";

/// Case-insensitive substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Classify a user agent.
///
/// iPhone is checked first: only `iPhone` counts as iOS, and `Linux` or
/// `Android` anywhere counts as Android.
pub fn detect_platform(user_agent: &str) -> Platform {
    if contains_ignore_case(user_agent, "iphone") {
        Platform::Ios
    } else if contains_ignore_case(user_agent, "linux")
        || contains_ignore_case(user_agent, "android")
    {
        Platform::Android
    } else {
        Platform::Unknown
    }
}

/// Classify a user agent, including the WeChat in-app browser flag.
pub fn detect_environment(user_agent: &str) -> HostEnvironment {
    detect_environment_with_marker(user_agent, WECHAT_MARKER)
}

/// Same as [`detect_environment`] with a configurable WeChat marker.
pub fn detect_environment_with_marker(user_agent: &str, wechat_marker: &str) -> HostEnvironment {
    HostEnvironment {
        platform: detect_platform(user_agent),
        // An empty marker would match every user agent.
        in_wechat: !wechat_marker.trim().is_empty()
            && contains_ignore_case(user_agent, wechat_marker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/124.0 Mobile Safari/537.36";
    const DESKTOP_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101";
    const WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_4 like Mac OS X) AppleWebKit/605.1.15";
    const WECHAT_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) \
        AppleWebKit/605.1.15 Mobile/15E148 MicroMessenger/8.0.47";

    #[test]
    fn iphone_is_ios() {
        assert_eq!(detect_platform(IPHONE_SAFARI), Platform::Ios);
        assert_eq!(detect_platform("IPHONE"), Platform::Ios);
    }

    #[test]
    fn android_and_linux_are_android() {
        assert_eq!(detect_platform(ANDROID_CHROME), Platform::Android);
        assert_eq!(detect_platform("android"), Platform::Android);
        // Any Linux user agent routes to the Android branch.
        assert_eq!(detect_platform(DESKTOP_LINUX), Platform::Android);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(detect_platform(WINDOWS), Platform::Unknown);
        assert_eq!(detect_platform(IPAD), Platform::Unknown);
        assert_eq!(detect_platform(""), Platform::Unknown);
    }

    #[test]
    fn iphone_wins_over_linux() {
        assert_eq!(detect_platform("iPhone Linux"), Platform::Ios);
    }

    #[test]
    fn wechat_flag_does_not_change_platform() {
        let env = detect_environment(WECHAT_IOS);
        assert_eq!(env.platform, Platform::Ios);
        assert!(env.in_wechat);
        assert!(!detect_environment(ANDROID_CHROME).in_wechat);
    }

    #[test]
    fn custom_marker() {
        let env = detect_environment_with_marker("Linux; QQ/9.0", "qq/");
        assert_eq!(env.platform, Platform::Android);
        assert!(env.in_wechat);
    }

    #[test]
    fn empty_marker_never_matches() {
        for marker in ["", "   "] {
            let env = detect_environment_with_marker(IPHONE_SAFARI, marker);
            assert_eq!(env.platform, Platform::Ios);
            assert!(!env.in_wechat);
        }
    }
}
