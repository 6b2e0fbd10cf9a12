// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dispatcher: one invocation in, exactly one native call out.
//
// The dispatcher propagates every host error. Whether a failure is logged and
// dropped or handed to the caller is decided by the catalogue in `bridge.rs`.

use hostlink_core::error::Result;
use hostlink_core::types::{HostEnvironment, Invocation, Platform};
use tracing::{debug, trace};

use crate::detect::{detect_environment_with_marker, detect_platform};
use crate::traits::NativeHost;

/// Routes invocations to the channel of the detected platform.
#[derive(Debug)]
pub struct Dispatcher<H> {
    host: H,
}

impl<H: NativeHost> Dispatcher<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Platform of the current user agent. Re-detected on every call.
    pub fn platform(&self) -> Platform {
        detect_platform(&self.host.user_agent())
    }

    pub fn environment(&self, wechat_marker: &str) -> HostEnvironment {
        detect_environment_with_marker(&self.host.user_agent(), wechat_marker)
    }

    /// Perform the native call for `invocation`.
    ///
    /// Returns the host's string reply for the iOS prompt path and for
    /// Android methods that return one; `None` otherwise.
    pub fn dispatch(&self, invocation: &Invocation) -> Result<Option<String>> {
        let platform = self.platform();
        debug!(
            function = %invocation.function,
            %platform,
            has_payload = invocation.payload.is_some(),
            "dispatching native call"
        );

        match platform {
            Platform::Ios => match &invocation.probe {
                Some(probe) => self.host.prompt(&probe.to_json()?),
                None => {
                    self.host
                        .post_message(&invocation.function, invocation.payload.as_deref())?;
                    Ok(None)
                }
            },
            Platform::Android => self
                .host
                .call_method(&invocation.function, invocation.payload.as_deref()),
            Platform::Unknown => {
                trace!(function = %invocation.function, "no native host; call dropped");
                Ok(None)
            }
        }
    }
}
