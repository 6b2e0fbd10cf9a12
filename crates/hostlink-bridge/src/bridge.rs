// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method catalogue: one typed method per native function.
//
// Error policy, applied uniformly:
// - fire-and-forget methods log host failures at `warn` and return `()`;
// - `get_token` / `query` return `Err` so callers can tell "no token" apart
//   from "call failed";
// - `try_call` propagates for callers that want the raw outcome.

use std::rc::Rc;

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::Result;
use hostlink_core::payloads::*;
use hostlink_core::types::{HostEnvironment, Invocation, Platform, PromptProbe};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::callbacks::CallbackRegistry;
use crate::dispatch::Dispatcher;
use crate::traits::NativeHost;

/// Native function names of the catalogue.
pub mod functions {
    pub const LAUNCH_MINI_PROGRAM: &str = "launchMiniProgram";
    pub const PAYMENT: &str = "payment";
    pub const SHARE_WITH: &str = "shareWith";
    pub const SAVE_IMAGES: &str = "saveImages";
    pub const SAVE_VIDEOS: &str = "saveVideos";
    pub const BIND_WECHAT: &str = "bindWeChat";
    pub const OPEN_WECHAT: &str = "openWeChat";
    pub const GET_LOCATION: &str = "getLocation";
    pub const SHARE_ACTIVITY_GOODS: &str = "shareActivityGoods";
    pub const INVITE_FRIENDS: &str = "inviteFriends";
    pub const INVITE_MEMBERS: &str = "inviteMembers";
    pub const PLAY_AD_VIDEO: &str = "playADVideo";
    pub const SHARE_POSTER: &str = "sharePoster";
}

/// The page-facing bridge.
pub struct JsBridge<H> {
    dispatcher: Dispatcher<H>,
    config: BridgeConfig,
    callbacks: Rc<CallbackRegistry>,
}

impl<H: NativeHost> JsBridge<H> {
    pub fn new(host: H, config: BridgeConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(host),
            config,
            callbacks: Rc::new(CallbackRegistry::new()),
        }
    }

    /// Bridge using the default native names.
    pub fn with_defaults(host: H) -> Self {
        Self::new(host, BridgeConfig::default())
    }

    pub fn host(&self) -> &H {
        self.dispatcher.host()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.dispatcher.platform()
    }

    pub fn environment(&self) -> HostEnvironment {
        self.dispatcher.environment(&self.config.wechat_marker)
    }

    /// Table of callbacks native may invoke later.
    pub fn callbacks(&self) -> &Rc<CallbackRegistry> {
        &self.callbacks
    }

    /// Register a handler under a fresh name and return the name to pass to
    /// native.
    pub fn register_callback<F>(&self, handler: F) -> String
    where
        F: Fn(&Value) + 'static,
    {
        self.callbacks.register_unique("hostlink_cb", handler)
    }

    /// Register a handler that is dropped once native has answered.
    pub fn register_callback_once<F>(&self, handler: F) -> String
    where
        F: Fn(&Value) + 'static,
    {
        self.callbacks.register_unique_once("hostlink_cb", handler)
    }

    /// Native-originated entry: run the callback registered under `name`.
    pub fn deliver_callback(&self, name: &str, raw: &str) -> Result<()> {
        self.callbacks.deliver(name, raw)
    }

    // -- Generic entry points --

    /// Dispatch and hand back the raw outcome.
    pub fn try_call(&self, invocation: &Invocation) -> Result<Option<String>> {
        self.dispatcher.dispatch(invocation)
    }

    /// Fire-and-forget call of any native function with a JSON payload.
    pub fn call<T: Serialize + ?Sized>(&self, function: &str, payload: &T) {
        self.fire(function, Invocation::with_payload(function, payload));
    }

    /// Fire-and-forget call of any native function with a `null` argument.
    pub fn notify(&self, function: &str) {
        self.fire(function, Ok(Invocation::new(function)));
    }

    /// Synchronous probe over the iOS prompt channel.
    ///
    /// Returns `""` when the host answered nothing or when no native host is
    /// present. Android has no probe channel; it also yields `""`.
    pub fn query(&self, probe: PromptProbe) -> Result<String> {
        if self.platform() != Platform::Ios {
            return Ok(String::new());
        }
        let invocation = Invocation::new(probe.kind.clone()).with_probe(probe);
        Ok(self.dispatcher.dispatch(&invocation)?.unwrap_or_default())
    }

    fn fire(&self, function: &str, invocation: Result<Invocation>) {
        let outcome = invocation.and_then(|invocation| self.dispatcher.dispatch(&invocation));
        if let Err(e) = outcome {
            warn!(function, error = %e, "native call failed; ignored");
        }
    }

    // -- Catalogue --

    /// Open a WeChat mini program.
    pub fn launch_mini_program(&self, options: &LaunchMiniProgram) {
        self.call(functions::LAUNCH_MINI_PROGRAM, options);
    }

    /// Start a native payment. Native later invokes `params.callback`.
    pub fn payment(&self, params: &Payment) {
        self.call(functions::PAYMENT, params);
    }

    /// Open the native share sheet.
    pub fn share_with(&self, share: &Share) {
        self.call(functions::SHARE_WITH, share);
    }

    /// Save images (by URL) to the photo album.
    pub fn save_images<S: AsRef<str>>(&self, urls: &[S]) {
        let urls: Vec<&str> = urls.iter().map(AsRef::as_ref).collect();
        self.call(functions::SAVE_IMAGES, &urls);
    }

    /// Save videos (by URL) to the photo album.
    pub fn save_videos<S: AsRef<str>>(&self, urls: &[S]) {
        let urls: Vec<&str> = urls.iter().map(AsRef::as_ref).collect();
        self.call(functions::SAVE_VIDEOS, &urls);
    }

    /// Ask native to pop the current page.
    ///
    /// Older app builds only know the legacy handler, so a failure of the
    /// primary handler is followed by exactly one attempt on the legacy one.
    pub fn native_back(&self) {
        let primary = Invocation::new(self.config.back_handler.as_str());
        let Err(first) = self.dispatcher.dispatch(&primary) else {
            return;
        };
        debug!(error = %first, "primary back handler failed; trying legacy handler");

        let legacy = Invocation::new(self.config.legacy_back_handler.as_str());
        if let Err(e) = self.dispatcher.dispatch(&legacy) {
            warn!(
                primary = %first,
                legacy = %e,
                "both back handlers failed; ignored"
            );
        }
    }

    /// Bind the user's WeChat account; native invokes `callback` afterwards.
    pub fn bind_wechat(&self, callback: &str) {
        self.call(functions::BIND_WECHAT, &CallbackOnly::new(callback));
    }

    /// Open the WeChat app.
    pub fn open_wechat(&self) {
        self.notify(functions::OPEN_WECHAT);
    }

    /// Request a location fix; native invokes `callback` with it.
    pub fn get_location(&self, callback: &str) {
        self.call(functions::GET_LOCATION, &CallbackOnly::new(callback));
    }

    /// Register `handler` and request a location fix delivered to it.
    /// Returns the generated callback name.
    pub fn get_location_with<F>(&self, handler: F) -> String
    where
        F: Fn(&Value) + 'static,
    {
        let name = self.register_callback_once(handler);
        self.get_location(&name);
        name
    }

    /// Session token held by the native app. `""` when there is none.
    ///
    /// iOS answers over the prompt channel; Android returns it from the
    /// token method. Host failures are returned as `Err`.
    pub fn get_token(&self) -> Result<String> {
        let probe = PromptProbe::new(self.config.token_probe_type.as_str());
        let invocation = Invocation::new(self.config.token_function.as_str()).with_probe(probe);
        Ok(self.dispatcher.dispatch(&invocation)?.unwrap_or_default())
    }

    /// Share a free-claim or flash-sale item.
    pub fn share_activity_goods(&self, goods: &ActivityGoods) {
        self.call(functions::SHARE_ACTIVITY_GOODS, goods);
    }

    /// Invite friends to the app.
    pub fn invite_friends(&self, callback: &str) {
        self.call(functions::INVITE_FRIENDS, &CallbackOnly::new(callback));
    }

    /// Invite friends to buy a membership.
    pub fn invite_members(&self, callback: &str) {
        self.call(functions::INVITE_MEMBERS, &CallbackOnly::new(callback));
    }

    /// Play a rewarded ad video.
    pub fn play_ad_video(&self, options: &AdVideo) {
        self.call(functions::PLAY_AD_VIDEO, options);
    }

    pub fn share_poster(&self, poster: &Poster) {
        self.call(functions::SHARE_POSTER, poster);
    }
}
