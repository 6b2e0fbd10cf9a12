// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named callbacks invoked later by native code.
//
// Operations such as `payment` or `getLocation` only pass a callback *name*
// to native. When native answers it calls that name with a result payload;
// the registry maps the name back to a Rust handler.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use hostlink_core::error::{BridgeError, Result};
use serde_json::Value;
use tracing::{debug, trace};
use uuid::Uuid;

/// Handler invoked with the parsed payload native sent back.
pub type CallbackHandler = Rc<dyn Fn(&Value)>;

struct Entry {
    handler: CallbackHandler,
    /// Dropped from the table on first delivery.
    once: bool,
}

/// Name → handler table. Single-threaded, like the page it serves.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: RefCell<HashMap<String, Entry>>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`. Returns true if it replaced one.
    pub fn register<F>(&self, name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(&Value) + 'static,
    {
        self.insert(name.into(), Rc::new(handler), false)
    }

    /// Like [`register`](Self::register), but the handler is removed as soon
    /// as native delivers to it.
    pub fn register_once<F>(&self, name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(&Value) + 'static,
    {
        self.insert(name.into(), Rc::new(handler), true)
    }

    fn insert(&self, name: String, handler: CallbackHandler, once: bool) -> bool {
        trace!(callback = %name, once, "registering callback");
        self.handlers
            .borrow_mut()
            .insert(name, Entry { handler, once })
            .is_some()
    }

    /// Register under a fresh `<prefix>_<uuid>` name and return that name.
    ///
    /// The name is a valid JavaScript identifier as long as `prefix` is.
    pub fn register_unique<F>(&self, prefix: &str, handler: F) -> String
    where
        F: Fn(&Value) + 'static,
    {
        let name = unique_name(prefix);
        self.register(name.clone(), handler);
        name
    }

    /// One-shot variant of [`register_unique`](Self::register_unique).
    pub fn register_unique_once<F>(&self, prefix: &str, handler: F) -> String
    where
        F: Fn(&Value) + 'static,
    {
        let name = unique_name(prefix);
        self.register_once(name.clone(), handler);
        name
    }

    pub fn remove(&self, name: &str) -> bool {
        self.handlers.borrow_mut().remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Entry point for native-originated calls.
    ///
    /// `raw` is parsed as JSON; text that is not JSON arrives as a JSON
    /// string and an empty payload as `null`.
    pub fn deliver(&self, name: &str, raw: &str) -> Result<()> {
        // Take the handler out before running it so it may touch the registry.
        let handler = {
            let mut handlers = self.handlers.borrow_mut();
            let entry = handlers
                .get(name)
                .ok_or_else(|| BridgeError::UnknownCallback(name.to_owned()))?;
            let handler = Rc::clone(&entry.handler);
            if entry.once {
                handlers.remove(name);
            }
            handler
        };

        let payload = parse_payload(raw);
        debug!(callback = name, "delivering native callback");
        handler(&payload);
        Ok(())
    }
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

fn parse_payload(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;

    #[test]
    fn delivers_parsed_json() {
        let registry = CallbackRegistry::new();
        let seen = Rc::new(RefCell::new(Value::Null));
        let sink = Rc::clone(&seen);
        registry.register("onLocation", move |v| *sink.borrow_mut() = v.clone());

        registry
            .deliver("onLocation", r#"{"lat":30.6,"lng":104.1}"#)
            .unwrap();
        assert_eq!(*seen.borrow(), json!({"lat": 30.6, "lng": 104.1}));
    }

    #[test]
    fn plain_text_and_empty_payloads() {
        assert_eq!(parse_payload("success"), json!("success"));
        assert_eq!(parse_payload("  "), Value::Null);
        assert_eq!(parse_payload("42"), json!(42));
    }

    #[test]
    fn unknown_name_errors() {
        let registry = CallbackRegistry::new();
        let err = registry.deliver("nobody", "{}").unwrap_err();
        assert!(matches!(err, BridgeError::UnknownCallback(name) if name == "nobody"));
    }

    #[test]
    fn unique_names_do_not_collide() {
        let registry = CallbackRegistry::new();
        let a = registry.register_unique("hostlink_cb", |_| {});
        let b = registry.register_unique("hostlink_cb", |_| {});
        assert_ne!(a, b);
        assert!(a.starts_with("hostlink_cb_"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn register_reports_replacement() {
        let registry = CallbackRegistry::new();
        assert!(!registry.register("cb", |_| {}));
        assert!(registry.register("cb", |_| {}));
        assert!(registry.remove("cb"));
        assert!(registry.is_empty());
    }

    #[test]
    fn one_shot_handlers_leave_after_delivery() {
        let registry = CallbackRegistry::new();
        let hits = Rc::new(Cell::new(0));
        for _ in 0..100 {
            let counter = Rc::clone(&hits);
            let name = registry.register_unique_once("hostlink_cb", move |_| {
                counter.set(counter.get() + 1)
            });
            registry.deliver(&name, "{}").unwrap();
            assert!(matches!(
                registry.deliver(&name, "{}"),
                Err(BridgeError::UnknownCallback(_))
            ));
        }
        assert_eq!(hits.get(), 100);
        assert!(registry.is_empty());
    }

    #[test]
    fn persistent_handlers_stay() {
        let registry = CallbackRegistry::new();
        registry.register("onShare", |_| {});
        registry.deliver("onShare", "1").unwrap();
        registry.deliver("onShare", "2").unwrap();
        assert!(registry.contains("onShare"));
    }

    #[test]
    fn handler_can_remove_itself() {
        let registry = Rc::new(CallbackRegistry::new());
        let hits = Rc::new(Cell::new(0));
        let (inner, counter) = (Rc::clone(&registry), Rc::clone(&hits));
        registry.register("once", move |_| {
            counter.set(counter.get() + 1);
            inner.remove("once");
        });

        registry.deliver("once", "null").unwrap();
        assert!(registry.deliver("once", "null").is_err());
        assert_eq!(hits.get(), 1);
    }
}
