//! Compatibility shim: legacy entry points that forward to the current
//! operations while emitting a deprecation diagnostic through an
//! injectable sink.

use crate::error::FactsError;
use crate::NetworkInterfaceMap;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

pub const DEP0022: &str = "DEP0022";
pub const DEP0023: &str = "DEP0023";

const TMP_DIR_MSG: &str = "tmp_dir() is deprecated. Use tmpdir() instead.";
const GET_NETWORK_INTERFACES_MSG: &str =
    "get_network_interfaces() is deprecated. Use network_interfaces() instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeprecationPolicy {
    /// Emit on the first invocation of each deprecated entry point.
    #[default]
    Once,
    /// Emit on every invocation.
    Always,
    /// Suppress diagnostics entirely; forwarding is unaffected.
    Silent,
}

/// Side channel the shim reports through. Diagnostics never alter
/// control flow or return values.
pub trait DeprecationSink: Send + Sync {
    fn emit(&self, code: &str, message: &str);
}

/// Default sink: a structured warning on the process log.
pub struct TracingSink;

impl DeprecationSink for TracingSink {
    fn emit(&self, code: &str, message: &str) {
        tracing::warn!(code, "{message}");
    }
}

pub struct Deprecations {
    policy: DeprecationPolicy,
    sink: Box<dyn DeprecationSink>,
    seen: Mutex<HashSet<&'static str>>,
}

impl Deprecations {
    pub fn new(policy: DeprecationPolicy, sink: Box<dyn DeprecationSink>) -> Self {
        Self {
            policy,
            sink,
            seen: Mutex::new(HashSet::new()),
        }
    }

    fn report(&self, code: &'static str, message: &'static str) {
        match self.policy {
            DeprecationPolicy::Silent => return,
            DeprecationPolicy::Once => {
                let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
                if !seen.insert(code) {
                    return;
                }
            }
            DeprecationPolicy::Always => {}
        }
        self.sink.emit(code, message);
    }
}

/// Deprecated entry points bundled with their diagnostics policy.
pub struct Compat {
    deprecations: Deprecations,
}

impl Compat {
    pub fn new(policy: DeprecationPolicy, sink: Box<dyn DeprecationSink>) -> Self {
        Self {
            deprecations: Deprecations::new(policy, sink),
        }
    }

    /// Legacy spelling of [`crate::tmpdir`]. Identical result.
    pub fn tmp_dir(&self) -> String {
        self.deprecations.report(DEP0022, TMP_DIR_MSG);
        crate::tmpdir()
    }

    /// Legacy spelling of [`crate::network_interfaces`]. Identical result.
    pub fn get_network_interfaces(&self) -> Result<NetworkInterfaceMap, FactsError> {
        self.deprecations
            .report(DEP0023, GET_NETWORK_INTERFACES_MSG);
        crate::network_interfaces()
    }
}

static DEFAULT: Lazy<Compat> =
    Lazy::new(|| Compat::new(DeprecationPolicy::Once, Box::new(TracingSink)));

pub(crate) fn default_compat() -> &'static Compat {
    &DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<(String, String)>>,
    }

    impl DeprecationSink for Arc<RecordingSink> {
        fn emit(&self, code: &str, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((code.to_string(), message.to_string()));
        }
    }

    fn compat_with_sink(policy: DeprecationPolicy) -> (Compat, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (Compat::new(policy, Box::new(sink.clone())), sink)
    }

    #[test]
    fn forwarding_matches_current_operation() {
        let (compat, _sink) = compat_with_sink(DeprecationPolicy::Silent);
        assert_eq!(compat.tmp_dir(), crate::tmpdir());
    }

    #[test]
    fn always_policy_emits_per_invocation() {
        let (compat, sink) = compat_with_sink(DeprecationPolicy::Always);
        compat.tmp_dir();
        compat.tmp_dir();
        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|(code, _)| code == DEP0022));
    }

    #[test]
    fn once_policy_emits_single_event() {
        let (compat, sink) = compat_with_sink(DeprecationPolicy::Once);
        compat.tmp_dir();
        compat.tmp_dir();
        compat.tmp_dir();
        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn silent_policy_emits_nothing() {
        let (compat, sink) = compat_with_sink(DeprecationPolicy::Silent);
        compat.tmp_dir();
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[test]
    fn codes_are_tracked_independently_under_once() {
        let (compat, sink) = compat_with_sink(DeprecationPolicy::Once);
        compat.tmp_dir();
        let _ = compat.get_network_interfaces();
        compat.tmp_dir();
        let events = sink.events.lock().unwrap();
        let codes: Vec<_> = events.iter().map(|(code, _)| code.as_str()).collect();
        assert_eq!(codes, [DEP0022, DEP0023]);
    }

    #[test]
    fn network_alias_forwards_result() {
        let (compat, sink) = compat_with_sink(DeprecationPolicy::Always);
        let aliased = compat.get_network_interfaces();
        let current = crate::network_interfaces();
        assert_eq!(aliased.is_ok(), current.is_ok());
        assert_eq!(sink.events.lock().unwrap()[0].0, DEP0023);
    }
}
