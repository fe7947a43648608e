//! Qualified-name type registries.
//!
//! Lookups consult the connection-scoped [`ConnectionRegistry`] first and the
//! process-wide [`Registry::defaults`] second. An override wins by priority
//! only; the two are never merged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::error::RegistryError;
use crate::name::{QName, NS_BIND, NS_CLIENT, NS_SASL, NS_STREAM, NS_TLS};
use crate::payload::Payload;
use crate::stanza::{ClientIq, ClientMessage, ClientPresence, StanzaError};
use crate::stream::{
    Bind, SaslAbort, SaslFailure, SaslMechanisms, SaslSuccess, StartTls, StreamErrorElement,
    StreamFeatures, TlsFailure, TlsProceed,
};

/// Produces the blank shape an element is unmarshaled into.
pub type Factory = fn() -> Payload;

/// Which registry classified an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Override,
    Default,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<QName, Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A name may be registered once per registry.
    pub fn register(&mut self, name: QName, factory: Factory) -> Result<(), RegistryError> {
        if self.entries.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.entries.insert(name, factory);
        Ok(())
    }

    pub fn lookup(&self, name: &QName) -> Option<Factory> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &QName) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&QName> {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        names
    }

    /// The base-protocol shapes. Built once, never mutated.
    pub fn defaults() -> &'static Registry {
        static DEFAULTS: OnceLock<Registry> = OnceLock::new();
        DEFAULTS.get_or_init(build_defaults)
    }

    /// Look `name` up in `self` as the override registry, then in the
    /// defaults.
    pub fn classify(&self, name: &QName) -> Option<(Factory, Origin)> {
        if let Some(factory) = self.lookup(name) {
            return Some((factory, Origin::Override));
        }
        Self::defaults().lookup(name).map(|factory| (factory, Origin::Default))
    }
}

fn build_defaults() -> Registry {
    let shapes: [(&str, &str, Factory); 16] = [
        (NS_STREAM, "features", || Payload::Features(StreamFeatures::default())),
        (NS_STREAM, "error", || Payload::StreamError(StreamErrorElement::default())),
        (NS_TLS, "starttls", || Payload::StartTls(StartTls::default())),
        (NS_TLS, "proceed", || Payload::TlsProceed(TlsProceed)),
        (NS_TLS, "failure", || Payload::TlsFailure(TlsFailure)),
        (NS_SASL, "mechanisms", || Payload::SaslMechanisms(SaslMechanisms::default())),
        (NS_SASL, "challenge", || Payload::SaslChallenge(String::new())),
        (NS_SASL, "response", || Payload::SaslResponse(String::new())),
        (NS_SASL, "abort", || Payload::SaslAbort(SaslAbort)),
        (NS_SASL, "success", || Payload::SaslSuccess(SaslSuccess::default())),
        (NS_SASL, "failure", || Payload::SaslFailure(SaslFailure::default())),
        (NS_BIND, "bind", || Payload::Bind(Bind::default())),
        (NS_CLIENT, "message", || Payload::Message(ClientMessage::default())),
        (NS_CLIENT, "presence", || Payload::Presence(ClientPresence::default())),
        (NS_CLIENT, "iq", || Payload::Iq(ClientIq::default())),
        (NS_CLIENT, "error", || Payload::StanzaError(StanzaError::default())),
    ];

    let entries = shapes
        .into_iter()
        .map(|(namespace, local, factory)| (QName::new(namespace, local), factory))
        .collect();
    Registry { entries }
}

/// Connection-scoped override registry.
///
/// Clones share one lock-protected registry. The decoder holds the lock
/// across classify-and-unmarshal, so a registration never lands in the
/// middle of decoding an element.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: QName, factory: Factory) -> Result<(), RegistryError> {
        log::debug!("registry: installing override for {name}");
        self.lock().register(name, factory)
    }

    pub fn contains(&self, name: &QName) -> bool {
        self.lock().contains(name)
    }

    /// The registry holds plain data, so a panic elsewhere cannot leave it
    /// half-written; poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
