//! Stream-level negotiation shapes: features, stream errors, STARTTLS, SASL
//! and resource binding.

use crate::element::Element;
use crate::error::StreamError;
use crate::name::{QName, NS_BIND, NS_SASL, NS_SESSION, NS_STREAM_ERRORS, NS_TLS};
use crate::payload::Unmarshal;

/// `<stream:features/>` as advertised by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamFeatures {
    pub starttls: Option<StartTls>,
    pub mechanisms: Vec<String>,
    pub bind: bool,
    pub session: bool,
    /// Features this crate has no shape for, kept for negotiation layers.
    pub others: Vec<Element>,
}

impl Unmarshal for StreamFeatures {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        *self = Self::default();
        for child in &element.children {
            if child.name.is(NS_TLS, "starttls") {
                let mut starttls = StartTls::default();
                starttls.unmarshal(child)?;
                self.starttls = Some(starttls);
            } else if child.name.is(NS_SASL, "mechanisms") {
                self.mechanisms = mechanism_names(child);
            } else if child.name.is(NS_BIND, "bind") {
                self.bind = true;
            } else if child.name.is(NS_SESSION, "session") {
                self.session = true;
            } else {
                self.others.push(child.clone());
            }
        }
        Ok(())
    }
}

/// `<stream:error/>`: a defined condition plus optional descriptive text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamErrorElement {
    pub condition: Option<QName>,
    pub text: String,
}

impl Unmarshal for StreamErrorElement {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        let (condition, text) = condition_and_text(element, NS_STREAM_ERRORS);
        self.condition = condition;
        self.text = text;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTls {
    pub required: bool,
}

impl Unmarshal for StartTls {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        self.required = element.has_child(NS_TLS, "required");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsProceed;

impl Unmarshal for TlsProceed {
    fn unmarshal(&mut self, _element: &Element) -> Result<(), StreamError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsFailure;

impl Unmarshal for TlsFailure {
    fn unmarshal(&mut self, _element: &Element) -> Result<(), StreamError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslMechanisms {
    pub mechanisms: Vec<String>,
}

impl SaslMechanisms {
    pub fn supports(&self, mechanism: &str) -> bool {
        self.mechanisms.iter().any(|m| m == mechanism)
    }
}

impl Unmarshal for SaslMechanisms {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        self.mechanisms = mechanism_names(element);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslAbort;

impl Unmarshal for SaslAbort {
    fn unmarshal(&mut self, _element: &Element) -> Result<(), StreamError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslSuccess {
    /// Base64 additional data with success, empty when none was sent.
    pub content: String,
}

impl Unmarshal for SaslSuccess {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        self.content = element.text.trim().to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslFailure {
    pub condition: Option<QName>,
    pub text: String,
}

impl Unmarshal for SaslFailure {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        let (condition, text) = condition_and_text(element, NS_SASL);
        self.condition = condition;
        self.text = text;
        Ok(())
    }
}

/// Resource binding request or result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bind {
    pub resource: String,
    pub jid: String,
}

impl Unmarshal for Bind {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        self.resource = element.child_text(NS_BIND, "resource");
        self.jid = element.child_text(NS_BIND, "jid");
        Ok(())
    }
}

fn mechanism_names(element: &Element) -> Vec<String> {
    element
        .children_named(NS_SASL, "mechanism")
        .map(|mechanism| mechanism.text.trim().to_string())
        .collect()
}

/// Error elements name their condition with an empty child in `namespace`
/// next to an optional `<text/>` in the same namespace.
pub(crate) fn condition_and_text(element: &Element, namespace: &str) -> (Option<QName>, String) {
    let condition = element
        .children
        .iter()
        .find(|child| child.name.namespace == namespace && child.name.local != "text")
        .map(|child| child.name.clone());
    (condition, element.child_text(namespace, "text"))
}
