//! The three `jabber:client` stanza kinds and the stanza-level error.

use crate::element::Element;
use crate::error::StreamError;
use crate::name::{QName, NS_CLIENT, NS_STANZAS};
use crate::payload::Unmarshal;
use crate::stream::condition_and_text;

/// `<error/>` inside a stanza of type `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StanzaError {
    pub code: String,
    pub kind: String,
    pub condition: Option<QName>,
    pub text: String,
}

impl Unmarshal for StanzaError {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        let (condition, text) = condition_and_text(element, NS_STANZAS);
        self.code = element.attr_or_default("code");
        self.kind = element.attr_or_default("type");
        self.condition = condition;
        self.text = text;
        Ok(())
    }
}

/// Routing attributes shared by every stanza.
fn routing(element: &Element) -> (String, String, String, String) {
    (
        element.attr_or_default("from"),
        element.attr_or_default("id"),
        element.attr_or_default("to"),
        element.attr_or_default("type"),
    )
}

fn stanza_error(element: &Element) -> Result<Option<StanzaError>, StreamError> {
    element
        .child(NS_CLIENT, "error")
        .map(|child| {
            let mut error = StanzaError::default();
            error.unmarshal(child).map(|()| error)
        })
        .transpose()
}

fn extensions(element: &Element, known: &[&str]) -> Vec<Element> {
    element
        .children
        .iter()
        .filter(|child| !(child.name.namespace == NS_CLIENT && known.contains(&child.name.local.as_str())))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMessage {
    pub from: String,
    pub id: String,
    pub to: String,
    pub kind: String,
    pub lang: String,
    pub subject: String,
    pub body: String,
    pub thread: String,
    pub error: Option<StanzaError>,
    /// Payloads outside `jabber:client` (receipts, chat states, forms...).
    pub extensions: Vec<Element>,
}

impl Unmarshal for ClientMessage {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        (self.from, self.id, self.to, self.kind) = routing(element);
        self.lang = element.attr_any_ns("lang").unwrap_or_default().to_string();
        self.subject = element.child_text(NS_CLIENT, "subject");
        self.body = element.child_text(NS_CLIENT, "body");
        self.thread = element.child_text(NS_CLIENT, "thread");
        self.error = stanza_error(element)?;
        self.extensions = extensions(element, &["subject", "body", "thread", "error"]);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPresence {
    pub from: String,
    pub id: String,
    pub to: String,
    pub kind: String,
    pub lang: String,
    pub show: String,
    pub status: String,
    pub priority: i8,
    pub error: Option<StanzaError>,
    pub extensions: Vec<Element>,
}

impl Unmarshal for ClientPresence {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        (self.from, self.id, self.to, self.kind) = routing(element);
        self.lang = element.attr_any_ns("lang").unwrap_or_default().to_string();
        self.show = element.child_text(NS_CLIENT, "show");
        self.status = element.child_text(NS_CLIENT, "status");
        let priority = element.child_text(NS_CLIENT, "priority");
        let priority = priority.trim();
        self.priority = if priority.is_empty() {
            0
        } else {
            priority.parse().map_err(|_| {
                StreamError::malformed(&element.name, format!("invalid priority {priority:?}"))
            })?
        };
        self.error = stanza_error(element)?;
        self.extensions = extensions(element, &["show", "status", "priority", "error"]);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIq {
    pub from: String,
    pub id: String,
    pub to: String,
    pub kind: String,
    /// The single child payload of a get/set/result, if any.
    pub query: Option<Element>,
    pub error: Option<StanzaError>,
}

impl Unmarshal for ClientIq {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        (self.from, self.id, self.to, self.kind) = routing(element);
        self.query = element
            .children
            .iter()
            .find(|child| !child.name.is(NS_CLIENT, "error"))
            .cloned();
        self.error = stanza_error(element)?;
        Ok(())
    }
}
