//! Fully-read element subtrees, the input every wire shape unmarshals from.

use crate::error::StreamError;
use crate::name::QName;
use crate::token::{Attribute, StartTag, Token, TokenSource};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    /// Concatenated character data directly inside this element.
    pub text: String,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, local: &str, value: &str) -> Self {
        self.attributes.push(Attribute {
            name: QName::local(local),
            value: value.to_string(),
        });
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    /// Unqualified attribute value.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.namespace.is_empty() && attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    /// Attribute value matched by local name in any namespace (`xml:lang`).
    pub fn attr_any_ns(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    pub fn attr_or_default(&self, local: &str) -> String {
        self.attr(local).unwrap_or_default().to_string()
    }

    pub fn child(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name.is(namespace, local))
    }

    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name.is(namespace, local))
    }

    pub fn has_child(&self, namespace: &str, local: &str) -> bool {
        self.child(namespace, local).is_some()
    }

    pub fn child_text(&self, namespace: &str, local: &str) -> String {
        self.child(namespace, local).map(|child| child.text.clone()).unwrap_or_default()
    }

    /// First child bound to `namespace`, whatever its local name. Used for
    /// condition elements such as `<not-authorized/>`.
    pub fn first_child_in(&self, namespace: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name.namespace == namespace)
    }

    /// Read the rest of the subtree opened by `start` from `source`.
    ///
    /// Consumes tokens up to and including the matching end tag. Nesting
    /// deeper than `max_depth` below `start` is rejected, after the rest of
    /// the subtree has been consumed, so the source is left at the next
    /// sibling either way.
    pub fn read<S: TokenSource + ?Sized>(
        source: &mut S,
        start: StartTag,
        max_depth: usize,
    ) -> Result<Self, StreamError> {
        let mut stack = vec![Element {
            name: start.name,
            attributes: start.attributes,
            ..Element::default()
        }];

        loop {
            match source.next_token()? {
                Token::Start(tag) => {
                    if stack.len() > max_depth {
                        skip_open(source, stack.len() + 1)?;
                        return Err(StreamError::malformed(
                            &stack[0].name,
                            format!("nesting deeper than {max_depth}"),
                        ));
                    }
                    stack.push(Element {
                        name: tag.name,
                        attributes: tag.attributes,
                        ..Element::default()
                    });
                }
                Token::End(name) => {
                    let Some(done) = stack.pop() else {
                        return Err(StreamError::malformed(&name, "unbalanced end tag"));
                    };
                    if done.name != name {
                        return Err(StreamError::malformed(
                            &done.name,
                            format!("closed by {name}"),
                        ));
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(done),
                        None => return Ok(done),
                    }
                }
                Token::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Token::Other(_) => {}
            }
        }
    }
}

/// Discard tokens until `open` currently-open elements have all closed.
fn skip_open<S: TokenSource + ?Sized>(source: &mut S, mut open: usize) -> Result<(), StreamError> {
    while open > 0 {
        match source.next_token()? {
            Token::Start(_) => open += 1,
            Token::End(_) => open -= 1,
            Token::Text(_) | Token::Other(_) => {}
        }
    }
    Ok(())
}
