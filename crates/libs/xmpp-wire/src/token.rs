//! Token-level view of the inbound XML stream.
//!
//! The decoder never touches bytes: it pulls [`Token`]s from a
//! [`TokenSource`]. [`XmlTokenReader`] is the production source, backed by
//! `quick_xml::NsReader`; a `VecDeque<Token>` serves scripted streams.

use std::collections::VecDeque;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::StreamError;
use crate::name::QName;

const NS_XML: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: QName,
    /// Attributes in document order; namespace declarations are not included.
    pub attributes: Vec<Attribute>,
}

impl StartTag {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, local: &str, value: &str) -> Self {
        self.attributes.push(Attribute {
            name: QName::local(local),
            value: value.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(StartTag),
    End(QName),
    Text(String),
    /// Comments, processing instructions, declarations. Kept only for logging.
    Other(String),
}

pub trait TokenSource {
    /// Read the next token. Read failures are returned as-is and are not
    /// retried.
    fn next_token(&mut self) -> Result<Token, StreamError>;
}

impl TokenSource for VecDeque<Token> {
    fn next_token(&mut self) -> Result<Token, StreamError> {
        self.pop_front().ok_or(StreamError::Eof)
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Result<Token, StreamError> {
        (**self).next_token()
    }
}

/// Namespace-resolving token reader over any buffered byte source.
pub struct XmlTokenReader<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    pending_end: Option<QName>,
}

impl<R: BufRead> XmlTokenReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: NsReader::from_reader(inner),
            buf: Vec::new(),
            pending_end: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<'a> XmlTokenReader<&'a [u8]> {
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> TokenSource for XmlTokenReader<R> {
    fn next_token(&mut self) -> Result<Token, StreamError> {
        // A self-closing tag was reported as a start; finish it.
        if let Some(name) = self.pending_end.take() {
            return Ok(Token::End(name));
        }

        self.buf.clear();
        let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
        let namespace = namespace_of(resolved);

        match event {
            Event::Start(start) => Ok(Token::Start(start_tag(&self.reader, namespace, &start)?)),
            Event::Empty(start) => {
                let tag = start_tag(&self.reader, namespace, &start)?;
                self.pending_end = Some(tag.name.clone());
                Ok(Token::Start(tag))
            }
            Event::End(end) => Ok(Token::End(QName::new(
                namespace,
                String::from_utf8_lossy(end.local_name().as_ref()).into_owned(),
            ))),
            Event::Text(text) => Ok(Token::Text(text.unescape()?.into_owned())),
            Event::CData(data) => {
                Ok(Token::Text(String::from_utf8_lossy(&data.into_inner()).into_owned()))
            }
            Event::Eof => Err(StreamError::Eof),
            other => Ok(Token::Other(format!("{other:?}"))),
        }
    }
}

fn namespace_of(resolved: ResolveResult) -> String {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => String::from_utf8_lossy(ns).into_owned(),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => NS_XML.to_string(),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => String::new(),
    }
}

fn start_tag<R>(
    reader: &NsReader<R>,
    namespace: String,
    start: &BytesStart<'_>,
) -> Result<StartTag, StreamError> {
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, attr_local) = reader.resolve_attribute(attr.key);
        let name = QName::new(
            namespace_of(resolved),
            String::from_utf8_lossy(attr_local.as_ref()).into_owned(),
        );
        let value = attr.unescape_value()?.into_owned();
        attributes.push(Attribute { name, value });
    }
    Ok(StartTag {
        name: QName::new(namespace, local),
        attributes,
    })
}
