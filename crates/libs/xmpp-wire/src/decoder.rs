//! Stream element decoder.
//!
//! This is the one place that decides which protocol element a token is.
//! Everything above it works with [`Payload`] values.

use crate::config::DecoderConfig;
use crate::element::Element;
use crate::error::StreamError;
use crate::name::QName;
use crate::payload::Payload;
use crate::registry::{ConnectionRegistry, Origin, Registry};
use crate::token::{StartTag, Token, TokenSource};

/// What one call to [`StreamDecoder::next_element`] produced.
#[derive(Debug)]
pub enum Body {
    /// A registered element, unmarshaled.
    Payload(Payload),
    /// `</stream:stream>`: the peer closed the stream.
    StreamClose,
    /// Any other end tag. Carries nothing and is not an error.
    End,
}

#[derive(Debug)]
pub struct DecodedElement {
    pub name: QName,
    pub body: Body,
}

impl DecodedElement {
    pub fn payload(&self) -> Option<&Payload> {
        match &self.body {
            Body::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn into_payload(self) -> Option<Payload> {
        match self.body {
            Body::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_stream_close(&self) -> bool {
        matches!(self.body, Body::StreamClose)
    }
}

enum Structural {
    Start(StartTag),
    End(QName),
}

pub struct StreamDecoder<S> {
    source: S,
    overrides: ConnectionRegistry,
    config: DecoderConfig,
}

impl<S: TokenSource> StreamDecoder<S> {
    pub fn new(source: S, overrides: ConnectionRegistry) -> Self {
        Self::with_config(source, overrides, DecoderConfig::default())
    }

    pub fn with_config(source: S, overrides: ConnectionRegistry, config: DecoderConfig) -> Self {
        Self {
            source,
            overrides,
            config,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.overrides
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Read and classify the next start or end tag.
    ///
    /// Start tags are looked up in the override registry, then the defaults,
    /// and their subtree is unmarshaled into a fresh shape. An unregistered
    /// start tag fails with [`StreamError::UnexpectedElement`]; its subtree is
    /// left unread. Read faults are returned immediately.
    pub fn next_element(&mut self) -> Result<DecodedElement, StreamError> {
        let structural = self.next_structural()?;

        // Held until the subtree is unmarshaled, not just for the lookup.
        let overrides = self.overrides.lock();
        match structural {
            Structural::Start(tag) => {
                decode_start(&mut self.source, &overrides, tag, self.config.max_depth)
            }
            Structural::End(name) => Ok(decode_end(name)),
        }
    }

    /// Skip ahead to the next start tag without decoding it. Used to read
    /// the `<stream:stream>` header, which is never closed mid-session.
    pub fn next_start(&mut self) -> Result<StartTag, StreamError> {
        loop {
            if let Structural::Start(tag) = self.next_structural()? {
                return Ok(tag);
            }
        }
    }

    fn next_structural(&mut self) -> Result<Structural, StreamError> {
        loop {
            match self.source.next_token()? {
                Token::Start(tag) => return Ok(Structural::Start(tag)),
                Token::End(name) => return Ok(Structural::End(name)),
                // RFC 6120 §4.6.1 whitespace keepalive.
                Token::Text(text) if text == " " => {
                    if self.config.log_keepalives {
                        log::debug!("xmpp: received whitespace ping");
                    }
                }
                Token::Text(text) => {
                    if self.config.log_unhandled_tokens {
                        log::debug!("xmpp: received unhandled character data: {text:?}");
                    }
                }
                Token::Other(other) => {
                    if self.config.log_unhandled_tokens {
                        log::debug!("xmpp: received unhandled element: {other}");
                    }
                }
            }
        }
    }
}

fn decode_start<S: TokenSource + ?Sized>(
    source: &mut S,
    overrides: &Registry,
    tag: StartTag,
    max_depth: usize,
) -> Result<DecodedElement, StreamError> {
    let Some((factory, origin)) = overrides.classify(&tag.name) else {
        return Err(StreamError::unexpected(&tag.name));
    };
    match origin {
        Origin::Override => log::trace!("xmpp: decoding {} via connection override", tag.name),
        Origin::Default => log::trace!("xmpp: decoding {}", tag.name),
    }

    let name = tag.name.clone();
    let element = Element::read(source, tag, max_depth)?;
    let mut payload = factory();
    payload.unmarshal(&element)?;
    Ok(DecodedElement {
        name,
        body: Body::Payload(payload),
    })
}

fn decode_end(name: QName) -> DecodedElement {
    let body = if name == QName::stream() {
        Body::StreamClose
    } else {
        Body::End
    };
    DecodedElement { name, body }
}
