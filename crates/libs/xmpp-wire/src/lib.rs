//! # xmpp-wire
//!
//! Inbound wire layer of an XMPP client: classifies stream elements by
//! qualified name and decodes them into typed values.
//!
//! ## Decoding pipeline
//!
//! ```text
//! bytes -> XmlTokenReader -> StreamDecoder -> registry lookup -> Payload
//!                              |                (override, then default)
//!                              +-- keepalives / comments are skipped
//! ```
//!
//! - [`TokenSource`] yields start tags, end tags and character data.
//! - [`StreamDecoder::next_element`] classifies the next start or end tag.
//!   Start tags are looked up in the connection's [`ConnectionRegistry`],
//!   then in [`Registry::defaults`], and their subtree is unmarshaled into
//!   the shape the registry produced.
//! - `</stream:stream>` yields [`Body::StreamClose`]; other end tags yield
//!   [`Body::End`].
//!
//! ## Example
//!
//! ```rust
//! use xmpp_wire::{Body, ConnectionRegistry, Payload, StreamDecoder, XmlTokenReader};
//!
//! let xml = "<stream:stream xmlns:stream='http://etherx.jabber.org/streams' \
//!            xmlns='jabber:client'> <message from='a@b/c'><body>hi</body></message>\
//!            </stream:stream>";
//! let mut decoder = StreamDecoder::new(XmlTokenReader::from_str(xml), ConnectionRegistry::new());
//!
//! let header = decoder.next_start().unwrap();
//! assert_eq!(header.name.local, "stream");
//!
//! let decoded = decoder.next_element().unwrap();
//! let Body::Payload(Payload::Message(message)) = decoded.body else { panic!() };
//! assert_eq!(message.body, "hi");
//!
//! assert!(decoder.next_element().unwrap().is_stream_close());
//! ```

pub mod config;
pub mod decoder;
pub mod element;
pub mod error;
pub mod name;
pub mod payload;
pub mod registry;
pub mod stanza;
pub mod stream;
pub mod token;

pub use config::DecoderConfig;
pub use decoder::{Body, DecodedElement, StreamDecoder};
pub use element::Element;
pub use error::{ConfigError, RegistryError, StreamError};
pub use name::QName;
pub use payload::{CustomPayload, Payload, Unmarshal};
pub use registry::{ConnectionRegistry, Factory, Origin, Registry};
pub use token::{Attribute, StartTag, Token, TokenSource, XmlTokenReader};
