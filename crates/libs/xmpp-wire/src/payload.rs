//! The closed set of decode targets.
//!
//! Every registry entry produces a blank [`Payload`]; the decoder then
//! unmarshals the element subtree into it. Shapes owned by collaborators
//! travel in [`Payload::Custom`].

use std::any::Any;
use std::fmt;

use crate::element::Element;
use crate::error::StreamError;
use crate::stanza::{ClientIq, ClientMessage, ClientPresence, StanzaError};
use crate::stream::{
    Bind, SaslAbort, SaslFailure, SaslMechanisms, SaslSuccess, StartTls, StreamErrorElement,
    StreamFeatures, TlsFailure, TlsProceed,
};

/// Fill `self` from a fully-read element. Implementations overwrite the
/// fields they recognize and ignore the rest.
pub trait Unmarshal {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError>;
}

/// Text-only elements such as SASL challenges carry their trimmed content.
impl Unmarshal for String {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        *self = element.text.trim().to_string();
        Ok(())
    }
}

/// A decode target registered by a collaborator outside this crate.
pub trait CustomPayload: Unmarshal + fmt::Debug + Send + 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Unmarshal + fmt::Debug + Send + 'static> CustomPayload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug)]
pub enum Payload {
    Features(StreamFeatures),
    StreamError(StreamErrorElement),
    StartTls(StartTls),
    TlsProceed(TlsProceed),
    TlsFailure(TlsFailure),
    SaslMechanisms(SaslMechanisms),
    SaslChallenge(String),
    SaslResponse(String),
    SaslAbort(SaslAbort),
    SaslSuccess(SaslSuccess),
    SaslFailure(SaslFailure),
    Bind(Bind),
    Message(ClientMessage),
    Presence(ClientPresence),
    Iq(ClientIq),
    StanzaError(StanzaError),
    Custom(Box<dyn CustomPayload>),
}

impl Payload {
    /// Blank custom payload of type `T`, for use in registry factories.
    pub fn custom<T: CustomPayload + Default>() -> Self {
        Self::Custom(Box::<T>::default())
    }

    pub fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        match self {
            Self::Features(features) => features.unmarshal(element),
            Self::StreamError(error) => error.unmarshal(element),
            Self::StartTls(starttls) => starttls.unmarshal(element),
            Self::TlsProceed(proceed) => proceed.unmarshal(element),
            Self::TlsFailure(failure) => failure.unmarshal(element),
            Self::SaslMechanisms(mechanisms) => mechanisms.unmarshal(element),
            Self::SaslChallenge(text) | Self::SaslResponse(text) => text.unmarshal(element),
            Self::SaslAbort(abort) => abort.unmarshal(element),
            Self::SaslSuccess(success) => success.unmarshal(element),
            Self::SaslFailure(failure) => failure.unmarshal(element),
            Self::Bind(bind) => bind.unmarshal(element),
            Self::Message(message) => message.unmarshal(element),
            Self::Presence(presence) => presence.unmarshal(element),
            Self::Iq(iq) => iq.unmarshal(element),
            Self::StanzaError(error) => error.unmarshal(element),
            Self::Custom(custom) => custom.unmarshal(element),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(custom) => custom.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Take ownership of a custom payload of type `T`, handing the payload
    /// back unchanged when it is something else.
    pub fn downcast<T: Any + Default>(self) -> Result<Box<T>, Self> {
        match self {
            Self::Custom(mut custom) => match custom.as_any_mut().downcast_mut::<T>() {
                Some(value) => Ok(Box::new(std::mem::take(value))),
                None => Err(Self::Custom(custom)),
            },
            other => Err(other),
        }
    }
}
