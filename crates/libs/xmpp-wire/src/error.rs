use crate::name::QName;

/// Errors raised while reading and decoding stream elements.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("xml read error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of stream")]
    Eof,

    #[error("unexpected XMPP message {namespace} <{local}/>")]
    UnexpectedElement { namespace: String, local: String },

    #[error("malformed <{element}>: {reason}")]
    Malformed { element: String, reason: String },
}

impl StreamError {
    pub fn unexpected(name: &QName) -> Self {
        Self::UnexpectedElement {
            namespace: name.namespace.clone(),
            local: name.local.clone(),
        }
    }

    pub fn malformed(element: &QName, reason: impl Into<String>) -> Self {
        Self::Malformed {
            element: element.local.clone(),
            reason: reason.into(),
        }
    }

    /// Classification and shape faults leave the token stream usable; the
    /// caller may keep reading. Read faults do not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnexpectedElement { .. } | Self::Malformed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("element {0} is already registered")]
    Duplicate(QName),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}
