//! XEP-0004 data form wire model.
//!
//! The same [`Form`] type carries the form a server presents and the
//! submission the client sends back; `kind` tells them apart.

use xmpp_wire::{Element, StreamError, Unmarshal};

pub const NS_DATA_FORMS: &str = "jabber:x:data";
/// XEP-0221 media element namespace.
pub const NS_MEDIA: &str = "urn:xmpp:media-element";

pub const FORM_TYPE_SUBMIT: &str = "submit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// `form`, `submit`, `cancel` or `result`.
    pub kind: String,
    pub title: String,
    pub instructions: String,
    pub fields: Vec<FormField>,
}

impl Form {
    /// A submission carrying only projected fields.
    pub fn submission(fields: Vec<FormField>) -> Self {
        Self {
            kind: FORM_TYPE_SUBMIT.to_string(),
            fields,
            ..Self::default()
        }
    }

    pub fn is_submission(&self) -> bool {
        self.kind == FORM_TYPE_SUBMIT
    }

    pub fn field(&self, var: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.var == var)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub var: String,
    /// The declared type tag (`boolean`, `list-single`, ...).
    pub kind: String,
    pub label: String,
    pub description: String,
    pub required: bool,
    /// Empty means the field carries no value at all.
    pub values: Vec<String>,
    pub options: Vec<FieldOption>,
    pub media: Vec<FieldMedia>,
}

impl FormField {
    /// Submission field: a value projection with every descriptive
    /// attribute left empty.
    pub fn value_only(values: Vec<String>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One `<media/>` group: alternative encodings of the same content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMedia {
    pub uris: Vec<MediaUri>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUri {
    pub mime_type: String,
    pub uri: String,
}

impl MediaUri {
    pub fn new(mime_type: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            uri: uri.into(),
        }
    }
}

impl Unmarshal for Form {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        self.kind = element.attr_or_default("type");
        self.title = element.child_text(NS_DATA_FORMS, "title");
        self.instructions = element
            .children_named(NS_DATA_FORMS, "instructions")
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.fields = element
            .children_named(NS_DATA_FORMS, "field")
            .map(field_from)
            .collect();
        Ok(())
    }
}

fn field_from(element: &Element) -> FormField {
    FormField {
        var: element.attr_or_default("var"),
        kind: element.attr_or_default("type"),
        label: element.attr_or_default("label"),
        description: element.child_text(NS_DATA_FORMS, "desc"),
        required: element.has_child(NS_DATA_FORMS, "required"),
        values: element
            .children_named(NS_DATA_FORMS, "value")
            .map(|value| value.text.clone())
            .collect(),
        options: element
            .children_named(NS_DATA_FORMS, "option")
            .map(|option| FieldOption {
                label: option.attr_or_default("label"),
                value: option.child_text(NS_DATA_FORMS, "value"),
            })
            .collect(),
        media: element
            .children_named(NS_MEDIA, "media")
            .map(|media| FieldMedia {
                uris: media
                    .children_named(NS_MEDIA, "uri")
                    .map(|uri| MediaUri {
                        mime_type: uri.attr_or_default("type"),
                        uri: uri.text.trim().to_string(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
