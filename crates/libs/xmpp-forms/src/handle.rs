//! Field handles: the typed, callback-editable view of interactive fields.

use crate::error::FormError;
use crate::model::{FieldOption, FormField};

/// A media reference with its inline data, when the data could be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    pub mime_type: String,
    pub uri: String,
    pub data: Option<Vec<u8>>,
}

/// Descriptive metadata every handle carries for presentation. None of it
/// is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInfo {
    pub var: String,
    pub label: String,
    pub description: String,
    pub required: bool,
    /// One inner list per media group of the source field.
    pub media: Vec<Vec<Media>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanField {
    pub info: FieldInfo,
    pub result: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleSelectionField {
    pub info: FieldInfo,
    pub options: Vec<FieldOption>,
    /// Index into `options`; starts at the first option.
    pub selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSelectionField {
    pub info: FieldInfo,
    pub options: Vec<FieldOption>,
    /// Indices into `options`, submitted in this order.
    pub selected: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiTextField {
    pub info: FieldInfo,
    /// Values the server supplied. Shown to the user, never submitted.
    pub defaults: Vec<String>,
    pub results: Vec<String>,
}

/// Hidden fields pass through untouched and never contribute a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenField {
    pub info: FieldInfo,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleTextField {
    pub info: FieldInfo,
    /// First value the server supplied. Shown to the user, never submitted.
    pub default: Option<String>,
    /// Set for `text-private` fields, which should be masked on input.
    pub private: bool,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldHandle {
    Boolean(BooleanField),
    SingleSelection(SingleSelectionField),
    MultiSelection(MultiSelectionField),
    MultiText(MultiTextField),
    Hidden(HiddenField),
    SingleText(SingleTextField),
}

impl FieldHandle {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::SingleSelection(_) => "single-selection",
            Self::MultiSelection(_) => "multi-selection",
            Self::MultiText(_) => "multi-text",
            Self::Hidden(_) => "hidden",
            Self::SingleText(_) => "single-text",
        }
    }

    pub fn info(&self) -> &FieldInfo {
        match self {
            Self::Boolean(field) => &field.info,
            Self::SingleSelection(field) => &field.info,
            Self::MultiSelection(field) => &field.info,
            Self::MultiText(field) => &field.info,
            Self::Hidden(field) => &field.info,
            Self::SingleText(field) => &field.info,
        }
    }

    /// The values this handle submits in its current state.
    pub fn submitted_values(&self) -> Result<Vec<String>, FormError> {
        match self {
            Self::Boolean(field) => Ok(vec![field.result.to_string()]),
            Self::SingleSelection(field) => {
                if field.options.is_empty() && field.selected == 0 {
                    return Ok(Vec::new());
                }
                option_value(&field.info, &field.options, field.selected).map(|value| vec![value])
            }
            Self::MultiSelection(field) => field
                .selected
                .iter()
                .map(|&index| option_value(&field.info, &field.options, index))
                .collect(),
            Self::MultiText(field) => Ok(field.results.clone()),
            Self::Hidden(_) => Ok(Vec::new()),
            Self::SingleText(field) => Ok(vec![field.result.clone()]),
        }
    }

    /// Project into a submission field.
    pub fn to_submission(&self) -> Result<FormField, FormError> {
        self.submitted_values().map(FormField::value_only)
    }
}

fn option_value(
    info: &FieldInfo,
    options: &[FieldOption],
    index: usize,
) -> Result<String, FormError> {
    options
        .get(index)
        .map(|option| option.value.clone())
        .ok_or_else(|| FormError::SelectionOutOfRange {
            var: info.var.clone(),
            index,
            options: options.len(),
        })
}
