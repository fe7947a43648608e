//! Field-kind conversion: one raw [`FormField`] to at most one handle.

use crate::bob::{self, BobData};
use crate::handle::{
    BooleanField, FieldHandle, FieldInfo, HiddenField, Media, MultiSelectionField,
    MultiTextField, SingleSelectionField, SingleTextField,
};
use crate::model::FormField;

/// Declared field type, parsed from the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Fixed,
    Boolean,
    ListSingle,
    ListMulti,
    JidMulti,
    TextMulti,
    Hidden,
    TextSingle,
    TextPrivate,
    JidSingle,
    /// Any tag outside XEP-0004. Presented as single-line text.
    Unknown,
}

impl FieldKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fixed" => Self::Fixed,
            "boolean" => Self::Boolean,
            "list-single" => Self::ListSingle,
            "list-multi" => Self::ListMulti,
            "jid-multi" => Self::JidMulti,
            "text-multi" => Self::TextMulti,
            "hidden" => Self::Hidden,
            "text-single" => Self::TextSingle,
            "text-private" => Self::TextPrivate,
            "jid-single" => Self::JidSingle,
            _ => Self::Unknown,
        }
    }
}

/// Build the handle for `field`, resolving `cid:` media against `blobs`.
///
/// Returns `None` for purely descriptive (`fixed`) fields.
pub fn convert_field(field: &FormField, blobs: &[BobData]) -> Option<FieldHandle> {
    let kind = FieldKind::from_tag(&field.kind);
    let info = || field_info(field, blobs);
    let handle = match kind {
        FieldKind::Fixed => return None,
        FieldKind::Boolean => FieldHandle::Boolean(BooleanField {
            info: info(),
            result: false,
        }),
        FieldKind::ListSingle => FieldHandle::SingleSelection(SingleSelectionField {
            info: info(),
            options: field.options.clone(),
            selected: 0,
        }),
        FieldKind::ListMulti => FieldHandle::MultiSelection(MultiSelectionField {
            info: info(),
            options: field.options.clone(),
            selected: Vec::new(),
        }),
        FieldKind::JidMulti | FieldKind::TextMulti => FieldHandle::MultiText(MultiTextField {
            info: info(),
            defaults: field.values.clone(),
            results: Vec::new(),
        }),
        FieldKind::Hidden => FieldHandle::Hidden(HiddenField {
            info: info(),
            values: field.values.clone(),
        }),
        FieldKind::TextSingle | FieldKind::TextPrivate | FieldKind::JidSingle | FieldKind::Unknown => {
            if kind == FieldKind::Unknown {
                log::debug!(
                    "forms: field {:?} has unknown type {:?}, presenting as text",
                    field.var,
                    field.kind
                );
            }
            FieldHandle::SingleText(SingleTextField {
                info: info(),
                default: field.values.first().cloned(),
                private: kind == FieldKind::TextPrivate,
                result: String::new(),
            })
        }
    };
    Some(handle)
}

fn field_info(field: &FormField, blobs: &[BobData]) -> FieldInfo {
    FieldInfo {
        var: field.var.clone(),
        label: field.label.clone(),
        description: field.description.clone(),
        required: field.required,
        media: field
            .media
            .iter()
            .map(|group| {
                group
                    .uris
                    .iter()
                    .map(|uri| Media {
                        mime_type: uri.mime_type.clone(),
                        uri: uri.uri.clone(),
                        data: bob::resolve(&uri.uri, blobs),
                    })
                    .collect()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldMedia, FieldOption, MediaUri};

    fn field(kind: &str) -> FormField {
        FormField {
            var: "v".into(),
            kind: kind.into(),
            label: "Label".into(),
            ..FormField::default()
        }
    }

    #[test]
    fn fixed_fields_produce_no_handle() {
        let mut fixed = field("fixed");
        fixed.values = vec!["Something".into()];
        assert!(convert_field(&fixed, &[]).is_none());
    }

    #[test]
    fn tags_map_to_handle_kinds() {
        let cases = [
            ("boolean", "boolean"),
            ("list-single", "single-selection"),
            ("list-multi", "multi-selection"),
            ("jid-multi", "multi-text"),
            ("text-multi", "multi-text"),
            ("hidden", "hidden"),
            ("text-single", "single-text"),
            ("jid-single", "single-text"),
            ("text-private", "single-text"),
            ("another-fancy-type", "single-text"),
            ("", "single-text"),
        ];
        for (tag, expected) in cases {
            let handle = convert_field(&field(tag), &[]).expect("handle");
            assert_eq!(handle.kind(), expected, "tag {tag:?}");
            assert_eq!(handle.info().label, "Label");
        }
    }

    #[test]
    fn text_handles_start_empty_and_expose_defaults() {
        let mut source = field("text-private");
        source.values = vec!["hunter2".into(), "ignored".into()];
        let Some(FieldHandle::SingleText(text)) = convert_field(&source, &[]) else {
            panic!("expected single text");
        };
        assert!(text.result.is_empty());
        assert!(text.private);
        assert_eq!(text.default.as_deref(), Some("hunter2"));
    }

    #[test]
    fn selections_start_at_first_option_and_empty() {
        let mut source = field("list-single");
        source.options = vec![FieldOption::new("L1", "V1"), FieldOption::new("L2", "V2")];
        let Some(FieldHandle::SingleSelection(single)) = convert_field(&source, &[]) else {
            panic!("expected single selection");
        };
        assert_eq!(single.selected, 0);
        assert_eq!(single.options.len(), 2);

        source.kind = "list-multi".into();
        let Some(FieldHandle::MultiSelection(multi)) = convert_field(&source, &[]) else {
            panic!("expected multi selection");
        };
        assert!(multi.selected.is_empty());
    }

    #[test]
    fn media_groups_keep_every_uri_and_resolve_cid_data() {
        let mut source = field("boolean");
        source.media = vec![
            FieldMedia {
                uris: vec![
                    MediaUri::new("image/png", "cid:img"),
                    MediaUri::new("image/png", "https://example.org/img.png"),
                ],
            },
            FieldMedia {
                uris: vec![MediaUri::new("audio/ogg", "cid:unknown")],
            },
        ];
        let blobs = [BobData::new("img", "aGVsbG8=")];

        let handle = convert_field(&source, &blobs).expect("handle");
        let media = &handle.info().media;
        assert_eq!(media.len(), 2);
        assert_eq!(media[0][0].data.as_deref(), Some(&b"hello"[..]));
        assert_eq!(media[0][1].data, None);
        assert_eq!(media[0][1].uri, "https://example.org/img.png");
        assert_eq!(media[1][0].mime_type, "audio/ogg");
        assert_eq!(media[1][0].data, None);
    }
}
