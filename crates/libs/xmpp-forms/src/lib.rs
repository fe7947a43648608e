//! # xmpp-forms
//!
//! XEP-0004 data forms for an XMPP client.
//!
//! A server-presented [`Form`] is turned into typed [`FieldHandle`]s, an
//! application callback edits them, and the edits are collected into a
//! `submit` form:
//!
//! ```text
//! Form --convert_field--> [FieldHandle] --callback--> [FieldHandle] --to_submission--> Form{submit}
//!           |
//!           +-- cid: media resolved against XEP-0231 BobData
//! ```
//!
//! ## Field kinds
//!
//! | type tag                    | handle            | untouched submission |
//! |-----------------------------|-------------------|----------------------|
//! | `fixed`                     | none              | field omitted        |
//! | `boolean`                   | `Boolean`         | `["false"]`          |
//! | `list-single`               | `SingleSelection` | first option value   |
//! | `list-multi`                | `MultiSelection`  | no value             |
//! | `jid-multi`, `text-multi`   | `MultiText`       | no value             |
//! | `hidden`                    | `Hidden`          | no value, always     |
//! | anything else               | `SingleText`      | `[""]`               |
//!
//! ## Example
//!
//! ```rust
//! use xmpp_forms::{process, FieldHandle, Form, FormError, FormField};
//!
//! let form = Form {
//!     kind: "form".into(),
//!     fields: vec![FormField { var: "tos".into(), kind: "boolean".into(), ..FormField::default() }],
//!     ..Form::default()
//! };
//!
//! let submission = process(&form, &[], |_title, _instructions, handles| {
//!     if let FieldHandle::Boolean(accepted) = &mut handles[0] {
//!         accepted.result = true;
//!     }
//!     Ok::<_, FormError>(())
//! })
//! .unwrap();
//!
//! assert_eq!(submission.kind, "submit");
//! assert_eq!(submission.fields[0].values, vec!["true"]);
//! ```

pub mod bob;
pub mod convert;
pub mod error;
pub mod handle;
pub mod model;
pub mod process;

pub use bob::{BobData, NS_BOB};
pub use convert::{convert_field, FieldKind};
pub use error::FormError;
pub use handle::{
    BooleanField, FieldHandle, FieldInfo, HiddenField, Media, MultiSelectionField,
    MultiTextField, SingleSelectionField, SingleTextField,
};
pub use model::{FieldMedia, FieldOption, Form, FormField, MediaUri, NS_DATA_FORMS, NS_MEDIA};
pub use process::process;

use xmpp_wire::{ConnectionRegistry, Payload, QName, RegistryError};

/// Make `<x xmlns='jabber:x:data'/>` and `<data xmlns='urn:xmpp:bob'/>`
/// decodable on this connection.
pub fn register(registry: &ConnectionRegistry) -> Result<(), RegistryError> {
    registry.register(QName::new(NS_DATA_FORMS, "x"), Payload::custom::<Form>)?;
    registry.register(QName::new(NS_BOB, "data"), Payload::custom::<BobData>)?;
    Ok(())
}
