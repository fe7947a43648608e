//! Form processing: convert, hand to the caller, collect the submission.

use crate::bob::BobData;
use crate::convert::convert_field;
use crate::error::FormError;
use crate::handle::FieldHandle;
use crate::model::Form;

/// Drive `callback` over the interactive fields of `form` and build the
/// submission from whatever it left in the handles.
///
/// The callback runs exactly once with the form's title, its instructions
/// and one handle per non-`fixed` field, in field order. It may edit any
/// handle in place; the slice cannot grow, shrink or be reordered.
///
/// A callback failure is returned exactly as the callback produced it.
/// Rejections raised while collecting (a selection index outside its
/// options) are converted into `E`.
///
/// The submission has type `submit` and one value-only field per handle.
/// Title and instructions are not carried over.
pub fn process<F, E>(form: &Form, blobs: &[BobData], callback: F) -> Result<Form, E>
where
    F: FnOnce(&str, &str, &mut [FieldHandle]) -> Result<(), E>,
    E: From<FormError>,
{
    let mut handles: Vec<FieldHandle> =
        form.fields.iter().filter_map(|field| convert_field(field, blobs)).collect();

    callback(&form.title, &form.instructions, &mut handles)?;

    let fields = handles
        .iter()
        .map(FieldHandle::to_submission)
        .collect::<Result<Vec<_>, FormError>>()?;
    Ok(Form::submission(fields))
}
