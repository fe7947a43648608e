/// Rejections raised by the form engine itself, as opposed to failures the
/// interaction callback reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("field {var:?}: selected option {index} out of range ({options} options)")]
    SelectionOutOfRange {
        var: String,
        index: usize,
        options: usize,
    },
}
