use thiserror::Error;

/// Field checks on a customer row, raised before anything reaches storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{field} required")]
    Required { field: &'static str },
}
