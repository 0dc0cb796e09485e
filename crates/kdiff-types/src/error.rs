use thiserror::Error;

/// Errors produced while building nodes from decoded YAML.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unsupported mapping key: {kind} keys cannot be used as field names")]
    UnsupportedKey { kind: &'static str },

    /// Two keys of one mapping name the same field once stringified,
    /// e.g. `1` and `"1"`.
    #[error("duplicate mapping key '{key}'")]
    DuplicateKey { key: String },
}
