// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model access.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or reading a model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named object is absent from its type collection.
    #[error("{object_type} '{name}' not found")]
    NotFound { object_type: String, name: String },

    /// The document is not an epJSON object map.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(object_type: &str, name: &str) -> Self {
        Error::NotFound {
            object_type: object_type.to_string(),
            name: name.to_string(),
        }
    }
}
