// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology resolution.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a loop topology.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The queried loop is absent from PlantLoop, CondenserLoop and AirLoopHVAC.
    #[error("loop '{0}' not found in PlantLoop, CondenserLoop or AirLoopHVAC")]
    LoopNotFound(String),

    /// A referenced object could not be read from the model.
    #[error(transparent)]
    Model(#[from] eplus_lite_core::Error),

    /// An object is structurally invalid (odd ConnectorList, unknown connector type).
    #[error("malformed {object_type} '{name}': {reason}")]
    Malformed {
        object_type: String,
        name: String,
        reason: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn malformed(object_type: &str, name: &str, reason: impl Into<String>) -> Self {
        Error::Malformed {
            object_type: object_type.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for missing loops and missing referenced objects.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::LoopNotFound(_) | Error::Model(eplus_lite_core::Error::NotFound { .. })
        )
    }

    /// Returns true for structurally invalid objects.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed { .. })
    }
}
