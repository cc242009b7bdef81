//! Error types for deck construction, validation and rendering.

use thiserror::Error;

/// Errors that can occur while building or emitting a deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Kinetic energy outside the domain of the kinematic formulas
    #[error("Invalid kinetic energy: {0} keV (must be finite and >= 0)")]
    InvalidEnergy(f64),

    /// Indexed component lookup past the end of the list
    #[error("Requested {component} #{index}, but only {available} available")]
    ComponentIndex {
        component: &'static str,
        index: usize,
        available: usize,
    },

    /// Deck failed pre-flight validation
    #[error("Validation failed with {errors} error(s): {summary}")]
    Validation { errors: usize, summary: String },

    /// Value cannot be written as a namelist literal
    #[error("Render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure while reading or writing a deck
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    /// Creates a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Creates a component index error.
    pub fn component_index(component: &'static str, index: usize, available: usize) -> Self {
        Self::ComponentIndex {
            component,
            index,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_index_message() {
        let err = DeckError::component_index("Species", 3, 2);
        assert_eq!(err.to_string(), "Requested Species #3, but only 2 available");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: DeckError = parse.unwrap_err().into();
        assert!(matches!(err, DeckError::Json(_)));
    }
}
