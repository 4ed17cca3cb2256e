use thiserror::Error;

use tavola_providers::ProviderError;

/// Turn-level failures surfaced to the transport layer.
///
/// Every variant carries enough structure (a stable kind plus a human
/// message) for the transport to render an explanation without
/// inspecting internals. An unsatisfiable collection request is not an
/// error: it is answered with a normal user-visible message.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("search provider failed: {0}")]
    Provider(#[source] ProviderError),

    #[error("authentication required: {0}")]
    Auth(String),

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
}

impl EngineError {
    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Input(_) => "input_error",
            EngineError::Provider(_) => "provider_error",
            EngineError::Auth(_) => "auth_error",
            EngineError::ModelUnavailable(_) => "model_unavailable",
        }
    }

    /// Generic user-facing explanation for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            EngineError::Input(_) => {
                "I couldn't make sense of that. Try asking for restaurants by cuisine or place."
            }
            EngineError::Provider(_) => {
                "The restaurant service isn't responding right now. Please try again shortly."
            }
            EngineError::Auth(_) => {
                "Creating a collection needs a valid sign-in token. Please sign in and retry."
            }
            EngineError::ModelUnavailable(_) => {
                "I'm having trouble thinking right now. Please try again in a moment."
            }
        }
    }
}

/// Map a collaborator failure onto the turn-level taxonomy.
pub(crate) fn map_provider(error: ProviderError) -> EngineError {
    match error {
        ProviderError::Auth(message) => EngineError::Auth(message),
        ProviderError::Unavailable(message) => EngineError::ModelUnavailable(message),
        other => EngineError::Provider(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(EngineError::Input("x".into()).kind(), "input_error");
        assert_eq!(EngineError::Auth("x".into()).kind(), "auth_error");
        assert_eq!(EngineError::ModelUnavailable("x".into()).kind(), "model_unavailable");
    }

    #[test]
    fn auth_provider_errors_map_to_auth() {
        let mapped = map_provider(ProviderError::Auth("bad token".into()));
        assert!(matches!(mapped, EngineError::Auth(_)));
    }
}
