//! Error taxonomy for the roadmap pipeline.
//!
//! Two things can go wrong end to end: the call to the inference provider
//! fails, or the completion it returns cannot be turned into a valid
//! [`Roadmap`](crate::schema::Roadmap). Both are caught at the top of `main`
//! and reported to the console; neither aborts the process with a panic.

/// Error produced anywhere between sending the prompt and holding a
/// validated roadmap.
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    /// The inference provider call failed: network, auth, rate limit, a
    /// non-success HTTP status, or an error object in the response body.
    #[error("inference request failed: {0}")]
    Transport(String),

    /// The provider answered but the completion carried no text content.
    #[error("model returned an empty completion")]
    EmptyCompletion,

    /// The repaired completion failed schema validation: a required field is
    /// missing, a field has the wrong type, or a resource link is not a
    /// well-formed URL. The message is the human-readable diagnostic shown
    /// to the operator.
    #[error("{0}")]
    Validation(String),
}
