use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown steering behavior `{0}`")]
pub struct UnknownSteeringKind(pub String);
