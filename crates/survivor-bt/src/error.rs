use thiserror::Error;

/// Tree construction errors. These are configuration mistakes and surface
/// when the tree is built, never during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BtError {
    #[error("root selector has no children")]
    EmptyRoot,

    #[error("root selector must end with an unconditional default action")]
    NoFallback,
}
