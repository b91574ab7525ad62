/// Read-only host access.
///
/// The core crate does not prescribe which queries a host exposes; the agent
/// crate defines extension traits on top of this seam.
pub trait WorldView {}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
