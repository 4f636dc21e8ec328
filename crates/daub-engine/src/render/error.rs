use thiserror::Error;

/// Fatal rasterizer initialization failures.
///
/// Either one ends the painting session before any frame is drawn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("shader program failed to build: {0}")]
    ShaderCompileError(String),
}
