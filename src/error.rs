use thiserror::Error;

use crate::gles::ShaderStage;

/// Reasons `init` reports failure to the surface host.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    #[error("could not create {what}: {reason}")]
    ObjectCreation { what: &'static str, reason: String },
    #[error("could not compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("could not link program:\n{log}")]
    Link { log: String },
    #[error("GL error after {call}(): 0x{code:08x}")]
    Gl { call: &'static str, code: u32 },
    #[error("rendering context unavailable: {0}")]
    Context(String),
}

/// A single frame that was skipped. Rendering resumes on the next `step`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("renderer has not been initialized")]
    NotInitialized,
    #[error("renderer has been destroyed")]
    Destroyed,
    #[error("no viewport has been set")]
    NoViewport,
    #[error("degenerate viewport {width}x{height}")]
    DegenerateViewport { width: u32, height: u32 },
    #[error("GL error during frame: 0x{code:08x}")]
    Gl { code: u32 },
}

impl FrameError {
    /// Whether this skip is expected during normal surface transitions and
    /// not worth more than a trace line. Hosts keep stepping after a failed
    /// `init` or a `destroy`, once per frame.
    pub fn is_quiet(&self) -> bool {
        !matches!(self, FrameError::Gl { .. })
    }
}
