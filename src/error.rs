//! Errors reported at the [`ShadingStages`](crate::stage::ShadingStages) boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::batch::LANES;

/// Everything that can go wrong binding or driving a shader pair.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum ShadeError {
    #[error("Vertex shader declares no input attributes")]
    NoAttributes,
    #[error("Vertex shader declares {params} output params, needs at least 4 for clip position")]
    MissingClipPosition { params: usize },
    #[error("Vertex shader declares {params} output params, rasterizer interpolates at most {max}")]
    TooManyParams { params: usize, max: usize },
    #[error("Vertex data has {len} floats, not a multiple of the {stride}-float vertex stride")]
    VertexDataLength { len: usize, stride: usize },
    #[error("Expected {expected} batches, got {actual}")]
    BatchShape { expected: usize, actual: usize },
    #[error("Lane count {lane_count} outside 1..={}", LANES)]
    LaneCount { lane_count: usize },
    #[error("Invalid shading config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fallible shading operations.
pub type Result<T, E = ShadeError> = std::result::Result<T, E>;
