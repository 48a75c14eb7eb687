//! Error types

use thiserror::Error;

/// Everything that can go wrong while building or running a wheel
#[derive(Debug, Error)]
pub enum WheelError {
    #[error("wheel needs between 1 and {} slices", crate::consts::MAX_SLICES)]
    InvalidSliceCount,
    #[error("slice mesh needs between 1 and {} segments", crate::consts::MAX_SEGMENTS)]
    InvalidSegments,
    #[error("wheel radius must be finite and positive (got {0})")]
    InvalidRadius(f32),
    #[error("slice angles must be finite (got {start}..{end})")]
    NonFiniteAngle { start: f32, end: f32 },
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
}

pub type Result<T> = std::result::Result<T, WheelError>;
