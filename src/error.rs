//! Error types.
//!
//! GPU setup, silhouette loading, and the window runner can fail; everything
//! else in the crate is best-effort and degrades instead of erroring.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
            GpuError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

/// Errors that can occur while loading a silhouette image from disk.
#[derive(Debug)]
pub enum SilhouetteError {
    /// Failed to decode the image file.
    ImageLoad(image::ImageError),
    /// Failed to read the file from disk.
    Io(std::io::Error),
}

impl fmt::Display for SilhouetteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SilhouetteError::ImageLoad(e) => write!(f, "Failed to load silhouette image: {}", e),
            SilhouetteError::Io(e) => write!(f, "Failed to read silhouette file: {}", e),
        }
    }
}

impl std::error::Error for SilhouetteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SilhouetteError::ImageLoad(e) => Some(e),
            SilhouetteError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for SilhouetteError {
    fn from(e: image::ImageError) -> Self {
        SilhouetteError::ImageLoad(e)
    }
}

impl From<std::io::Error> for SilhouetteError {
    fn from(e: std::io::Error) -> Self {
        SilhouetteError::Io(e)
    }
}

/// Errors that can occur when running an effect in a window.
#[derive(Debug)]
pub enum EffectError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            EffectError::Window(e) => write!(f, "Failed to create window: {}", e),
            EffectError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for EffectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffectError::EventLoop(e) => Some(e),
            EffectError::Window(e) => Some(e),
            EffectError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for EffectError {
    fn from(e: winit::error::EventLoopError) -> Self {
        EffectError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for EffectError {
    fn from(e: winit::error::OsError) -> Self {
        EffectError::Window(e)
    }
}

impl From<GpuError> for EffectError {
    fn from(e: GpuError) -> Self {
        EffectError::Gpu(e)
    }
}
