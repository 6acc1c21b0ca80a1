use colorcube_render_wgpu::RendererError;

/// Fatal startup failures. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

impl StartupError {
    /// Process exit status for this failure.
    ///
    /// Display and window failures exit with 1. A shader link failure is
    /// reported but exits with 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Renderer(RendererError::ShaderLink(_)) => 0,
            _ => 1,
        }
    }
}
