/// Errors from building the GPU renderer.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("shader link failed: {0}")]
    ShaderLink(String),
}
