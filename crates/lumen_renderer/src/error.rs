use thiserror::Error;

/// Errors raised while building a scene or producing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot build a BVH over an empty scene")]
    EmptyScene,

    #[error("primitive {index} reports an empty bounding box")]
    Unbounded { index: usize },

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
