/// Errors produced outside the traversal itself: loading inputs and writing outputs.
///
/// A traversal that stops early is not an error; see [`crate::Termination`].
#[derive(thiserror::Error, Debug)]
pub enum ChaseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error("invalid parameters: {0}")]
    Params(#[from] serde_json::Error),

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}
