use std::path::PathBuf;

/// Errors raised by the software drawing collaborators.
#[derive(Debug)]
pub enum RenderError {
    /// An image file could not be read or decoded.
    ImageLoad { path: PathBuf, message: String },

    /// An image could not be encoded or written.
    ImageSave { path: PathBuf, message: String },

    /// A font file does not exist.
    FontNotFound(PathBuf),

    /// Only the built-in bitmap font can be rasterized.
    UnsupportedFont(PathBuf),

    /// Image dimensions do not match the pixel buffer.
    InvalidDimensions { width: u32, height: u32, len: usize },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::ImageLoad { path, message } => {
                write!(f, "Failed to load image '{}': {}", path.display(), message)
            }
            RenderError::ImageSave { path, message } => {
                write!(f, "Failed to save image '{}': {}", path.display(), message)
            }
            RenderError::FontNotFound(path) => {
                write!(f, "Font file not found: {}", path.display())
            }
            RenderError::UnsupportedFont(path) => {
                write!(
                    f,
                    "Unsupported font '{}': only the built-in font is available",
                    path.display()
                )
            }
            RenderError::InvalidDimensions { width, height, len } => {
                write!(
                    f,
                    "Pixel buffer of {} pixels does not match {}x{}",
                    len, width, height
                )
            }
        }
    }
}

impl std::error::Error for RenderError {}

pub type RenderResult<T> = Result<T, RenderError>;
