use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

#[derive(Debug)]
pub enum CanvasError {
    /// A canvas needs at least one pixel on each axis.
    ZeroSize,
    /// Pixels were read or written before [`crate::canvas::Canvas::allocate_pixels`].
    PixelsNotAllocated,
    /// A raster address outside the `width x height` grid.
    PixelOutOfRange { x: u32, y: u32 },
    Io(io::Error),
}

impl Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::ZeroSize => write!(f, "Canvas width and height must be non-zero."),
            CanvasError::PixelsNotAllocated => {
                write!(f, "Canvas pixels accessed before allocation.")
            }
            CanvasError::PixelOutOfRange { x, y } => {
                write!(f, "Pixel ({}, {}) lies outside the canvas.", x, y)
            }
            CanvasError::Io(err) => write!(f, "Canvas output failed: {}", err),
        }
    }
}

impl Error for CanvasError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CanvasError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CanvasError {
    fn from(error: io::Error) -> Self {
        CanvasError::Io(error)
    }
}

#[derive(Debug)]
pub enum BmpError {
    PixelCountMismatch { expected: usize, found: usize },
    /// The encoded file would not fit the 32-bit size fields of the headers.
    TooLarge { width: u32, height: u32 },
    Canvas(CanvasError),
    Io(io::Error),
}

impl Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmpError::PixelCountMismatch { expected, found } => write!(
                f,
                "Pixel buffer holds {} pixels, dimensions need {}.",
                found, expected
            ),
            BmpError::TooLarge { width, height } => write!(
                f,
                "A {}x{} bitmap is too large for the BMP format.",
                width, height
            ),
            BmpError::Canvas(err) => write!(f, "Bitmap source canvas error: {}", err),
            BmpError::Io(err) => write!(f, "Bitmap write failed: {}", err),
        }
    }
}

impl Error for BmpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BmpError::Canvas(err) => Some(err),
            BmpError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BmpError {
    fn from(error: io::Error) -> Self {
        BmpError::Io(error)
    }
}

impl From<CanvasError> for BmpError {
    fn from(error: CanvasError) -> Self {
        BmpError::Canvas(error)
    }
}

#[derive(Debug)]
pub enum SceneError {
    Parse(ron::error::SpannedError),
    Io(io::Error),
    InvalidColor(String),
    Canvas(CanvasError),
    Bmp(BmpError),
}

impl Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Parse(err) => write!(f, "Scene parse error: {}", err),
            SceneError::Io(err) => write!(f, "Scene read failed: {}", err),
            SceneError::InvalidColor(msg) => write!(f, "Invalid scene color: {}", msg),
            SceneError::Canvas(err) => write!(f, "Scene render failed: {}", err),
            SceneError::Bmp(err) => write!(f, "Scene output failed: {}", err),
        }
    }
}

impl Error for SceneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SceneError::Parse(err) => Some(err),
            SceneError::Io(err) => Some(err),
            SceneError::Canvas(err) => Some(err),
            SceneError::Bmp(err) => Some(err),
            SceneError::InvalidColor(_) => None,
        }
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(error: ron::error::SpannedError) -> Self {
        SceneError::Parse(error)
    }
}

impl From<io::Error> for SceneError {
    fn from(error: io::Error) -> Self {
        SceneError::Io(error)
    }
}

impl From<csscolorparser::ParseColorError> for SceneError {
    fn from(error: csscolorparser::ParseColorError) -> Self {
        SceneError::InvalidColor(error.to_string())
    }
}

impl From<CanvasError> for SceneError {
    fn from(error: CanvasError) -> Self {
        SceneError::Canvas(error)
    }
}

impl From<BmpError> for SceneError {
    fn from(error: BmpError) -> Self {
        SceneError::Bmp(error)
    }
}
