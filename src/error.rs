use std::fmt;

/// Every failure the library can report.
///
/// `Dataset`, `Config` and `Training` carry a human-readable message that
/// already includes the offending row, field or shape.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Image(image::ImageError),
    Dataset(String),
    Config(String),
    Training(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e)       => write!(f, "I/O error: {}", e),
            Error::Json(e)     => write!(f, "JSON error: {}", e),
            Error::Csv(e)      => write!(f, "CSV error: {}", e),
            Error::Image(e)    => write!(f, "image error: {}", e),
            Error::Dataset(m)  => write!(f, "dataset error: {}", m),
            Error::Config(m)   => write!(f, "config error: {}", m),
            Error::Training(m) => write!(f, "training error: {}", m),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e)    => Some(e),
            Error::Json(e)  => Some(e),
            Error::Csv(e)   => Some(e),
            Error::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e)
    }
}
