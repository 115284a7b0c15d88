//! Optional image dimension probing.
//!
//! The crate never performs network I/O itself. Callers that want images
//! measured hand in a [`Fetcher`]; its bytes are decoded just far enough to
//! read the image header.

use std::io::Cursor;
use std::time::Duration;

use image::ImageReader;
use thiserror::Error;
use url::Url;

use crate::error::FetchError;

/// Retrieves image bytes on behalf of the extractor.
///
/// Implementations must honor `timeout`. Any error only costs the candidate
/// its measured size; it is never removed because of a failed fetch.
pub trait Fetcher {
    fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&Url, Duration) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        self(url, timeout)
    }
}

/// Why a probe produced no dimensions.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("undecodable image: {0}")]
    Decode(String),
}

/// Read `(width, height)` from an encoded image header.
pub fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), ProbeFailure> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| ProbeFailure::Decode(err.to_string()))?
        .into_dimensions()
        .map_err(|err| ProbeFailure::Decode(err.to_string()))
}

/// Fetch an image and measure it.
pub fn probe(fetcher: &dyn Fetcher, url: &Url, timeout: Duration) -> Result<(u32, u32), ProbeFailure> {
    let bytes = fetcher.fetch(url, timeout)?;
    decode_dimensions(&bytes)
}
