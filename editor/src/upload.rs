//! Image reads into self-contained data URIs.
//!
//! Reading a picked file is asynchronous in every host, so each read is
//! represented by an [`UploadTicket`]. Only the most recent ticket issued for
//! a target is honored on completion; older reads that finish late are
//! dropped. The tracker also answers "is this target uploading?" so the
//! renderer can draw the transient loading state.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::collections::HashMap;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::doc::ElementId;

/// Failure to turn a picked file into a data URI.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported image format")]
    UnsupportedImage,
}

/// Malformed `data:` URI.
#[derive(Debug, thiserror::Error)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI has no payload separator")]
    MissingComma,
    #[error("only base64 data URIs are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Decoded contents of a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Whether `src` is an embedded data URI rather than a path.
#[must_use]
pub fn is_data_uri(src: &str) -> bool {
    src.starts_with("data:")
}

/// Encode raw bytes as a base64 data URI.
#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a base64 data URI.
///
/// # Errors
///
/// Returns [`DataUriError`] when the scheme, separator, or base64 marker is
/// missing, or the payload is not valid base64.
pub fn decode_data_uri(uri: &str) -> Result<DataUri, DataUriError> {
    let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingComma)?;
    let mime = header.strip_suffix(";base64").ok_or(DataUriError::NotBase64)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DataUri { mime: mime.to_string(), bytes })
}

/// MIME type of a PNG or JPEG byte stream, sniffed from its magic bytes.
#[must_use]
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => Some("image/png"),
        Ok(image::ImageFormat::Jpeg) => Some("image/jpeg"),
        _ => None,
    }
}

/// Turn picked file bytes into a data URI.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedImage`] for anything but PNG or JPEG.
pub fn image_to_data_uri(bytes: &[u8]) -> Result<String, UploadError> {
    let mime = sniff_image_mime(bytes).ok_or(UploadError::UnsupportedImage)?;
    Ok(encode_data_uri(mime, bytes))
}

/// What a picked image will replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    /// Replace the bitmap of an existing image element.
    Element(ElementId),
    /// Replace the page background.
    Background,
    /// Insert a new image element.
    NewImage,
}

/// Handle for one in-flight read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    pub target: UploadTarget,
    pub seq: u64,
}

/// Tracks the latest in-flight read per target.
#[derive(Debug, Default)]
pub struct UploadTracker {
    next_seq: u64,
    latest: HashMap<UploadTarget, u64>,
}

impl UploadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a read for `target`, superseding any earlier one.
    pub fn begin(&mut self, target: UploadTarget) -> UploadTicket {
        self.next_seq += 1;
        self.latest.insert(target, self.next_seq);
        UploadTicket { target, seq: self.next_seq }
    }

    /// Whether `ticket` is still the newest read for its target.
    #[must_use]
    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        self.latest.get(&ticket.target) == Some(&ticket.seq)
    }

    /// Close `ticket`. Returns `true` only if it was the newest read; stale
    /// tickets leave the newer read pending.
    pub fn finish(&mut self, ticket: UploadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.latest.remove(&ticket.target);
        true
    }

    /// Abandon whatever read is pending for `target`.
    pub fn cancel(&mut self, target: UploadTarget) -> bool {
        self.latest.remove(&target).is_some()
    }

    #[must_use]
    pub fn is_uploading(&self, target: UploadTarget) -> bool {
        self.latest.contains_key(&target)
    }

    /// Drop the pending read for a deleted element.
    pub fn forget_element(&mut self, id: ElementId) {
        self.latest.remove(&UploadTarget::Element(id));
    }
}
