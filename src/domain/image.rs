use std::borrow::Cow;

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";
const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";
const PNG_MEDIA_TYPE: &str = "image/png";

/// Image as received from the client: either a `data:` URI or bare base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Size of the encoded payload in bytes, which is what the upload limit
    /// is measured against.
    pub fn encoded_len(&self) -> usize {
        self.0.len()
    }

    /// Approximate size of the decoded image, for logging.
    pub fn approx_decoded_len(&self) -> usize {
        base64::decoded_len_estimate(self.base64_data().len())
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with(DATA_URI_PREFIX)
    }

    /// Payload as a `data:` URI, wrapping bare base64 as JPEG.
    pub fn as_data_uri(&self) -> Cow<'_, str> {
        if self.is_data_uri() {
            Cow::Borrowed(&self.0)
        } else {
            Cow::Owned(format!(
                "{DATA_URI_PREFIX}{DEFAULT_MEDIA_TYPE}{BASE64_MARKER}{}",
                self.0
            ))
        }
    }

    /// The base64 body with any `data:...;base64,` prefix removed.
    pub fn base64_data(&self) -> &str {
        match self.0.split_once(',') {
            Some((_, data)) if !data.is_empty() => data,
            _ => &self.0,
        }
    }

    pub fn media_type(&self) -> &'static str {
        let header = match self.0.split_once(',') {
            Some((header, _)) if self.is_data_uri() => header,
            _ => "",
        };
        if header.contains(PNG_MEDIA_TYPE) {
            PNG_MEDIA_TYPE
        } else {
            DEFAULT_MEDIA_TYPE
        }
    }
}
