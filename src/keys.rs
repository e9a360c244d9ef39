//! Source-key normalization, destination-key derivation, and the
//! extension allow-list that gates the pipeline.

/// Encodings the pipeline re-encodes into, selected from the source key's
/// extension. No cross-format conversion happens: jpg stays jpg, png
/// stays png.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Eligibility of a source key, decided before any storage call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyClass {
    /// Extension is on the allow-list; re-encode with this format.
    Image(OutputFormat),
    /// Extension present but not an accepted image type.
    Unsupported { extension: String },
    /// No `.` anywhere in the key.
    MissingExtension,
}

/// S3 notifications escape object keys: spaces arrive as `+`, the rest
/// percent-encoded. The `+` replacement runs before percent-decoding, so
/// a literal `%2B` in the stored key still decodes to `+`.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        // Malformed escapes are kept verbatim; decoding is best-effort
        // normalization, not validation.
        Err(_) => spaced,
    }
}

/// Derives the destination key by stripping the full-size token. The
/// token is removed only as a suffix of the file stem (directly before
/// the extension dot, or at the end of an extensionless key); carried
/// anywhere else it stays, so `my_fullsize.jpg` keeps its name.
pub fn destination_key(source_key: &str, token: &str) -> String {
    let (stem, extension) = match source_key.rfind('.') {
        Some(dot) => source_key.split_at(dot),
        None => (source_key, ""),
    };
    match stem.strip_suffix(token) {
        Some(stripped) => format!("{stripped}{extension}"),
        None => source_key.to_string(),
    }
}

/// Extension allow-list: case-sensitive, no content sniffing. Misnamed
/// files are turned away before any fetch happens.
pub fn classify(key: &str) -> KeyClass {
    let Some(dot) = key.rfind('.') else {
        return KeyClass::MissingExtension;
    };
    let extension = &key[dot + 1..];
    match extension {
        "jpg" | "jpeg" => KeyClass::Image(OutputFormat::Jpeg),
        "png" => KeyClass::Image(OutputFormat::Png),
        _ => KeyClass::Unsupported {
            extension: extension.to_string(),
        },
    }
}
