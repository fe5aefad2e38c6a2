//! Document formats and their codecs.
//!
//! The format is decided by the file extension alone; content is never
//! sniffed.

use crate::error::LoadError;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Cbor,
}

impl FileFormat {
    /// `.json` or `.cbor`, case-insensitive.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "cbor" => Ok(Self::Cbor),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Cbor => "cbor",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::Cbor => ciborium::de::from_reader(bytes).map_err(|e| e.to_string()),
        }
    }

    pub fn encode(self, value: &Value) -> Result<Vec<u8>, String> {
        match self {
            Self::Json => {
                let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| e.to_string())?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            Self::Cbor => {
                let mut bytes = Vec::new();
                ciborium::ser::into_writer(value, &mut bytes).map_err(|e| e.to_string())?;
                Ok(bytes)
            }
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Cbor => f.write_str("CBOR"),
        }
    }
}

/// Read and decode a document in the format its extension names.
pub fn read_document(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.decode(&bytes).map_err(|message| LoadError::Decode {
        path: path.to_path_buf(),
        format,
        message,
    })
}

/// Encode and write a document in the format its extension names.
pub fn write_document(path: impl AsRef<Path>, value: &Value) -> Result<(), LoadError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let bytes = format.encode(value).map_err(|message| LoadError::Encode {
        path: path.to_path_buf(),
        format,
        message,
    })?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| LoadError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Re-encode `input` into the format named by `output`'s extension.
pub fn translate(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), LoadError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    // Refuse an unsupported output before doing any reading.
    FileFormat::from_path(output)?;
    let document = read_document(input)?;
    write_document(output, &document)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        "translated document"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(FileFormat::from_path("a/b.json").unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_path("B.CBOR").unwrap(), FileFormat::Cbor);
        assert_eq!(
            FileFormat::from_path("Chiller.RS0001.a205.json").unwrap(),
            FileFormat::Json
        );
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = FileFormat::from_path("chiller.xlsx").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedFormat { ref extension, .. } if extension == "xlsx"
        ));
        insta::assert_snapshot!(
            err.to_string(),
            @"chiller.xlsx: unsupported file format 'xlsx' (expected .json or .cbor)"
        );
        assert!(FileFormat::from_path("no_extension").is_err());
    }

    #[test]
    fn cbor_codec_preserves_the_tree() {
        let value = json!({
            "RS_ID": "RS0006",
            "RS_instance": {"performance": {"maximum_power": 7000.5, "flags": [true, null]}},
            "count": 3
        });
        let bytes = FileFormat::Cbor.encode(&value).expect("encode");
        assert_eq!(FileFormat::Cbor.decode(&bytes).expect("decode"), value);
    }

    #[test]
    fn malformed_json_reports_decode_message() {
        let err = FileFormat::Json.decode(b"{\"RS_ID\":").unwrap_err();
        assert!(err.contains("EOF"));
    }
}
