//! On-disk artifacts.
//!
//! Compressing `X.ext` produces the payload `X.bin` and the model
//! `X-symbol-model`; decompressing `X.bin` produces `X-decompressed.txt`.

use crate::code_table::{CodeTable, SerializableCodeTable};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const PAYLOAD_EXT: &str = "bin";
const MODEL_SUFFIX: &str = "-symbol-model";
const OUTPUT_SUFFIX: &str = "-decompressed.txt";
const TEMP_EXT: &str = "tmp";

/// The three artifact paths derived from one input name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub payload: PathBuf,
    pub model: PathBuf,
    pub output: PathBuf,
}

impl ArtifactPaths {
    /// Paths for `input` with its final extension removed.
    pub fn for_input(input: &Path) -> Self {
        let base = input.with_extension("");
        Self {
            payload: base.with_extension(PAYLOAD_EXT),
            model: with_suffix(&base, MODEL_SUFFIX),
            output: with_suffix(&base, OUTPUT_SUFFIX),
        }
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn not_found(path: &Path, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::InputNotFound {
            path: path.to_path_buf(),
        }
    } else {
        Error::Io(e)
    }
}

/// Write through a temporary sibling so a failed run leaves no partial file.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".");
    temp.push(TEMP_EXT);
    let temp = PathBuf::from(temp);

    if let Err(e) = fs::write(&temp, data).and_then(|()| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    debug!(path = %path.display(), bytes = data.len(), "wrote artifact");
    Ok(())
}

pub fn read_input(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|e| not_found(path, e))?;
    String::from_utf8(data).map_err(|_| Error::NotText {
        path: path.to_path_buf(),
    })
}

pub fn save_payload(path: &Path, payload: &[u8]) -> Result<()> {
    write_atomic(path, payload)
}

/// Write the payload and model of one compression run, or neither.
///
/// The model is encoded before anything touches the disk, and the payload is
/// removed again if the model cannot be written.
pub fn save_compressed(
    paths: &ArtifactPaths,
    payload: &[u8],
    table: &CodeTable<String>,
) -> Result<()> {
    let model = rmp_serde::to_vec(&SerializableCodeTable::from(table))?;

    write_atomic(&paths.payload, payload)?;
    if let Err(e) = write_atomic(&paths.model, &model) {
        let _ = fs::remove_file(&paths.payload);
        return Err(e);
    }
    Ok(())
}

pub fn load_payload(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| not_found(path, e))
}

pub fn save_model(path: &Path, table: &CodeTable<String>) -> Result<()> {
    let data = rmp_serde::to_vec(&SerializableCodeTable::from(table))?;
    write_atomic(path, &data)
}

pub fn load_model(path: &Path) -> Result<CodeTable<String>> {
    let data = fs::read(path).map_err(|e| not_found(path, e))?;
    let ser: SerializableCodeTable<String> = rmp_serde::from_slice(&data)?;
    CodeTable::try_from(ser)
}

pub fn write_output(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}
