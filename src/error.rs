use std::path::PathBuf;

/// Everything that can go wrong while building a model, packing, or unpacking.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A raw input or one of its paired artifacts does not exist.
    #[error("file {} not found", path.display())]
    InputNotFound { path: PathBuf },

    /// Tokenizing produced no symbols, so there is nothing to model.
    #[error("input contains no symbols")]
    EmptyInput,

    /// The encoder was handed a symbol the code table has no code for.
    #[error("symbol {symbol} has no code in the model")]
    UnknownSymbol { symbol: String },

    /// No code in the model matches the bits at this position.
    #[error("no code matches at bit {bit_offset} (byte {byte_offset})")]
    Decode { bit_offset: usize, byte_offset: usize },

    /// The model carries no pad marker, so the payload tail cannot be trimmed.
    #[error("model has no eof marker")]
    MissingEofMarker,

    /// A persisted code is empty or contains something other than `0` and `1`.
    #[error("invalid code {code:?} for symbol {symbol}")]
    InvalidCode { symbol: String, code: String },

    /// The input exists but is not valid UTF-8 text.
    #[error("file {} is not valid UTF-8 text", path.display())]
    NotText { path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write model: {0}")]
    ModelEncode(#[from] rmp_serde::encode::Error),

    #[error("failed to read model: {0}")]
    ModelDecode(#[from] rmp_serde::decode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
