//! Static Huffman coding of text.
//!
//! The text is split into symbols, a zero-order model is counted over the
//! whole input, and the resulting code table packs the symbol stream into
//! bytes. The code table (with its pad marker) is all a decoder needs.
//!
//! ```
//! use huffman::{compress, decompress, Mode};
//!
//! let text = "Hello my name is Sam!";
//! let c = compress(text, Mode::Char).unwrap();
//! assert_eq!(decompress(&c.payload, &c.table).unwrap(), text);
//! ```

pub mod code_table;
pub mod error;
pub mod model;
pub mod packer;
pub mod store;
pub mod tokenizer;
pub mod tree;
pub mod unpacker;

pub use code_table::{Bits, CodeTable, SerializableCodeTable};
pub use error::{Error, Result};
pub use model::{FrequencyTable, ProbabilityTable};
pub use tokenizer::{tokenize, Mode, Tokens};
pub use tree::{build_tree, Node};
pub use unpacker::Decoder;

use tracing::{debug, info};

/// Output of [`compress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub payload: Vec<u8>,
    /// Code table including the pad marker for `payload`.
    pub table: CodeTable<String>,
}

/// Count `text` under `mode` and derive its code table.
pub fn build_code_table(text: &str, mode: Mode) -> Result<CodeTable<&str>> {
    let freq = FrequencyTable::from_symbols(tokenize(text, mode));
    debug!(%mode, tokens = freq.total(), alphabet = freq.len(), "counted symbols");

    let root = build_tree(freq.probabilities()?)?;
    debug!(depth = root.depth(), "built code tree");

    Ok(CodeTable::from_tree(&root))
}

pub fn compress(text: &str, mode: Mode) -> Result<Compressed> {
    let mut table = build_code_table(text, mode)?;
    let payload = packer::pack(&mut table, tokenize(text, mode))?;

    info!(
        %mode,
        input_bytes = text.len(),
        payload_bytes = payload.len(),
        symbols = table.len(),
        "compressed"
    );
    Ok(Compressed {
        payload,
        table: table.map_symbols(str::to_owned),
    })
}

pub fn decompress(payload: &[u8], table: &CodeTable<String>) -> Result<String> {
    let text: String = unpacker::unpack(payload, table)?.concat();
    info!(
        payload_bytes = payload.len(),
        output_bytes = text.len(),
        "decompressed"
    );
    Ok(text)
}
