use crate::code_table::{Bits, CodeTable};
use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Number of zero bits needed to bring `bit_len` up to a whole byte.
pub fn pad_len(bit_len: usize) -> usize {
    (8 - bit_len % 8) % 8
}

/// Concatenate the code of every symbol in `stream`.
pub fn encode_bits<'s, Symbol, Q>(
    table: &CodeTable<Symbol>,
    stream: impl IntoIterator<Item = &'s Q>,
) -> Result<Bits>
where
    Symbol: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + Debug + ?Sized + 's,
{
    let mut out = Bits::new();
    for s in stream {
        let code = table.get(s).ok_or_else(|| Error::UnknownSymbol {
            symbol: format!("{s:?}"),
        })?;
        out.extend_from_bitslice(code);
    }

    Ok(out)
}

/// Encode `stream` and pack it into bytes, most significant bit first.
///
/// The trailing byte is filled with zero bits and the number of bits added is
/// recorded in `table` as its eof marker.
pub fn pack<'s, Symbol, Q>(
    table: &mut CodeTable<Symbol>,
    stream: impl IntoIterator<Item = &'s Q>,
) -> Result<Vec<u8>>
where
    Symbol: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + Debug + ?Sized + 's,
{
    let mut bits = encode_bits(table, stream)?;
    let bit_len = bits.len();
    let pad = pad_len(bit_len);

    bits.resize(bit_len + pad, false);
    table.set_eof(pad);

    debug!(bit_len, pad, "packed symbol stream");
    Ok(bits.into_vec())
}
