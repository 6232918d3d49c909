use crate::code_table::{Bits, CodeTable};
use crate::error::{Error, Result};
use bitvec::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Inverse of a [`CodeTable`]: looks symbols up by their code.
#[derive(Debug, Clone)]
pub struct Decoder<Symbol> {
    decode_table: HashMap<Bits, Symbol>,
    min_len: usize,
    max_len: usize,
}

impl<Symbol> Decoder<Symbol>
where
    Symbol: Clone,
{
    pub fn new(table: &CodeTable<Symbol>) -> Self
    where
        Symbol: Hash + Eq,
    {
        let (min_len, max_len) = table.code_lengths().unwrap_or((0, 0));
        let decode_table = table
            .iter()
            .map(|(s, code)| (code.to_bitvec(), s.clone()))
            .collect();

        Self {
            decode_table,
            min_len,
            max_len,
        }
    }

    /// Match codes one after another until `input` is used up.
    ///
    /// At each position the candidate lengths are tried shortest first. A
    /// prefix-free table can match at most one of them.
    pub fn decode(&self, input: &BitSlice<u8, Msb0>) -> Result<Vec<Symbol>> {
        let mut out = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let found = (self.min_len.max(1)..=self.max_len.min(rest.len()))
                .find_map(|n| self.decode_table.get(&rest[..n]).map(|s| (n, s)));

            let Some((n, sym)) = found else {
                return Err(Error::Decode {
                    bit_offset: pos,
                    byte_offset: pos / 8,
                });
            };
            out.push(sym.clone());
            pos += n;
        }

        Ok(out)
    }
}

/// Expand `payload` back to bits, drop the pad recorded in `table`, and decode.
pub fn unpack<Symbol>(payload: &[u8], table: &CodeTable<Symbol>) -> Result<Vec<Symbol>>
where
    Symbol: Hash + Eq + Clone,
{
    let pad = table.eof().ok_or(Error::MissingEofMarker)?;
    let bits = BitSlice::<u8, Msb0>::from_slice(payload);

    let Some(bit_len) = bits.len().checked_sub(pad) else {
        return Err(Error::Decode {
            bit_offset: 0,
            byte_offset: 0,
        });
    };
    debug!(bit_len, pad, "unpacking payload");

    Decoder::new(table).decode(&bits[..bit_len])
}
