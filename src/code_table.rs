use crate::error::{Error, Result};
use crate::tree::Node;
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Bit sequences are stored most significant bit first, so a packed
/// `Bits` is already in payload byte order.
pub type Bits = BitVec<u8, Msb0>;

/// Render bits as a string of `0` and `1`.
pub fn code_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

fn parse_code(code: &str) -> Option<Bits> {
    code.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

/// Symbol to code mapping, plus the pad marker recorded by the packer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<Symbol>
where
    Symbol: Hash + Eq,
{
    codes: HashMap<Symbol, Bits>,
    eof: Option<usize>,
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Hash + Eq,
{
    /// Assign every leaf the path from the root: `0` for left, `1` for right.
    ///
    /// A tree that is a single leaf still gets the one-bit code `0`.
    pub fn from_tree(root: &Node<Symbol>) -> Self
    where
        Symbol: Clone,
    {
        let mut codes = HashMap::new();

        let mut stack = vec![(root, Bits::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    let code = if prefix.is_empty() { bitvec![u8, Msb0; 0] } else { prefix };
                    codes.insert(symbol.clone(), code);
                }
                Node::Internal { left, right, .. } => {
                    let mut r = prefix.clone();
                    r.push(true);
                    stack.push((right.as_ref(), r));

                    let mut l = prefix;
                    l.push(false);
                    stack.push((left.as_ref(), l));
                }
            }
        }

        Self { codes, eof: None }
    }

    pub fn get<Q>(&self, symbol: &Q) -> Option<&BitSlice<u8, Msb0>>
    where
        Symbol: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.codes.get(symbol).map(|b| b.as_bitslice())
    }

    pub fn remove<Q>(&mut self, symbol: &Q) -> Option<Bits>
    where
        Symbol: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.codes.remove(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitSlice<u8, Msb0>)> {
        self.codes.iter().map(|(s, b)| (s, b.as_bitslice()))
    }

    /// Number of symbols with a code. The eof marker is not counted.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of pad bits appended by the packer, once it has run.
    pub fn eof(&self) -> Option<usize> {
        self.eof
    }

    pub(crate) fn set_eof(&mut self, pad: usize) {
        self.eof = Some(pad);
    }

    /// Shortest and longest code length.
    pub fn code_lengths(&self) -> Option<(usize, usize)> {
        let min = self.codes.values().map(|c| c.len()).min()?;
        let max = self.codes.values().map(|c| c.len()).max()?;
        Some((min, max))
    }

    /// Expected code length in bits per symbol under the given weights.
    pub fn average_length<'a>(&self, weights: impl IntoIterator<Item = (&'a Symbol, f64)>) -> f64
    where
        Symbol: 'a,
    {
        weights
            .into_iter()
            .filter_map(|(s, w)| self.codes.get(s).map(|c| c.len() as f64 * w))
            .sum()
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Bits> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a.as_bitslice()))
        })
    }

    pub fn map_symbols<T, F>(self, mut f: F) -> CodeTable<T>
    where
        T: Hash + Eq,
        F: FnMut(Symbol) -> T,
    {
        CodeTable {
            codes: self.codes.into_iter().map(|(s, c)| (f(s), c)).collect(),
            eof: self.eof,
        }
    }
}

impl<Symbol> FromIterator<(Symbol, Bits)> for CodeTable<Symbol>
where
    Symbol: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (Symbol, Bits)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
            eof: None,
        }
    }
}

/// Persisted form of a [`CodeTable`]: every code as a `0`/`1` string.
///
/// The pad marker is kept in its own field so it can never collide with a
/// symbol spelled `eof`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableCodeTable<Symbol>
where
    Symbol: Hash + Eq,
{
    codes: HashMap<Symbol, String>,
    eof: Option<String>,
}

impl<'a, Symbol> From<&'a CodeTable<Symbol>> for SerializableCodeTable<Symbol>
where
    Symbol: Clone + Eq + Hash,
{
    fn from(other: &'a CodeTable<Symbol>) -> Self {
        Self {
            codes: other
                .codes
                .iter()
                .map(|(k, v)| (k.clone(), code_string(v)))
                .collect(),
            eof: other.eof.map(|pad| "0".repeat(pad)),
        }
    }
}

impl<Symbol> TryFrom<SerializableCodeTable<Symbol>> for CodeTable<Symbol>
where
    Symbol: Hash + Eq + Debug,
{
    type Error = Error;

    fn try_from(other: SerializableCodeTable<Symbol>) -> Result<Self> {
        let eof = match other.eof {
            Some(marker) => match parse_code(&marker) {
                Some(bits) => Some(bits.len()),
                None => {
                    return Err(Error::InvalidCode {
                        symbol: "eof".to_owned(),
                        code: marker,
                    })
                }
            },
            None => None,
        };

        let codes = other
            .codes
            .into_iter()
            .map(|(k, v)| match parse_code(&v) {
                Some(bits) if !bits.is_empty() => Ok((k, bits)),
                _ => Err(Error::InvalidCode {
                    symbol: format!("{k:?}"),
                    code: v,
                }),
            })
            .collect::<Result<_>>()?;

        Ok(Self { codes, eof })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FrequencyTable;
    use crate::tree::build_tree;

    fn table_of(text: &str) -> CodeTable<char> {
        let probs = FrequencyTable::from_symbols(text.chars())
            .probabilities()
            .unwrap();
        CodeTable::from_tree(&build_tree(probs).unwrap())
    }

    #[test]
    fn left_is_zero_right_is_one() {
        let root = Node::from_children(
            Node::leaf('a', 0.5),
            Node::from_children(Node::leaf('b', 0.25), Node::leaf('c', 0.25)),
        );
        let table = CodeTable::from_tree(&root);

        assert_eq!(table.get(&'a'), Some(bits![u8, Msb0; 0]));
        assert_eq!(table.get(&'b'), Some(bits![u8, Msb0; 1, 0]));
        assert_eq!(table.get(&'c'), Some(bits![u8, Msb0; 1, 1]));
        assert_eq!(table.code_lengths(), Some((1, 2)));
    }

    #[test]
    fn single_leaf_gets_one_bit() {
        let table = table_of("aaaaaaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&'a'), Some(bits![u8, Msb0; 0]));
    }

    #[test]
    fn every_symbol_gets_a_code() {
        let text = "a man, a plan, a canal: panama";
        let freq = FrequencyTable::from_symbols(text.chars());
        let table = table_of(text);

        assert_eq!(table.len(), freq.len());
        for (s, _) in freq.iter() {
            assert!(table.get(s).is_some_and(|c| !c.is_empty()));
        }
        assert!(table.is_prefix_free());
    }

    #[test]
    fn frequent_symbols_get_shorter_codes() {
        let table = table_of("aaaaaaaaaaaaaaaabbbbbbbbccccdde");
        let len = |c: char| table.get(&c).map(|b| b.len()).unwrap();
        assert!(len('a') <= len('b'));
        assert!(len('b') <= len('c'));
        assert!(len('c') <= len('e'));
    }

    #[test]
    fn average_length_is_within_a_bit_of_entropy() {
        let text = "it was the best of times, it was the worst of times";
        let probs = FrequencyTable::from_symbols(text.chars())
            .probabilities()
            .unwrap();
        let entropy: f64 = probs.iter().map(|(_, p)| -p * p.log2()).sum();
        let table = table_of(text);

        let avg = table.average_length(probs.iter());
        assert!(avg >= entropy - 1e-9);
        assert!(avg < entropy + 1.0);
    }

    #[test]
    fn prefix_check_spots_clashes() {
        let table: CodeTable<char> = [
            ('a', bitvec![u8, Msb0; 0]),
            ('b', bitvec![u8, Msb0; 0, 1]),
        ]
        .into_iter()
        .collect();
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn code_string_renders_bits() {
        assert_eq!(code_string(bits![u8, Msb0; 1, 0, 1, 1]), "1011");
        assert_eq!(code_string(BitSlice::<u8, Msb0>::empty()), "");
    }

    #[test]
    fn serializable_round_trip_through_messagepack() {
        let mut table = table_of("hello world").map_symbols(String::from);
        table.set_eof(3);

        let ser = SerializableCodeTable::from(&table);
        assert_eq!(ser.eof.as_deref(), Some("000"));

        let data = rmp_serde::to_vec(&ser).unwrap();
        let back: SerializableCodeTable<String> = rmp_serde::from_slice(&data).unwrap();
        let back = CodeTable::try_from(back).unwrap();

        assert_eq!(back, table);
    }

    #[test]
    fn symbol_named_eof_does_not_clash_with_marker() {
        let mut table: CodeTable<String> = [
            ("eof".to_owned(), bitvec![u8, Msb0; 1]),
            ("x".to_owned(), bitvec![u8, Msb0; 0]),
        ]
        .into_iter()
        .collect();
        table.set_eof(0);

        let back = CodeTable::try_from(SerializableCodeTable::from(&table)).unwrap();
        assert_eq!(back.get("eof"), Some(bits![u8, Msb0; 1]));
        assert_eq!(back.eof(), Some(0));
    }

    #[test]
    fn rejects_malformed_codes() {
        let bad = SerializableCodeTable {
            codes: HashMap::from([('a', "01x".to_owned())]),
            eof: Some(String::new()),
        };
        assert!(matches!(
            CodeTable::try_from(bad),
            Err(Error::InvalidCode { .. })
        ));

        let empty = SerializableCodeTable {
            codes: HashMap::from([('a', String::new())]),
            eof: None,
        };
        assert!(matches!(
            CodeTable::try_from(empty),
            Err(Error::InvalidCode { .. })
        ));
    }
}
