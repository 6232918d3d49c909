use crate::error::{Error, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// Symbol counts, kept in order of first appearance.
///
/// First-appearance order is what the tree builder uses to break ties between
/// equally weighted symbols.
#[derive(Debug, Clone)]
pub struct FrequencyTable<Symbol> {
    counts: Vec<(Symbol, usize)>,
    index: HashMap<Symbol, usize>,
    total: usize,
}

impl<Symbol> FrequencyTable<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut counts: Vec<(Symbol, usize)> = Vec::new();
        let mut index: HashMap<Symbol, usize> = HashMap::new();
        let mut total = 0;

        for s in symbols {
            total += 1;
            match index.get(&s) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(s.clone(), counts.len());
                    counts.push((s, 1));
                }
            }
        }

        Self {
            counts,
            index,
            total,
        }
    }

    pub fn get(&self, s: &Symbol) -> usize {
        self.index.get(s).map_or(0, |&i| self.counts[i].1)
    }

    /// Number of tokens counted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, usize)> {
        self.counts.iter().map(|(s, c)| (s, *c))
    }

    /// Normalize the counts into a zero-order model.
    pub fn probabilities(&self) -> Result<ProbabilityTable<Symbol>> {
        if self.total == 0 {
            return Err(Error::EmptyInput);
        }

        let total = self.total as f64;
        Ok(ProbabilityTable {
            weights: self
                .counts
                .iter()
                .map(|(s, c)| (s.clone(), *c as f64 / total))
                .collect(),
        })
    }
}

/// Zero-order model: each symbol's share of the stream.
///
/// Weights are only ever used to order nodes, never compared for equality.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable<Symbol> {
    weights: Vec<(Symbol, f64)>,
}

impl<Symbol> ProbabilityTable<Symbol> {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, f64)> {
        self.weights.iter().map(|(s, w)| (s, *w))
    }
}

impl<Symbol> IntoIterator for ProbabilityTable<Symbol> {
    type Item = (Symbol, f64);
    type IntoIter = std::vec::IntoIter<(Symbol, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.into_iter()
    }
}
