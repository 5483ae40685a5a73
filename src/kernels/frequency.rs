//! This module contains the frequency-counting kernel: the first stage of every
//! encode, turning a symbol sequence into per-symbol occurrence counts.
//!
//! Small alphabets (up to `DENSE_ALPHABET_LIMIT` symbols) are counted into a
//! dense array indexed by symbol. Larger alphabets, such as 24-bit colour, use
//! a sparse hash map so memory tracks the number of *distinct* symbols rather
//! than the alphabet size.

use hashbrown::HashMap;

use crate::error::HuffmanError;
use crate::types::Symbol;

/// Alphabets at or below this size are counted densely.
pub const DENSE_ALPHABET_LIMIT: u32 = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Counts {
    Dense(Vec<u64>),
    Sparse(HashMap<Symbol, u64>),
}

/// Occurrence counts for every symbol seen at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    alphabet_size: u32,
    counts: Counts,
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// An empty table over `[0, alphabet_size)`.
    pub fn new(alphabet_size: u32) -> Self {
        let counts = if alphabet_size <= DENSE_ALPHABET_LIMIT {
            Counts::Dense(vec![0; alphabet_size as usize])
        } else {
            Counts::Sparse(HashMap::new())
        };
        Self {
            alphabet_size,
            counts,
            distinct: 0,
            total: 0,
        }
    }

    /// Counts every symbol of `symbols` on the calling thread.
    pub fn from_symbols(symbols: &[Symbol], alphabet_size: u32) -> Result<Self, HuffmanError> {
        let mut table = Self::new(alphabet_size);
        for &symbol in symbols {
            table.record(symbol)?;
        }
        Ok(table)
    }

    /// Splits `symbols` into `shards` contiguous partitions, counts each on a
    /// scoped thread and merges the partial tables.
    pub fn from_symbols_sharded(
        symbols: &[Symbol],
        alphabet_size: u32,
        shards: usize,
    ) -> Result<Self, HuffmanError> {
        if shards <= 1 || symbols.len() < shards {
            return Self::from_symbols(symbols, alphabet_size);
        }
        let shard_len = symbols.len().div_ceil(shards);

        let partials: Vec<Result<Self, HuffmanError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = symbols
                .chunks(shard_len)
                .map(|chunk| scope.spawn(move || Self::from_symbols(chunk, alphabet_size)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(HuffmanError::InternalError(
                            "Frequency counting shard panicked".to_string(),
                        ))
                    })
                })
                .collect()
        });

        let mut table = Self::new(alphabet_size);
        for partial in partials {
            table.merge(&partial?)?;
        }
        Ok(table)
    }

    /// Adds one occurrence of `symbol`.
    pub fn record(&mut self, symbol: Symbol) -> Result<(), HuffmanError> {
        self.add(symbol, 1)
    }

    /// Folds the counts of `other` into `self`. Both tables must share an alphabet.
    pub fn merge(&mut self, other: &FrequencyTable) -> Result<(), HuffmanError> {
        if other.alphabet_size != self.alphabet_size {
            return Err(HuffmanError::InternalError(format!(
                "Cannot merge frequency tables over different alphabets ({} vs {})",
                self.alphabet_size, other.alphabet_size
            )));
        }
        for (symbol, count) in other.iter_ascending() {
            self.add(symbol, count)?;
        }
        Ok(())
    }

    fn add(&mut self, symbol: Symbol, count: u64) -> Result<(), HuffmanError> {
        if symbol >= self.alphabet_size {
            return Err(HuffmanError::UnknownSymbol {
                symbol: u64::from(symbol),
                alphabet_size: self.alphabet_size,
            });
        }
        let slot = match &mut self.counts {
            Counts::Dense(counts) => &mut counts[symbol as usize],
            Counts::Sparse(counts) => counts.entry(symbol).or_insert(0),
        };
        if *slot == 0 && count > 0 {
            self.distinct += 1;
        }
        *slot += count;
        self.total += count;
        Ok(())
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        match &self.counts {
            Counts::Dense(counts) => counts.get(symbol as usize).copied().unwrap_or(0),
            Counts::Sparse(counts) => counts.get(&symbol).copied().unwrap_or(0),
        }
    }

    /// All `(symbol, count)` pairs with a non-zero count, in ascending symbol order.
    pub fn iter_ascending(&self) -> Vec<(Symbol, u64)> {
        match &self.counts {
            Counts::Dense(counts) => counts
                .iter()
                .enumerate()
                .filter(|(_, &c)| c > 0)
                .map(|(s, &c)| (s as Symbol, c))
                .collect(),
            Counts::Sparse(counts) => {
                let mut pairs: Vec<(Symbol, u64)> = counts
                    .iter()
                    .filter(|(_, &c)| c > 0)
                    .map(|(&s, &c)| (s, c))
                    .collect();
                pairs.sort_unstable_by_key(|&(s, _)| s);
                pairs
            }
        }
    }

    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// Sum of all counts (the length of the counted sequence).
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }
}
