//! Restricting which program points feed the scanner

use keyscan_api::{Error, ProgramPoint, Result, ResultExt};
use std::collections::HashSet;
use std::path::Path;

/// The set of tap points worth watching
///
/// Built once from a candidate list. Besides exact membership it keeps the
/// sorted instruction addresses and the context ids of all candidates, which
/// is what a harness needs to decide whether a code region must be monitored
/// at all.
#[derive(Clone, Debug, Default)]
pub struct AdmissionFilter {
    candidates: HashSet<ProgramPoint>,
    addresses: Vec<u64>,
    contexts: HashSet<u64>,
}

impl AdmissionFilter {
    /// Build a filter from candidate program points
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = ProgramPoint>,
    {
        let candidates: HashSet<ProgramPoint> = points.into_iter().collect();
        let mut addresses: Vec<u64> = candidates.iter().map(|p| p.pc).collect();
        addresses.sort_unstable();
        addresses.dedup();
        let contexts = candidates.iter().map(|p| p.context).collect();
        Self {
            candidates,
            addresses,
            contexts,
        }
    }

    /// Parse a candidate list of whitespace-separated hex triples
    /// `caller pc context`
    pub fn parse(text: &str) -> Result<Self> {
        parse_candidates(text).map(Self::new)
    }

    /// Read and parse a candidate list file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context("tap candidate list")?;
        Self::parse(&text)
    }

    /// Exact membership test
    pub fn admits(&self, point: &ProgramPoint) -> bool {
        self.candidates.contains(point)
    }

    /// Whether any candidate lives in address space `context`
    pub fn watches_context(&self, context: u64) -> bool {
        self.contexts.contains(&context)
    }

    /// Whether some candidate address lies in `[start, end)`
    ///
    /// Compares the lower bounds of both ends in the sorted address list;
    /// differing bounds mean at least one address falls inside.
    pub fn region_overlaps(&self, start: u64, end: u64) -> bool {
        let lo = self.addresses.partition_point(|&a| a < start);
        let hi = self.addresses.partition_point(|&a| a < end);
        hi > lo
    }

    /// Sorted, deduplicated candidate instruction addresses
    pub fn addresses(&self) -> &[u64] {
        &self.addresses
    }

    /// Iterate the candidate program points
    pub fn candidates(&self) -> impl Iterator<Item = &ProgramPoint> {
        self.candidates.iter()
    }

    /// Number of distinct candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the filter admits nothing
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl FromIterator<ProgramPoint> for AdmissionFilter {
    fn from_iter<I: IntoIterator<Item = ProgramPoint>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Parse whitespace-separated hex triples into program points
pub fn parse_candidates(text: &str) -> Result<Vec<ProgramPoint>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() % 3 != 0 {
        return Err(Error::param(
            "tap candidate list",
            format!(
                "expected caller/pc/context triples, found {} trailing value(s)",
                words.len() % 3
            ),
        ));
    }
    words
        .chunks_exact(3)
        .map(|w| {
            Ok(ProgramPoint::new(
                parse_hex_word(w[0])?,
                parse_hex_word(w[1])?,
                parse_hex_word(w[2])?,
            ))
        })
        .collect()
}

/// Parse a hexadecimal address with an optional `0x` prefix
///
/// Signs are rejected, so `+3` is as invalid as `-3`.
pub fn parse_hex_word(word: &str) -> Result<u64> {
    let digits = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word);
    if digits.starts_with(|c| c == '+' || c == '-') {
        return Err(Error::param("hex address", format!("{:?} is signed", word)));
    }
    u64::from_str_radix(digits, 16).with_context("hex address")
}
