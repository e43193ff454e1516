//! Offline replay of recorded tap dumps
//!
//! A recording is a pair of files. The index starts with a little-endian
//! `u32` word size (4 or 8), followed by records of four words of that size:
//! `caller pc context count`. The dump holds the bytes seen at each record's
//! program point, `count` of them per record, concatenated in index order.

use crate::scanner::Scanner;
use byteorder::{ByteOrder, LittleEndian};
use keyscan_api::{Error, ProgramPoint, Result, ResultExt};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, warn};

const HEADER_LEN: usize = 4;

/// One index record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapRecord {
    /// Where the bytes were observed
    pub point: ProgramPoint,
    /// Number of bytes this record contributes to the dump
    pub count: u64,
}

impl TapRecord {
    /// Create a record
    pub const fn new(point: ProgramPoint, count: u64) -> Self {
        Self { point, count }
    }
}

/// A parsed tap index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TapIndex {
    word_size: usize,
    records: Vec<TapRecord>,
}

impl TapIndex {
    /// Build an index from records
    ///
    /// With a word size of 4 every field must fit in 32 bits.
    pub fn new(word_size: usize, records: Vec<TapRecord>) -> Result<Self> {
        check_word_size(word_size)?;
        if word_size == 4 {
            let too_wide = records.iter().any(|r| {
                [r.point.caller, r.point.pc, r.point.context, r.count]
                    .iter()
                    .any(|&w| w > u64::from(u32::MAX))
            });
            if too_wide {
                return Err(Error::param(
                    "tap index",
                    "record field does not fit a 4-byte word",
                ));
            }
        }
        Ok(Self { word_size, records })
    }

    /// Parse an index file's contents
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::serialization(
                "tap index",
                format!("header needs {} bytes, got {}", HEADER_LEN, bytes.len()),
            ));
        }
        let word_size = LittleEndian::read_u32(&bytes[..HEADER_LEN]) as usize;
        check_word_size(word_size)?;

        let body = &bytes[HEADER_LEN..];
        let record_len = 4 * word_size;
        if body.len() % record_len != 0 {
            return Err(Error::serialization(
                "tap index",
                format!(
                    "truncated record: {} trailing bytes for {}-byte records",
                    body.len() % record_len,
                    record_len
                ),
            ));
        }

        let word = |chunk: &[u8], i: usize| -> u64 {
            let w = &chunk[i * word_size..(i + 1) * word_size];
            match word_size {
                4 => u64::from(LittleEndian::read_u32(w)),
                _ => LittleEndian::read_u64(w),
            }
        };
        let records = body
            .chunks_exact(record_len)
            .map(|chunk| {
                TapRecord::new(
                    ProgramPoint::new(word(chunk, 0), word(chunk, 1), word(chunk, 2)),
                    word(chunk, 3),
                )
            })
            .collect();

        Ok(Self { word_size, records })
    }

    /// Read and parse an index file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path).with_context("tap index file")?;
        Self::parse(&bytes)
    }

    /// Encode in the on-disk format
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN + self.records.len() * 4 * self.word_size];
        LittleEndian::write_u32(&mut out[..HEADER_LEN], self.word_size as u32);
        for (chunk, r) in out[HEADER_LEN..]
            .chunks_exact_mut(4 * self.word_size)
            .zip(&self.records)
        {
            let fields = [r.point.caller, r.point.pc, r.point.context, r.count];
            for (w, value) in chunk.chunks_exact_mut(self.word_size).zip(fields) {
                match self.word_size {
                    4 => LittleEndian::write_u32(w, value as u32),
                    _ => LittleEndian::write_u64(w, value),
                }
            }
        }
        out
    }

    /// Width of the recorded target's words
    pub fn word_size(&self) -> usize {
        self.word_size
    }

    /// Records in index order
    pub fn records(&self) -> &[TapRecord] {
        &self.records
    }

    /// Dump length implied by the index, `None` if it overflows a `u64`
    pub fn total_bytes(&self) -> Option<u64> {
        self.records
            .iter()
            .try_fold(0u64, |total, r| total.checked_add(r.count))
    }

    /// Dump ranges of every record, checked against `dump_len`
    fn ranges(&self, dump_len: usize) -> Result<Vec<(ProgramPoint, Range<usize>)>> {
        let mut offset = 0usize;
        let mut out = Vec::with_capacity(self.records.len());
        for (i, r) in self.records.iter().enumerate() {
            let end = usize::try_from(r.count)
                .ok()
                .and_then(|count| offset.checked_add(count))
                .filter(|&end| end <= dump_len)
                .ok_or_else(|| {
                    Error::serialization(
                        "tap dump",
                        format!(
                            "record {} ({} bytes at offset {}) runs past the {}-byte dump",
                            i, r.count, offset, dump_len
                        ),
                    )
                })?;
            out.push((r.point, offset..end));
            offset = end;
        }
        if offset < dump_len {
            warn!(
                extra = dump_len - offset,
                "tap dump is longer than its index; trailing bytes ignored"
            );
        }
        Ok(out)
    }

    /// Collect the bytes recorded at `point`
    pub fn extract(&self, dump: &[u8], point: &ProgramPoint) -> Result<Vec<u8>> {
        Ok(self
            .ranges(dump.len())?
            .into_iter()
            .filter(|(p, _)| p == point)
            .flat_map(|(_, range)| dump[range].iter().copied())
            .collect())
    }
}

fn check_word_size(word_size: usize) -> Result<()> {
    match word_size {
        4 | 8 => Ok(()),
        other => Err(Error::serialization(
            "tap index",
            format!("word size must be 4 or 8, got {}", other),
        )),
    }
}

/// Totals of one replay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records replayed
    pub records: usize,
    /// Bytes fed to the scanner
    pub bytes: u64,
}

/// Feed a recorded dump through `scanner`, one write per record
///
/// The dump is checked against the index before anything is fed, so a
/// truncated dump leaves the scanner untouched.
pub fn replay(index: &TapIndex, dump: &[u8], scanner: &mut Scanner) -> Result<ReplaySummary> {
    let ranges = index.ranges(dump.len())?;
    let mut summary = ReplaySummary::default();
    for (point, range) in ranges {
        summary.bytes += range.len() as u64;
        summary.records += 1;
        scanner.observe_write(point, &dump[range]);
    }
    debug!(
        records = summary.records,
        bytes = summary.bytes,
        matches = scanner.matches().len(),
        "tap dump replayed"
    );
    Ok(summary)
}

/// Load an index and dump pair and replay it
pub fn replay_files(
    index_path: impl AsRef<Path>,
    dump_path: impl AsRef<Path>,
    scanner: &mut Scanner,
) -> Result<ReplaySummary> {
    let index = TapIndex::load(index_path)?;
    let dump = std::fs::read(dump_path).with_context("tap dump file")?;
    replay(&index, &dump, scanner)
}
