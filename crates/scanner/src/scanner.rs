//! The scanner state object tying filter, windows and verifier together

use crate::admission::AdmissionFilter;
use crate::config::ScanConfig;
use crate::gate::RegionGate;
use crate::window::{ContextWindowTracker, WindowState};
use keyscan_algorithms::ec::KeyVerifier;
use keyscan_api::{ProgramPoint, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Event counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Bytes handed to the scanner
    pub bytes_observed: u64,
    /// Bytes dropped by the admission filter
    pub bytes_filtered: u64,
    /// Windows checked against the public key
    pub verifications: u64,
}

impl ScanStats {
    fn absorb(&mut self, other: &ScanStats) {
        self.bytes_observed += other.bytes_observed;
        self.bytes_filtered += other.bytes_filtered;
        self.verifications += other.verifications;
    }
}

/// Streaming key scanner
///
/// Owns the per-point windows and the match set. The verifier and filter are
/// read-only and shared, so [`Scanner::shard`] can hand out independent
/// scanners for concurrent execution units whose results are combined later
/// with [`Scanner::merge`].
///
/// Processing a byte never fails: a window that does not verify is the
/// expected case and produces no signal.
pub struct Scanner {
    verifier: Arc<KeyVerifier>,
    filter: Option<Arc<AdmissionFilter>>,
    tracker: ContextWindowTracker,
    matches: BTreeSet<ProgramPoint>,
    recovered: BTreeMap<ProgramPoint, Zeroizing<Vec<u8>>>,
    stats: ScanStats,
}

impl Scanner {
    /// Create a scanner for `verifier`, optionally restricted by `filter`
    pub fn new(verifier: KeyVerifier, filter: Option<AdmissionFilter>) -> Result<Self> {
        let tracker = ContextWindowTracker::new(verifier.key_size_bytes())?;
        match &filter {
            Some(f) => info!(
                taps = f.len(),
                key_size = verifier.key_size_bytes(),
                "scanner started"
            ),
            None => warn!(
                key_size = verifier.key_size_bytes(),
                "no tap candidates defined; scanning every write, this may be slow"
            ),
        }
        Ok(Self {
            verifier: Arc::new(verifier),
            filter: filter.map(Arc::new),
            tracker,
            matches: BTreeSet::new(),
            recovered: BTreeMap::new(),
            stats: ScanStats::default(),
        })
    }

    /// Validate `config` and build a scanner from it
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let verifier = config.curve.build_verifier()?;
        Ok(Self::new(verifier, config.admission_filter())?.with_max_contexts(config.max_contexts))
    }

    /// Bound the number of tracked program points
    pub fn with_max_contexts(mut self, max: Option<usize>) -> Self {
        self.tracker = self.tracker.with_capacity_limit(max);
        self
    }

    /// Feed one written byte
    pub fn observe_byte(&mut self, point: ProgramPoint, byte: u8) {
        self.stats.bytes_observed += 1;
        if !self.admits(&point) {
            self.stats.bytes_filtered += 1;
            return;
        }
        self.push(point, byte);
    }

    /// Feed a multi-byte write, lowest address first
    ///
    /// Admission is decided once for the whole write.
    pub fn observe_write(&mut self, point: ProgramPoint, bytes: &[u8]) {
        let n = bytes.len() as u64;
        self.stats.bytes_observed += n;
        if !self.admits(&point) {
            self.stats.bytes_filtered += n;
            return;
        }
        for &byte in bytes {
            self.push(point, byte);
        }
    }

    fn admits(&self, point: &ProgramPoint) -> bool {
        self.filter.as_ref().map_or(true, |f| f.admits(point))
    }

    fn push(&mut self, point: ProgramPoint, byte: u8) {
        let window = match self.tracker.observe_byte(point, byte) {
            Some(window) => window,
            None => return,
        };
        self.stats.verifications += 1;
        if !self.verifier.verify(window) {
            return;
        }
        if self.matches.insert(point) {
            info!(
                caller = point.caller,
                pc = point.pc,
                context = point.context,
                key = %hex::encode(window),
                "private key found"
            );
            self.recovered.insert(point, Zeroizing::new(window.to_vec()));
        }
    }

    /// Program points whose window verified at least once, ascending
    pub fn matches(&self) -> &BTreeSet<ProgramPoint> {
        &self.matches
    }

    /// Whether `point` has matched
    pub fn is_match(&self, point: &ProgramPoint) -> bool {
        self.matches.contains(point)
    }

    /// The first window that verified at `point`
    pub fn recovered_key(&self, point: &ProgramPoint) -> Option<&[u8]> {
        self.recovered.get(point).map(|k| k.as_slice())
    }

    /// Window state at `point`
    pub fn window_state(&self, point: &ProgramPoint) -> WindowState {
        self.tracker.state(point)
    }

    /// Number of distinct program points with a window
    pub fn tracked_contexts(&self) -> usize {
        self.tracker.len()
    }

    /// Bytes refused because the context capacity was exhausted
    pub fn dropped_bytes(&self) -> u64 {
        self.tracker.dropped()
    }

    /// Window width in bytes
    pub fn key_size(&self) -> usize {
        self.tracker.key_size()
    }

    /// The shared verifier
    pub fn verifier(&self) -> &KeyVerifier {
        &self.verifier
    }

    /// The shared admission filter, if any
    pub fn filter(&self) -> Option<&AdmissionFilter> {
        self.filter.as_deref()
    }

    /// Event counters
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// A region gate over this scanner's filter
    pub fn gate(&self) -> RegionGate {
        RegionGate::new(self.filter.clone())
    }

    /// A fresh scanner sharing this one's verifier, filter and capacity
    ///
    /// The shard starts with no windows and no matches.
    pub fn shard(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            filter: self.filter.clone(),
            tracker: self.tracker.fresh(),
            matches: BTreeSet::new(),
            recovered: BTreeMap::new(),
            stats: ScanStats::default(),
        }
    }

    /// Fold a shard's results into this scanner
    ///
    /// Match sets are unioned. Where both recovered a key for the same point
    /// this scanner's copy is kept. The shard's windows are discarded.
    pub fn merge(&mut self, other: Scanner) {
        debug!(
            matches = other.matches.len(),
            contexts = other.tracker.len(),
            "merging scanner shard"
        );
        let Scanner {
            matches,
            recovered,
            stats,
            ..
        } = other;
        self.matches.extend(matches);
        for (point, key) in recovered {
            self.recovered.entry(point).or_insert(key);
        }
        self.stats.absorb(&stats);
    }
}

impl core::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scanner")
            .field("filtered", &self.filter.is_some())
            .field("tracker", &self.tracker)
            .field("matches", &self.matches)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
