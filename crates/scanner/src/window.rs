//! Per-program-point sliding windows over written bytes

use keyscan_api::{validate, Error, ProgramPoint, Result};
use keyscan_params::MAX_KEY_SIZE;
use std::collections::HashMap;
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Lifecycle of a program point's window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// No byte has been seen for this program point
    Empty,
    /// Fewer than `key_size` bytes seen so far
    Filling,
    /// At least `key_size` bytes seen; stays here for good
    Filled,
}

/// The last `key_size` bytes written at one program point
///
/// Every byte is stored twice, at `start` and `start + key_size`, so the
/// current window is always the contiguous slice beginning at `start`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ContextWindow {
    buf: Vec<u8>,
    key_size: usize,
    start: usize,
    filled: bool,
}

impl ContextWindow {
    fn new(key_size: usize) -> Self {
        Self {
            buf: vec![0u8; 2 * key_size],
            key_size,
            start: 0,
            filled: false,
        }
    }

    /// Shift one byte in, returning the window if it is full afterwards
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        let n = self.key_size;
        self.buf[self.start] = byte;
        self.buf[self.start + n] = byte;
        self.start += 1;
        if self.start == n {
            self.start = 0;
            self.filled = true;
        }
        self.current()
    }

    /// The current window, oldest byte first, once full
    pub fn current(&self) -> Option<&[u8]> {
        if self.filled {
            Some(&self.buf[self.start..self.start + self.key_size])
        } else {
            None
        }
    }

    /// Write cursor, always in `0..key_size`
    pub fn start(&self) -> usize {
        self.start
    }

    /// Filling or Filled
    pub fn state(&self) -> WindowState {
        if self.filled {
            WindowState::Filled
        } else {
            WindowState::Filling
        }
    }
}

impl core::fmt::Debug for ContextWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContextWindow")
            .field("key_size", &self.key_size)
            .field("start", &self.start)
            .field("filled", &self.filled)
            .finish_non_exhaustive()
    }
}

/// Windows for every program point seen so far
///
/// Windows are created on first sight and never evicted. With a capacity set,
/// bytes for program points beyond the first `capacity` distinct ones are
/// dropped instead.
#[derive(Debug)]
pub struct ContextWindowTracker {
    key_size: usize,
    windows: HashMap<ProgramPoint, ContextWindow>,
    capacity: Option<usize>,
    dropped: u64,
}

impl ContextWindowTracker {
    /// Create a tracker for windows of `key_size` bytes
    pub fn new(key_size: usize) -> Result<Self> {
        if key_size == 0 {
            return Err(Error::param("key size", "must be at least one byte"));
        }
        validate::key_size(key_size, MAX_KEY_SIZE)?;
        Ok(Self {
            key_size,
            windows: HashMap::new(),
            capacity: None,
            dropped: 0,
        })
    }

    /// Bound the number of distinct program points tracked
    pub fn with_capacity_limit(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// An empty tracker with the same key size and capacity
    pub fn fresh(&self) -> Self {
        Self {
            key_size: self.key_size,
            windows: HashMap::new(),
            capacity: self.capacity,
            dropped: 0,
        }
    }

    /// Window width in bytes
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// The configured capacity bound, if any
    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    /// Feed one byte for `point`
    ///
    /// Returns the full window after the shift, or `None` while the window is
    /// still filling or the point was refused for lack of capacity.
    pub fn observe_byte(&mut self, point: ProgramPoint, byte: u8) -> Option<&[u8]> {
        if !self.windows.contains_key(&point) {
            if let Some(cap) = self.capacity {
                if self.windows.len() >= cap {
                    if self.dropped == 0 {
                        warn!(
                            capacity = cap,
                            caller = point.caller,
                            pc = point.pc,
                            context = point.context,
                            "context capacity reached; new program points are not tracked"
                        );
                    }
                    self.dropped += 1;
                    return None;
                }
            }
        }

        let key_size = self.key_size;
        self.windows
            .entry(point)
            .or_insert_with(|| ContextWindow::new(key_size))
            .push(byte)
    }

    /// The window for `point`, if one exists
    pub fn window(&self, point: &ProgramPoint) -> Option<&ContextWindow> {
        self.windows.get(point)
    }

    /// State of `point`'s window
    pub fn state(&self, point: &ProgramPoint) -> WindowState {
        self.windows
            .get(point)
            .map_or(WindowState::Empty, ContextWindow::state)
    }

    /// Number of distinct program points with a window
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window has been created yet
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Bytes refused because of the capacity bound
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
