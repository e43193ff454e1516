//! Fixed capacities and default file names

/// Largest private key, in bytes, a context window can hold
///
/// Windows are allocated at twice this size. A curve whose modulus needs more
/// bytes than this is rejected at configuration time.
pub const MAX_KEY_SIZE: usize = 64;

/// Code region length assumed when deciding whether a region needs byte-level
/// monitoring
pub const ASSUMED_REGION_SIZE: u64 = 256;

/// Default name of the curve and public-key configuration file
pub const DEFAULT_CONFIG_FILE: &str = "ecckeyfind_config.txt";

/// Default name of the tap candidate list
pub const DEFAULT_CANDIDATES_FILE: &str = "keyfind_candidates.txt";

/// Default name of the match report
pub const DEFAULT_REPORT_FILE: &str = "key_matches.txt";
