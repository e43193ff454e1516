//! Scanner configuration
//!
//! Two formats are understood. TOML:
//!
//! ```toml
//! curve = "secp256k1"        # optional, fills p/a/b/gx/gy
//! pubx = "0xc215aa61..."
//! puby = "0xbd76f2b9..."
//! max_contexts = 100000      # optional
//!
//! [[tap]]
//! caller = "0x1"
//! pc = "0x2"
//! context = "0x3"
//! ```
//!
//! and the older line format, one `key: value` per line with `#` comments
//! and keys `p a b g1 g2 pub1 pub2`.
//!
//! Curve integers are strings in the base-prefix notation of
//! [`keyscan_algorithms::bigint`], or bare TOML integers. Tap fields are
//! always hex strings, as in the candidate list, and a bare integer there is
//! rejected. Anything missing or malformed is a hard error: a scanner is
//! never started on a partial configuration.

use crate::admission::{parse_hex_word, AdmissionFilter};
use keyscan_algorithms::ec::{Curve, KeyVerifier};
use keyscan_api::{validate, Error, ProgramPoint, Result, ResultExt};
use keyscan_params::{NamedCurve, DEFAULT_CANDIDATES_FILE, DEFAULT_CONFIG_FILE, MAX_KEY_SIZE};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Curve parameters and target public key, still in string form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurveConfig {
    /// Field prime
    pub p: Option<String>,
    /// The 'a' coefficient
    pub a: Option<String>,
    /// The 'b' coefficient
    pub b: Option<String>,
    /// Generator x-coordinate
    pub gx: Option<String>,
    /// Generator y-coordinate
    pub gy: Option<String>,
    /// Public key x-coordinate
    pub pubx: Option<String>,
    /// Public key y-coordinate
    pub puby: Option<String>,
}

impl CurveConfig {
    /// Start from a named curve's domain parameters
    pub fn named(curve: &NamedCurve) -> Self {
        Self {
            p: Some(curve.p.to_string()),
            a: Some(curve.a.to_string()),
            b: Some(curve.b.to_string()),
            gx: Some(curve.gx.to_string()),
            gy: Some(curve.gy.to_string()),
            pubx: None,
            puby: None,
        }
    }

    /// Set the target public key
    pub fn with_public_key(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.pubx = Some(x.into());
        self.puby = Some(y.into());
        self
    }

    /// Validate every field and build the verifier
    ///
    /// Fails when a field is missing or unparseable, when p < 3 or turns out
    /// composite while building the table, when the generator or public key
    /// is off the curve, or when the key size exceeds [`MAX_KEY_SIZE`].
    pub fn build_verifier(&self) -> Result<KeyVerifier> {
        let p = validate::required(self.p.as_deref(), "p")?;
        let a = validate::required(self.a.as_deref(), "a")?;
        let b = validate::required(self.b.as_deref(), "b")?;
        let gx = validate::required(self.gx.as_deref(), "gx (g1)")?;
        let gy = validate::required(self.gy.as_deref(), "gy (g2)")?;
        let pubx = validate::required(self.pubx.as_deref(), "pubx (pub1)")?;
        let puby = validate::required(self.puby.as_deref(), "puby (pub2)")?;

        let curve = Curve::from_strs(p, a, b)?;
        validate::key_size(curve.field().size_bytes(), MAX_KEY_SIZE)?;
        let generator = curve
            .point_from_strs(gx, gy)
            .with_context("generator point")?;
        let public_key = curve
            .point_from_strs(pubx, puby)
            .with_context("public key")?;

        KeyVerifier::try_new(&curve, &generator, &public_key)
    }

    fn set_legacy(&mut self, key: &str, value: &str) {
        let slot = match key {
            "p" => &mut self.p,
            "a" => &mut self.a,
            "b" => &mut self.b,
            "g1" => &mut self.gx,
            "g2" => &mut self.gy,
            "pub1" => &mut self.pubx,
            "pub2" => &mut self.puby,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

/// Everything needed to start a scanner
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanConfig {
    /// Curve and key parameters
    pub curve: CurveConfig,
    /// Tap candidates; `None` scans every program point
    pub taps: Option<Vec<ProgramPoint>>,
    /// Upper bound on tracked program points; `None` is unbounded
    pub max_contexts: Option<usize>,
}

/// An integer written either as a TOML string or a bare TOML integer
#[derive(Deserialize)]
#[serde(untagged)]
enum IntValue {
    Text(String),
    Int(i64),
}

impl IntValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(i) => i.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTap {
    caller: String,
    pc: String,
    context: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    curve: Option<String>,
    p: Option<IntValue>,
    a: Option<IntValue>,
    b: Option<IntValue>,
    #[serde(alias = "g1")]
    gx: Option<IntValue>,
    #[serde(alias = "g2")]
    gy: Option<IntValue>,
    #[serde(alias = "pub1")]
    pubx: Option<IntValue>,
    #[serde(alias = "pub2")]
    puby: Option<IntValue>,
    max_contexts: Option<usize>,
    tap: Option<Vec<RawTap>>,
}

impl ScanConfig {
    /// Build a config for a named curve and public key
    pub fn named(curve: &NamedCurve, pubx: impl Into<String>, puby: impl Into<String>) -> Self {
        Self {
            curve: CurveConfig::named(curve).with_public_key(pubx, puby),
            taps: None,
            max_contexts: None,
        }
    }

    /// Restrict scanning to the given taps
    pub fn with_taps(mut self, taps: Vec<ProgramPoint>) -> Self {
        self.taps = Some(taps);
        self
    }

    /// Bound the number of tracked program points
    pub fn with_max_contexts(mut self, max: usize) -> Self {
        self.max_contexts = Some(max);
        self
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text)
            .map_err(|e| Error::serialization("TOML configuration", e.to_string()))?;

        let mut curve = match raw.curve.as_deref() {
            Some(name) => {
                let named = keyscan_params::curves::by_name(name).ok_or_else(|| {
                    Error::param("curve", format!("unknown curve name {:?}", name))
                })?;
                CurveConfig::named(&named)
            }
            None => CurveConfig::default(),
        };
        // Explicit values override the named curve's
        let fields = [
            (raw.p, &mut curve.p),
            (raw.a, &mut curve.a),
            (raw.b, &mut curve.b),
            (raw.gx, &mut curve.gx),
            (raw.gy, &mut curve.gy),
            (raw.pubx, &mut curve.pubx),
            (raw.puby, &mut curve.puby),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = Some(value.into_string());
            }
        }

        let taps = match raw.tap {
            Some(taps) => Some(
                taps.into_iter()
                    .map(|t| {
                        Ok(ProgramPoint::new(
                            parse_hex_word(&t.caller)?,
                            parse_hex_word(&t.pc)?,
                            parse_hex_word(&t.context)?,
                        ))
                    })
                    .collect::<Result<Vec<_>>>()
                    .with_context("tap table")?,
            ),
            None => None,
        };

        Ok(Self {
            curve,
            taps,
            max_contexts: raw.max_contexts,
        })
    }

    /// Parse the line-oriented `key: value` format
    ///
    /// Blank lines and lines starting with `#` are skipped, unknown keys are
    /// ignored and a later line wins over an earlier one.
    pub fn from_legacy_str(text: &str) -> Self {
        let mut curve = CurveConfig::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(3, ':');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();
            curve.set_legacy(key, value);
        }
        Self {
            curve,
            taps: None,
            max_contexts: None,
        }
    }

    /// Load a config file, choosing the format by extension
    ///
    /// `.toml` files are parsed as TOML, anything else as the line format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context("scanner configuration")?;
        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&text)
        } else {
            Ok(Self::from_legacy_str(&text))
        }
    }

    /// Load the default file pair from `dir`
    ///
    /// The configuration file is required. A missing candidate list is not an
    /// error, it only means every write will be scanned.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut config = Self::load(dir.join(DEFAULT_CONFIG_FILE))?;
        let candidates = dir.join(DEFAULT_CANDIDATES_FILE);
        if candidates.is_file() {
            let filter = AdmissionFilter::load(&candidates)?;
            info!(taps = filter.len(), "loaded tap candidates");
            config.taps = Some(filter.candidates().copied().collect());
        } else {
            warn!(
                file = %candidates.display(),
                "no key tap candidates defined; proceeding, but it may be slow"
            );
        }
        Ok(config)
    }

    /// The admission filter described by `taps`, if any
    pub fn admission_filter(&self) -> Option<AdmissionFilter> {
        self.taps
            .as_ref()
            .map(|taps| AdmissionFilter::new(taps.iter().copied()))
    }
}
