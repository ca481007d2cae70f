//! Value domains of the RKPI2 header fields.
//!
//! Every enum here is closed.  The ordinal of each variant is the exact value
//! stored in the header bitstream, so variants are never reordered and new
//! ones may only take a currently reserved ordinal.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Sample rate ──────────────────────────────────────────────────────────────

/// Number of samples captured/played back per second, per channel.
///
/// Stored as a 4-bit ordinal.  Ordinals 14 and 15 are reserved and have no
/// variant, so a `SampleRate` value is always encodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SampleRate {
    Hz8000   = 0,
    Hz11025  = 1,
    Hz12000  = 2,
    Hz16000  = 3,
    Hz22050  = 4,
    Hz24000  = 5,
    Hz32000  = 6,
    Hz44100  = 7,
    Hz48000  = 8,
    Hz64000  = 9,
    Hz88200  = 10,
    Hz96000  = 11,
    Hz176400 = 12,
    Hz192000 = 13,
}

impl SampleRate {
    /// All rates in ordinal (ascending frequency) order.
    pub const ALL: [SampleRate; 14] = [
        SampleRate::Hz8000,
        SampleRate::Hz11025,
        SampleRate::Hz12000,
        SampleRate::Hz16000,
        SampleRate::Hz22050,
        SampleRate::Hz24000,
        SampleRate::Hz32000,
        SampleRate::Hz44100,
        SampleRate::Hz48000,
        SampleRate::Hz64000,
        SampleRate::Hz88200,
        SampleRate::Hz96000,
        SampleRate::Hz176400,
        SampleRate::Hz192000,
    ];

    /// Highest ordinal with an assigned rate.
    pub const MAX_ORDINAL: u8 = 13;

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns `None` for the reserved ordinals 14 and 15 (and anything wider).
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn hz(self) -> u32 {
        match self {
            SampleRate::Hz8000   => 8_000,
            SampleRate::Hz11025  => 11_025,
            SampleRate::Hz12000  => 12_000,
            SampleRate::Hz16000  => 16_000,
            SampleRate::Hz22050  => 22_050,
            SampleRate::Hz24000  => 24_000,
            SampleRate::Hz32000  => 32_000,
            SampleRate::Hz44100  => 44_100,
            SampleRate::Hz48000  => 48_000,
            SampleRate::Hz64000  => 64_000,
            SampleRate::Hz88200  => 88_200,
            SampleRate::Hz96000  => 96_000,
            SampleRate::Hz176400 => 176_400,
            SampleRate::Hz192000 => 192_000,
        }
    }

    /// Exact match only; rates outside the table are not rounded.
    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.hz() == hz)
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

// ── Sample format ────────────────────────────────────────────────────────────

/// Data type of each sample in memory.  Stored as a 2-bit ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SampleFormat {
    Signed8  = 0,
    Signed16 = 1,
    Float32  = 2,
    Float64  = 3,
}

impl SampleFormat {
    pub const ALL: [SampleFormat; 4] = [
        SampleFormat::Signed8,
        SampleFormat::Signed16,
        SampleFormat::Float32,
        SampleFormat::Float64,
    ];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::Signed8  => 1,
            SampleFormat::Signed16 => 2,
            SampleFormat::Float32  => 4,
            SampleFormat::Float64  => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, SampleFormat::Float32 | SampleFormat::Float64)
    }

    /// Short name used on the command line and in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SampleFormat::Signed8  => "s8",
            SampleFormat::Signed16 => "s16",
            SampleFormat::Float32  => "f32",
            SampleFormat::Float64  => "f64",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s8"  | "signed8"  => Some(SampleFormat::Signed8),
            "s16" | "signed16" => Some(SampleFormat::Signed16),
            "f32" | "float32"  => Some(SampleFormat::Float32),
            "f64" | "float64"  => Some(SampleFormat::Float64),
            _                  => None,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Endianness ───────────────────────────────────────────────────────────────

/// Byte order of multi-byte sample values in the payload.
///
/// This never affects the header's own byte order, which is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Endianness {
    Big    = 0,
    Little = 1,
}

impl Endianness {
    pub const ALL: [Endianness; 2] = [Endianness::Big, Endianness::Little];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Byte order of the host this crate was compiled for.
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endianness::Big    => "be",
            Endianness::Little => "le",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "be" | "big"    => Some(Endianness::Big),
            "le" | "little" => Some(Endianness::Little),
            _               => None,
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
