//! RKPI2 header codec.
//!
//! # Layout
//! The header is exactly two bytes.  Bits are numbered MSB-first:
//!
//! | Bits            | Field                                        |
//! |-----------------|----------------------------------------------|
//! | `B0[7:2]`       | signature, always `0b110010`                 |
//! | `B0[1]`         | payload endianness                           |
//! | `B0[0]`,`B1[7]` | sample format (`B0[0]` is the high bit)      |
//! | `B1[6:3]`       | sample-rate ordinal, 14 and 15 reserved      |
//! | `B1[2:0]`       | channel count minus one                      |
//!
//! The header's own byte order is fixed.  The endianness field describes the
//! payload that follows, never the header itself.
//!
//! # Contract
//! [`decode`] validates the signature and the rate field and returns no
//! descriptor on failure.  [`encode`] is infallible and trusts its input; see
//! [`Header::new`] and [`Header::validate`] for the checked path.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Write};
use thiserror::Error;

use crate::format::{Endianness, SampleFormat, SampleRate};

/// Size of an encoded header in bytes.
pub const HEADER_SIZE: usize = 2;
/// Six-bit signature stored in `B0[7:2]`.
pub const SIGNATURE: u8 = 0b11_0010;
/// First byte with the signature in place and every variable bit clear.
pub const SIGNATURE_BYTE: u8 = SIGNATURE << 2;

/// Smallest and largest channel count a header can describe.
pub const MIN_CHANNELS: u8 = 1;
pub const MAX_CHANNELS: u8 = 8;

// ── Error type ───────────────────────────────────────────────────────────────

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HeaderError {
    /// The leading six bits are not the RKPI2 signature; no field was read.
    #[error("Invalid signature: expected 0b110010, found {found:#08b}")]
    InvalidSignature { found: u8 },
    /// The rate field holds a reserved ordinal (14 or 15).
    #[error("Reserved sample-rate ordinal {ordinal}")]
    ReservedRateUse { ordinal: u8 },
    #[error("Channel count {0} outside 1..=8")]
    ChannelsOutOfRange(u8),
    #[error("Header needs 2 bytes, got {len}")]
    Truncated { len: usize },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ── Descriptor ───────────────────────────────────────────────────────────────

/// Decoded RKPI2 header.
///
/// `channels` is the logical count in `1..=8`.  The fields are public so a
/// descriptor can be built literally; [`Header::new`] is the checked
/// constructor and [`Header::validate`] re-checks a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    pub endian:   Endianness,
    pub format:   SampleFormat,
    pub rate:     SampleRate,
    pub channels: u8,
}

impl Header {
    pub fn new(
        endian:   Endianness,
        format:   SampleFormat,
        rate:     SampleRate,
        channels: u8,
    ) -> Result<Self, HeaderError> {
        let header = Self { endian, format, rate, channels };
        header.validate()?;
        Ok(header)
    }

    /// Checks the channel invariant.  The rate invariant holds by type.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if (MIN_CHANNELS..=MAX_CHANNELS).contains(&self.channels) {
            Ok(())
        } else {
            Err(HeaderError::ChannelsOutOfRange(self.channels))
        }
    }

    #[inline]
    pub fn decode(raw: &[u8; HEADER_SIZE]) -> Result<Self, HeaderError> {
        decode(raw)
    }

    #[inline]
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        encode(self)
    }

    /// Alias of [`Header::encode`].
    #[inline]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        encode(self)
    }

    /// Decode the first two bytes of `buf`.  Trailing bytes are ignored.
    pub fn from_slice(buf: &[u8]) -> Result<Self, HeaderError> {
        match buf.first_chunk::<HEADER_SIZE>() {
            Some(raw) => decode(raw),
            None      => Err(HeaderError::Truncated { len: buf.len() }),
        }
    }

    /// Size in bytes of one interleaved frame (one sample per channel).
    pub fn bytes_per_frame(&self) -> usize {
        self.channels as usize * self.format.bytes_per_sample()
    }

    /// Payload data rate in bytes per second.
    pub fn bytes_per_second(&self) -> u64 {
        self.bytes_per_frame() as u64 * self.rate.hz() as u64
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let raw = encode(self);
        writer.write_u16::<BigEndian>(u16::from_be_bytes(raw))?;
        tracing::trace!(bytes = %hex::encode(raw), "wrote RKPI2 header");
        Ok(())
    }

    /// Read exactly [`HEADER_SIZE`] bytes from `reader` and decode them.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, HeaderError> {
        let raw = reader.read_u16::<BigEndian>()?.to_be_bytes();
        tracing::trace!(bytes = %hex::encode(raw), "read RKPI2 header");
        let header = decode(&raw)?;
        tracing::debug!(%header, "decoded RKPI2 header");
        Ok(header)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {}, {} ch",
            self.format, self.endian, self.rate, self.channels
        )
    }
}

impl TryFrom<[u8; HEADER_SIZE]> for Header {
    type Error = HeaderError;

    fn try_from(raw: [u8; HEADER_SIZE]) -> Result<Self, Self::Error> {
        decode(&raw)
    }
}

impl From<Header> for [u8; HEADER_SIZE] {
    fn from(header: Header) -> Self {
        encode(&header)
    }
}

// ── Codec ────────────────────────────────────────────────────────────────────

/// Parse a header bitstream.
///
/// Fails with [`HeaderError::InvalidSignature`] before reading any field, or
/// with [`HeaderError::ReservedRateUse`] for rate ordinals 14 and 15.
pub fn decode(raw: &[u8; HEADER_SIZE]) -> Result<Header, HeaderError> {
    let [b0, b1] = *raw;

    if b0 >> 2 != SIGNATURE {
        return Err(HeaderError::InvalidSignature { found: b0 >> 2 });
    }

    let endian  = (b0 >> 1) & 1;
    let format  = (b0 & 1) << 1 | b1 >> 7;
    let ordinal = (b1 >> 3) & 0x0F;

    let rate = SampleRate::from_ordinal(ordinal)
        .ok_or(HeaderError::ReservedRateUse { ordinal })?;

    // One and two bit fields cover their whole enum, so these never fall back.
    let endian = Endianness::from_ordinal(endian).unwrap_or(Endianness::Big);
    let format = SampleFormat::from_ordinal(format).unwrap_or(SampleFormat::Signed8);

    Ok(Header {
        endian,
        format,
        rate,
        channels: (b1 & 0x07) + 1,
    })
}

/// Produce the header bitstream.  No validation is performed.
///
/// A `channels` value outside `1..=8` yields a well-formed header carrying
/// the wrong channel count (`channels - 1`, wrapping, masked to three bits).
pub fn encode(header: &Header) -> [u8; HEADER_SIZE] {
    let format = header.format.ordinal();

    let b0 = SIGNATURE_BYTE
        | header.endian.ordinal() << 1
        | format >> 1;

    let b1 = (format & 1) << 7
        | header.rate.ordinal() << 3
        | (header.channels.wrapping_sub(1) & 0x07);

    [b0, b1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_cd() -> Header {
        Header::new(Endianness::Little, SampleFormat::Signed16, SampleRate::Hz44100, 2).unwrap()
    }

    #[test]
    fn minimal_header_decodes() {
        let h = decode(&[0xC8, 0x00]).unwrap();
        assert_eq!(h.endian, Endianness::Big);
        assert_eq!(h.format, SampleFormat::Signed8);
        assert_eq!(h.rate, SampleRate::Hz8000);
        assert_eq!(h.channels, 1);
    }

    #[test]
    fn format_spans_both_bytes() {
        // high bit in B0[0], low bit in B1[7]
        assert_eq!(decode(&[0xC8, 0x80]).unwrap().format, SampleFormat::Signed16);
        assert_eq!(decode(&[0xC9, 0x00]).unwrap().format, SampleFormat::Float32);
        assert_eq!(decode(&[0xC9, 0x80]).unwrap().format, SampleFormat::Float64);
    }

    #[test]
    fn signature_checked_before_rate() {
        // Reserved rate in B1, but the signature failure wins.
        match decode(&[0x00, 0x78]) {
            Err(HeaderError::InvalidSignature { found }) => assert_eq!(found, 0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reserved_rates_rejected() {
        for (b1, ordinal) in [(0x70u8, 14u8), (0x78, 15), (0xFF, 15)] {
            match decode(&[0xCB, b1]) {
                Err(HeaderError::ReservedRateUse { ordinal: o }) => assert_eq!(o, ordinal),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn encode_sets_every_field() {
        let h = Header {
            endian:   Endianness::Little,
            format:   SampleFormat::Float64,
            rate:     SampleRate::Hz192000,
            channels: 8,
        };
        assert_eq!(encode(&h), [0xCB, 0xEF]);
        assert_eq!(decode(&encode(&h)).unwrap(), h);
    }

    #[test]
    fn encode_out_of_range_channels_does_not_panic() {
        let mut h = stereo_cd();
        h.channels = 0;
        assert_eq!(h.encode()[1] & 0x07, 0x07);
        h.channels = 9;
        assert_eq!(h.encode()[1] & 0x07, 0x00);
        assert_eq!(h.encode()[0] >> 2, SIGNATURE);
    }

    #[test]
    fn new_rejects_bad_channel_counts() {
        for ch in [0u8, 9, 255] {
            assert!(matches!(
                Header::new(Endianness::Big, SampleFormat::Signed8, SampleRate::Hz8000, ch),
                Err(HeaderError::ChannelsOutOfRange(c)) if c == ch
            ));
        }
        assert!(stereo_cd().validate().is_ok());
    }

    #[test]
    fn from_slice_ignores_trailing_bytes() {
        let mut buf = stereo_cd().to_bytes().to_vec();
        buf.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(Header::from_slice(&buf).unwrap(), stereo_cd());
        assert!(matches!(Header::from_slice(&buf[..1]), Err(HeaderError::Truncated { len: 1 })));
        assert!(matches!(Header::from_slice(&[]), Err(HeaderError::Truncated { len: 0 })));
    }

    #[test]
    fn derived_rates() {
        let h = stereo_cd();
        assert_eq!(h.bytes_per_frame(), 4);
        assert_eq!(h.bytes_per_second(), 176_400);
    }

    #[test]
    fn conversions_and_display() {
        let raw: [u8; 2] = stereo_cd().into();
        assert_eq!(Header::try_from(raw).unwrap(), stereo_cd());
        assert_eq!(stereo_cd().to_string(), "s16 le, 44100 Hz, 2 ch");
    }

    #[test]
    fn io_roundtrip() {
        let mut buf = Vec::new();
        stereo_cd().write(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(Header::read(&buf[..]).unwrap(), stereo_cd());
        assert!(matches!(Header::read(&buf[..1]), Err(HeaderError::Io(_))));
    }
}
