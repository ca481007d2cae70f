pub mod format;
pub mod header;

pub use format::{Endianness, SampleFormat, SampleRate};
pub use header::{Header, HeaderError, HEADER_SIZE, decode, encode};
