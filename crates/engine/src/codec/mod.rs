//! Byte-level packet codec primitives.
//!
//! Decoders consume fields in protocol order through a [`PacketReader`];
//! they never read past the end of the buffer and report malformed input as
//! a [`DecodeError`] instead of panicking.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::DecodeError;
pub use reader::PacketReader;
pub use writer::PacketWriter;
