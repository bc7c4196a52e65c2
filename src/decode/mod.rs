//! Pixel codecs: packed RGB(A) words and DXT blocks.
//!
//! Everything in here is a pure function of the encoded bytes. Output
//! samples are always `[R, G, B, A]` with 16 bits per channel.

pub mod bc;
mod convert;
pub mod packed;
