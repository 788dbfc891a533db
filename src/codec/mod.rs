//! Dreamweaver password obfuscation codec
//!
//! This module implements the exact character-shift scheme the legacy site
//! manager uses for the `pw` attribute of `.ste` files. It is an obfuscation,
//! not encryption, and the scheme's decode side is deliberately not the exact
//! inverse of its encode side.
//!
//! **IMPORTANT**: the variable-width encode / fixed-width decode asymmetry is
//! a quirk of the frozen external format and is required for compatibility
//! with existing `.ste` files. Do not "fix" it.

mod password;

pub use password::{decode_password, encode_password, encode_utf16_units};
