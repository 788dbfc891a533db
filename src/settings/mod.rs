//! Canonical settings record and merge support
//!
//! All other formats (`.ste` XML attributes, `sftp-config.json` keys) are
//! translated to and from the types in this module.

pub mod models;

pub use models::{SettingsPatch, SiteSettings};
