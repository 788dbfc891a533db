//! # stecore
//!
//! A converter library for the legacy Dreamweaver `.ste` site-definition
//! format.
//!
//! ## Features
//!
//! - Export a flat project-settings record to a `.ste` XML site definition
//! - Import site definitions back into the canonical settings record
//! - Reversible Dreamweaver password obfuscation (character-shift hex codec)
//! - Import remote credentials from Sublime SFTP `sftp-config.json` files,
//!   tolerating comment lines and trailing commas
//! - Host-agnostic project layer: the editor supplies a
//!   [`ProjectHost`](project::ProjectHost) capability instead of being
//!   reached through global state
//!
//! ## Example
//!
//! ```
//! use stecore::{SiteSettings, ste};
//!
//! let settings = SiteSettings {
//!     site_name: "example".to_string(),
//!     hostname: "ftp.example.com".to_string(),
//!     remote_password: "secret".to_string(),
//!     ..SiteSettings::default()
//! };
//!
//! let xml = ste::write_site(&settings, ste::DEFAULT_TEMPLATE).unwrap();
//! let back = ste::read_site(&xml).unwrap();
//! assert_eq!(back.hostname, "ftp.example.com");
//! ```

pub mod codec;
pub mod error;
pub mod project;
pub mod settings;
pub mod sftp;
pub mod ste;

// Re-export main types
pub use codec::{decode_password, encode_password};
pub use error::{Result, SiteError};
pub use project::{MemoryHost, ProjectHost, SiteTools};
pub use settings::{SettingsPatch, SiteSettings};

/// Namespace key the settings record is stored under in the host project data
pub const SETTINGS_NAMESPACE: &str = "dwst";

/// Filename of the Sublime SFTP config read from the project root
pub const SFTP_CONFIG_FILENAME: &str = "sftp-config.json";

/// Default filename offered for site exports
pub const DEFAULT_SITE_FILENAME: &str = "example.ste";

/// XML declaration line Dreamweaver expects, including the space before `?>`
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\" ?>";

/// Access type value for plain FTP
pub const ACCESS_FTP: &str = "ftp";

/// Access type value for SFTP
pub const ACCESS_SFTP: &str = "sftp";

/// Access type value for FTP over TLS
pub const ACCESS_FTPS: &str = "ftps";
