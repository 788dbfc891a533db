//! Error types for stecore

use thiserror::Error;

/// Main error type for site conversion operations
#[derive(Error, Debug)]
pub enum SiteError {
    /// Password data contains a character the codec cannot represent
    #[error("Invalid character in password data")]
    InvalidCharacter,

    /// A high surrogate was not followed by a low surrogate
    #[error("Unpaired surrogate in password input")]
    UnpairedSurrogate,

    /// Encoded password input is not well formed
    #[error("Malformed encoded password: {0}")]
    MalformedInput(String),

    /// Decoded value exceeds the Unicode code point range
    #[error("Encoded value out of range: {0:#x}")]
    OutOfRange(u32),

    /// Site template or document lacks the expected element structure
    #[error("Malformed site template: {0}")]
    TemplateMalformed(String),

    /// sftp-config.json could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    /// A required config key is absent
    #[error("Missing required setting: {0}")]
    MissingField(String),

    /// The project has no saved name to derive the site name from
    #[error("Project is unsaved, cannot derive a site name")]
    ProjectUnsaved,

    /// Referenced file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<quick_xml::Error> for SiteError {
    fn from(err: quick_xml::Error) -> Self {
        SiteError::TemplateMalformed(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SiteError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        SiteError::TemplateMalformed(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::ConfigParseError(err.to_string())
    }
}

/// Result type alias for site conversion operations
pub type Result<T> = std::result::Result<T, SiteError>;
