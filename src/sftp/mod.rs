//! Sublime SFTP `sftp-config.json` import
//!
//! The config dialect allows `//` comment lines and a trailing comma before
//! the closing brace; both are stripped with a line-based pass before the
//! remainder is parsed as JSON. The strip is not a tokenizer: a `//` or `,}`
//! inside a string value would be mangled. That matches the legacy importer
//! and the files the third-party plugin actually writes.

use serde::Deserialize;
use serde_json::Value;

use crate::ACCESS_SFTP;
use crate::error::{Result, SiteError};
use crate::settings::SettingsPatch;

/// Subset of sftp-config.json this crate understands.
///
/// Unknown keys are ignored; the real files carry a couple dozen more.
#[derive(Debug, Deserialize)]
struct SftpConfig {
    remote_path: Option<Value>,
    host: Option<Value>,
    user: Option<Value>,
    password: Option<Value>,
    upload_on_save: Option<Value>,
    sync_down_on_open: Option<Value>,
    #[serde(rename = "type")]
    access_type: Option<Value>,
    ftp_passive_mode: Option<Value>,
}

/// Remove `//` comment lines and trailing commas before a closing brace.
///
/// Lines are trimmed and rejoined without separators, so the result is a
/// single line of JSON. The comma may still be separated from the brace by
/// spaces that were interior to a line (`"key": false, }`), so the dangling
/// comma is dropped together with the whitespace after it.
pub fn strip_json_comments(text: &str) -> String {
    let joined: String = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("//"))
        .collect();

    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '}' {
            let kept = out.trim_end().len();
            if out[..kept].ends_with(',') {
                out.truncate(kept - 1);
            }
        }
        out.push(c);
    }
    out
}

/// Coerce a JSON value into the string form the settings record stores.
///
/// Booleans become `"True"`/`"False"`, strings pass through, anything else
/// is rendered as JSON text.
fn coerce_to_setting(value: &Value) -> String {
    match value {
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Import remote settings from `sftp-config.json` text.
///
/// Required keys, checked in order: `remote_path`, `host`, `user`,
/// `password`, `upload_on_save`, `sync_down_on_open`. The first absent one
/// fails with [`SiteError::MissingField`] naming it. `type` defaults to
/// `"sftp"` and `ftp_passive_mode` to `"FALSE"` when absent.
pub fn import_config(json_text: &str) -> Result<SettingsPatch> {
    let cleaned = strip_json_comments(json_text);
    let config: SftpConfig = serde_json::from_str(&cleaned)?;

    let require = |value: &Option<Value>, key: &str| -> Result<String> {
        value
            .as_ref()
            .map(coerce_to_setting)
            .ok_or_else(|| SiteError::MissingField(key.to_string()))
    };

    let remote_path = require(&config.remote_path, "remote_path")?;
    let hostname = require(&config.host, "host")?;
    let remote_user = require(&config.user, "user")?;
    let remote_password = require(&config.password, "password")?;
    let auto_upload = require(&config.upload_on_save, "upload_on_save")?;
    let checkout_when_open = require(&config.sync_down_on_open, "sync_down_on_open")?;

    // Assume SFTP when the plugin did not record a transfer type.
    let access_type = config
        .access_type
        .as_ref()
        .map(coerce_to_setting)
        .unwrap_or_else(|| ACCESS_SFTP.to_string());

    let passive_mode = config
        .ftp_passive_mode
        .as_ref()
        .map(coerce_to_setting)
        .unwrap_or_else(|| "FALSE".to_string());

    Ok(SettingsPatch {
        remote_path: Some(remote_path),
        hostname: Some(hostname),
        remote_user: Some(remote_user),
        remote_password: Some(remote_password),
        auto_upload: Some(auto_upload),
        checkout_when_open: Some(checkout_when_open),
        access_type: Some(access_type),
        passive_mode: Some(passive_mode),
        ..SettingsPatch::default()
    })
}
