//! Data models for site settings

use serde::{Deserialize, Serialize};

use crate::ACCESS_FTP;

/// Canonical site settings record
///
/// Every field is an opaque string; booleans are stored in the string forms
/// the legacy formats expect (`"True"`/`"False"` for project settings,
/// `"TRUE"`/`"FALSE"` for the `usepasv` attribute). The password is kept in
/// plain text here and only obfuscated inside the XML serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Display name of the site
    pub site_name: String,
    /// Local root folder of the site
    pub site_root: String,
    /// Default images folder
    pub image_folder: String,
    /// Public HTTP address of the site
    pub remote_url: String,
    /// Transfer protocol: "ftp", "sftp" or "ftps"
    pub access_type: String,
    /// Remote host name
    pub hostname: String,
    /// Remote root path
    pub remote_path: String,
    /// Remote login user
    pub remote_user: String,
    /// Remote login password, plain text
    pub remote_password: String,
    /// Upload on save: "True" or "False"
    pub auto_upload: String,
    /// Sync down when the project opens: "True" or "False"
    pub checkout_when_open: String,
    /// FTP passive mode: "TRUE" or "FALSE"
    pub passive_mode: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            site_root: String::new(),
            image_folder: String::new(),
            remote_url: String::new(),
            access_type: ACCESS_FTP.to_string(),
            hostname: String::new(),
            remote_path: String::new(),
            remote_user: String::new(),
            remote_password: String::new(),
            auto_upload: "False".to_string(),
            checkout_when_open: "False".to_string(),
            passive_mode: "FALSE".to_string(),
        }
    }
}

/// Partial settings record
///
/// Produced by importers that only know a subset of the fields. Absent
/// fields keep their value in the base record when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub site_name: Option<String>,
    pub site_root: Option<String>,
    pub image_folder: Option<String>,
    pub remote_url: Option<String>,
    pub access_type: Option<String>,
    pub hostname: Option<String>,
    pub remote_path: Option<String>,
    pub remote_user: Option<String>,
    pub remote_password: Option<String>,
    pub auto_upload: Option<String>,
    pub checkout_when_open: Option<String>,
    pub passive_mode: Option<String>,
}

impl SettingsPatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this patch onto `base`, field by field.
    ///
    /// Present fields override, absent fields are retained from the base.
    pub fn apply(&self, base: &mut SiteSettings) {
        fn put(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        put(&mut base.site_name, &self.site_name);
        put(&mut base.site_root, &self.site_root);
        put(&mut base.image_folder, &self.image_folder);
        put(&mut base.remote_url, &self.remote_url);
        put(&mut base.access_type, &self.access_type);
        put(&mut base.hostname, &self.hostname);
        put(&mut base.remote_path, &self.remote_path);
        put(&mut base.remote_user, &self.remote_user);
        put(&mut base.remote_password, &self.remote_password);
        put(&mut base.auto_upload, &self.auto_upload);
        put(&mut base.checkout_when_open, &self.checkout_when_open);
        put(&mut base.passive_mode, &self.passive_mode);
    }

    /// Return a copy of `base` with this patch applied
    pub fn merge(&self, base: &SiteSettings) -> SiteSettings {
        let mut merged = base.clone();
        self.apply(&mut merged);
        merged
    }
}

impl From<SiteSettings> for SettingsPatch {
    /// A full record viewed as a patch: every field present
    fn from(settings: SiteSettings) -> Self {
        Self {
            site_name: Some(settings.site_name),
            site_root: Some(settings.site_root),
            image_folder: Some(settings.image_folder),
            remote_url: Some(settings.remote_url),
            access_type: Some(settings.access_type),
            hostname: Some(settings.hostname),
            remote_path: Some(settings.remote_path),
            remote_user: Some(settings.remote_user),
            remote_password: Some(settings.remote_password),
            auto_upload: Some(settings.auto_upload),
            checkout_when_open: Some(settings.checkout_when_open),
            passive_mode: Some(settings.passive_mode),
        }
    }
}
