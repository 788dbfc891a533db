//! Host-facing project operations
//!
//! The editor host is reached only through the [`ProjectHost`] capability
//! passed in at construction, never through ambient global state. The host
//! stores one settings record per project under [`crate::SETTINGS_NAMESPACE`]
//! and knows the project's folders and name; everything else lives here.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Result, SiteError};
use crate::settings::{SettingsPatch, SiteSettings};
use crate::{DEFAULT_SITE_FILENAME, SETTINGS_NAMESPACE, SFTP_CONFIG_FILENAME, ste};

/// Capability the editor host provides to the site tools.
///
/// Implementations adapt a concrete editor's project API; [`MemoryHost`] is
/// a standalone implementation for tests and embedding.
pub trait ProjectHost {
    /// Settings stored under the plugin namespace, if any
    fn settings(&self) -> Option<SiteSettings>;

    /// Store the settings record under the plugin namespace
    fn set_settings(&mut self, settings: &SiteSettings) -> Result<()>;

    /// Project folders, first one is the project root
    fn folders(&self) -> &[PathBuf];

    /// Name of the saved project, `None` while unsaved
    fn project_name(&self) -> Option<String>;
}

/// In-memory [`ProjectHost`]
#[derive(Debug, Default)]
pub struct MemoryHost {
    project_name: Option<String>,
    folders: Vec<PathBuf>,
    settings: Option<SiteSettings>,
}

impl MemoryHost {
    pub fn new(project_name: Option<&str>, folders: Vec<PathBuf>) -> Self {
        Self {
            project_name: project_name.map(str::to_string),
            folders,
            settings: None,
        }
    }
}

impl ProjectHost for MemoryHost {
    fn settings(&self) -> Option<SiteSettings> {
        self.settings.clone()
    }

    fn set_settings(&mut self, settings: &SiteSettings) -> Result<()> {
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    fn project_name(&self) -> Option<String> {
        self.project_name.clone()
    }
}

/// Site tools bound to one project host
pub struct SiteTools<H: ProjectHost> {
    host: H,
}

impl<H: ProjectHost> SiteTools<H> {
    /// Bind the tools to a project host
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Borrow the underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Release the underlying host
    pub fn into_host(self) -> H {
        self.host
    }

    /// Seed or update the project's settings record.
    ///
    /// Starts from the stored settings, or from defaults when the project
    /// has none yet. The site name is derived from the project name and the
    /// site root from the first project folder; an imported patch is applied
    /// last. The result is stored back through the host and returned.
    pub fn setup_settings(&mut self, imported: Option<&SettingsPatch>) -> Result<SiteSettings> {
        let mut settings = match self.host.settings() {
            Some(existing) => existing,
            None => {
                warn!("no {SETTINGS_NAMESPACE} settings in project, seeding defaults");
                SiteSettings::default()
            }
        };

        settings.site_name = self.host.project_name().ok_or(SiteError::ProjectUnsaved)?;

        if let Some(root) = self.host.folders().first() {
            settings.site_root = root.to_string_lossy().to_string();
        }

        if let Some(patch) = imported {
            patch.apply(&mut settings);
        }

        self.host.set_settings(&settings)?;
        Ok(settings)
    }

    /// Read `sftp-config.json` from the project root folder.
    pub fn read_sftp_config(&self) -> Result<String> {
        let Some(root) = self.host.folders().first() else {
            return Err(SiteError::FileNotFound(SFTP_CONFIG_FILENAME.to_string()));
        };

        let path = root.join(SFTP_CONFIG_FILENAME);
        read_text_file(&path)
    }

    /// Import remote settings from the project's `sftp-config.json`.
    pub fn import_sftp_config(&self) -> Result<SettingsPatch> {
        let config_json = self.read_sftp_config()?;
        debug!("importing remote settings from {SFTP_CONFIG_FILENAME}");
        crate::sftp::import_config(&config_json)
    }

    /// Export the stored settings as a `.ste` file at `path`.
    ///
    /// Fails with [`SiteError::MissingField`] naming the settings namespace
    /// when the project has no settings record yet.
    pub fn export_site(&self, path: &Path) -> Result<()> {
        let settings = self
            .host
            .settings()
            .ok_or_else(|| SiteError::MissingField(SETTINGS_NAMESPACE.to_string()))?;

        let xml = ste::write_site(&settings, ste::DEFAULT_TEMPLATE)?;
        fs::write(path, xml)?;
        debug!("site exported to {}", path.display());
        Ok(())
    }

    /// Import a `.ste` file and store its settings in the project.
    ///
    /// The imported record passes through [`Self::setup_settings`], so the
    /// site name and root still come from the project itself; the file's
    /// `sitename` and `localroot` describe the exporting machine and are
    /// discarded.
    pub fn import_site_file(&mut self, path: &Path) -> Result<SiteSettings> {
        let xml = read_text_file(path)?;
        let imported = ste::read_site(&xml)?;
        debug!("site imported from {}", path.display());

        let mut patch = SettingsPatch::from(imported);
        patch.site_name = None;
        patch.site_root = None;
        self.setup_settings(Some(&patch))
    }

    /// Suggested path for a site export: the project root when there is
    /// one, the user's home directory otherwise.
    pub fn default_export_path(&self) -> PathBuf {
        let dir = match self.host.folders().first() {
            Some(root) => root.clone(),
            None => home_dir(),
        };
        dir.join(DEFAULT_SITE_FILENAME)
    }
}

/// Single-attempt file read with a typed not-found error
fn read_text_file(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SiteError::FileNotFound(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_host() -> MemoryHost {
        MemoryHost::new(Some("example"), vec![PathBuf::from("/home/user/example")])
    }

    #[test]
    fn test_setup_seeds_defaults() {
        let mut tools = SiteTools::new(project_host());
        let settings = tools.setup_settings(None).unwrap();

        assert_eq!(settings.site_name, "example");
        assert_eq!(settings.site_root, "/home/user/example");
        assert_eq!(settings.access_type, "ftp");
        assert_eq!(tools.host().settings().unwrap(), settings);
    }

    #[test]
    fn test_setup_keeps_existing_settings() {
        let mut host = project_host();
        let stored = SiteSettings {
            hostname: "ftp.example.com".to_string(),
            ..SiteSettings::default()
        };
        host.set_settings(&stored).unwrap();

        let mut tools = SiteTools::new(host);
        let settings = tools.setup_settings(None).unwrap();
        assert_eq!(settings.hostname, "ftp.example.com");
        assert_eq!(settings.site_name, "example");
    }

    #[test]
    fn test_setup_applies_patch_last() {
        let mut tools = SiteTools::new(project_host());
        let patch = SettingsPatch {
            hostname: Some("h".to_string()),
            access_type: Some("sftp".to_string()),
            ..SettingsPatch::default()
        };

        let settings = tools.setup_settings(Some(&patch)).unwrap();
        assert_eq!(settings.hostname, "h");
        assert_eq!(settings.access_type, "sftp");
        assert_eq!(settings.site_name, "example");
    }

    #[test]
    fn test_setup_unsaved_project() {
        let mut tools = SiteTools::new(MemoryHost::new(None, vec![]));
        let result = tools.setup_settings(None);
        assert!(matches!(result, Err(SiteError::ProjectUnsaved)));
    }

    #[test]
    fn test_setup_without_folders_keeps_site_root() {
        let mut tools = SiteTools::new(MemoryHost::new(Some("example"), vec![]));
        let settings = tools.setup_settings(None).unwrap();
        assert_eq!(settings.site_root, "");
    }

    #[test]
    fn test_sftp_config_without_folders() {
        let tools = SiteTools::new(MemoryHost::new(Some("example"), vec![]));
        let result = tools.read_sftp_config();
        assert!(matches!(result, Err(SiteError::FileNotFound(_))));
    }

    #[test]
    fn test_export_without_settings() {
        let tools = SiteTools::new(project_host());
        let result = tools.export_site(Path::new("/tmp/unused.ste"));
        match result {
            Err(SiteError::MissingField(key)) => assert_eq!(key, SETTINGS_NAMESPACE),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_import_discards_file_local_identity() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut origin = SiteTools::new(MemoryHost::new(
            Some("origin"),
            vec![PathBuf::from("/home/origin/site")],
        ));
        origin.setup_settings(None).unwrap();
        let path = dir.path().join("origin.ste");
        origin.export_site(&path).unwrap();

        let mut tools =
            SiteTools::new(MemoryHost::new(Some("local"), vec![dir.path().to_path_buf()]));
        let imported = tools.import_site_file(&path).unwrap();

        // The file carries origin's sitename and localroot; ours win.
        assert_eq!(imported.site_name, "local");
        assert_eq!(imported.site_root, dir.path().to_string_lossy());
    }

    #[test]
    fn test_default_export_path_uses_project_root() {
        let tools = SiteTools::new(project_host());
        assert_eq!(
            tools.default_export_path(),
            PathBuf::from("/home/user/example/example.ste")
        );
    }
}
