//! Runtime environment detection and per-application file locations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the binary is running from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// `cargo run` or a binary under `target/`
    Development,
    /// Installed binary
    Production,
}

/// Resolves every file an application reads or writes.
///
/// Layout: `<base>/<organization>/` holds the settings file and the `logs/`
/// and `data/` directories of one application.
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    base_path: Arc<Path>,
    organization: String,
    app_id: &'static str,
}

impl PathContext {
    /// Detects the environment and picks the matching base directory.
    pub fn new(organization: impl Into<String>, app_id: &'static str) -> Self {
        let environment = Self::detect_environment();
        Self {
            environment,
            base_path: Self::default_base_path(environment).into(),
            organization: organization.into(),
            app_id,
        }
    }

    /// Uses an explicit base directory (tests, portable installs).
    pub fn with_base_path(
        base_path: PathBuf,
        organization: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment: Self::detect_environment(),
            base_path: base_path.into(),
            organization: organization.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        if let Ok(exe) = std::env::current_exe() {
            if exe.components().any(|c| c.as_os_str() == "target") {
                return RuntimeEnvironment::Development;
            }
        }
        if std::env::var_os("CARGO").is_some() {
            return RuntimeEnvironment::Development;
        }
        RuntimeEnvironment::Production
    }

    fn default_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => std::env::current_dir()
                .map(|dir| dir.join(".out"))
                .unwrap_or_else(|_| PathBuf::from(".out")),
            RuntimeEnvironment::Production => {
                dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."))
            }
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// `<base>/<organization>`
    pub fn root(&self) -> PathBuf {
        self.base_path.join(&self.organization)
    }

    /// `<root>/<app_id>.settings.ron`
    pub fn settings_file(&self) -> PathBuf {
        self.root().join(format!("{}.settings.ron", self.app_id))
    }

    /// `<root>/data/`
    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    /// `<root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.root().join("logs")
    }

    /// `<root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [self.root(), self.data_dir(), self.logs_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PathContext {
        PathContext::with_base_path(PathBuf::from("/base"), "clinic_ops", "desk")
    }

    #[test]
    fn layout_is_rooted_at_organization() {
        let ctx = ctx();
        assert_eq!(ctx.root(), PathBuf::from("/base/clinic_ops"));
        assert_eq!(
            ctx.settings_file(),
            PathBuf::from("/base/clinic_ops/desk.settings.ron")
        );
        assert_eq!(ctx.data_dir(), PathBuf::from("/base/clinic_ops/data"));
    }

    #[test]
    fn log_file_carries_timestamp() {
        assert_eq!(
            ctx().log_file("20261019-081500"),
            PathBuf::from("/base/clinic_ops/logs/desk.20261019-081500.log")
        );
    }

    #[test]
    fn ensure_directories_creates_tree() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let base = std::env::temp_dir().join(format!("paths_test_{nanos}"));
        let ctx = PathContext::with_base_path(base.clone(), "clinic_ops", "desk");

        ctx.ensure_directories().expect("create dirs");
        assert!(ctx.logs_dir().is_dir());
        assert!(ctx.data_dir().is_dir());

        let _ = std::fs::remove_dir_all(base);
    }
}
