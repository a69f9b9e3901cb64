//! Writes settings.php, .gitignore and .env for a site

use std::path::{Component, Path, PathBuf};

use crate::core::{Io, SiteError, SiteResult};
use crate::dotenv::EnvParameters;
use crate::utils::{backup_file, random_base64, relative_from_depth};

const GITIGNORE_DIST: &str = r#"
# Environment
.env
.env.*
!.env.example
"#;

const SETTINGS_FROM_ENV: &str = r#"
$databases['default']['default'] = [
  'database' => getenv('DATABASE_NAME'),
  'username' => getenv('DATABASE_USER'),
  'password' => getenv('DATABASE_PASSWORD'),
  'host' => getenv('DATABASE_HOST'),
  'port' => getenv('DATABASE_PORT'),
  'driver' => 'mysql',
  'prefix' => '',
];
"#;

const SETTINGS_LOCAL: &str = r#"
if (file_exists($app_root . '/' . $site_path . '/settings.local.php')) {
  include $app_root . '/' . $site_path . '/settings.local.php';
}
"#;

/// Generates environment files for the site rooted at `site_root`
pub struct DotenvGenerator<'a> {
    site_root: &'a Path,
    docroot: PathBuf,
    io: &'a dyn Io,
}

impl<'a> DotenvGenerator<'a> {
    pub fn new(site_root: &'a Path, docroot: PathBuf, io: &'a dyn Io) -> Self {
        Self {
            site_root,
            docroot,
            io,
        }
    }

    /// Write every file; returns the files written in order
    pub fn generate(&self, parameters: &EnvParameters) -> SiteResult<Vec<PathBuf>> {
        let files = vec![
            self.copy_settings_file(parameters)?,
            self.write_gitignore()?,
            self.write_env_file(parameters)?,
        ];
        Ok(files)
    }

    fn settings_dir(&self) -> PathBuf {
        self.docroot.join("sites").join("default")
    }

    /// Depth of the docroot below the site root
    fn docroot_depth(&self) -> usize {
        self.docroot
            .strip_prefix(self.site_root)
            .map(|rel| {
                rel.components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .count()
            })
            .unwrap_or(1)
    }

    fn copy_settings_file(&self, parameters: &EnvParameters) -> SiteResult<PathBuf> {
        let directory = self.settings_dir();
        let source = directory.join("default.settings.php");
        let destination = directory.join("settings.php");

        if !source.is_file() {
            return Err(SiteError::FileNotFound(source));
        }

        let restore = make_writable(&directory)?;

        let mut settings = std::fs::read_to_string(&source)?;
        settings.push_str(&format!(
            "\n$settings['config_sync_directory'] = '{}';\n",
            relative_from_depth(self.docroot_depth(), "config/sync")
        ));
        settings.push_str(&format!(
            "$settings['hash_salt'] = '{}';\n",
            random_base64(55)
        ));

        if parameters.is_set("load_from_env") {
            settings.push_str(SETTINGS_FROM_ENV);
        }
        if parameters.is_set("load_settings") {
            settings.push_str(SETTINGS_LOCAL);
        }

        let result = backup_file(&destination).and_then(|_| std::fs::write(&destination, settings));

        if let Some(permissions) = restore {
            std::fs::set_permissions(&directory, permissions)?;
        }
        result?;

        self.io
            .success(&format!("File created: {}", destination.display()));
        Ok(destination)
    }

    fn write_gitignore(&self) -> SiteResult<PathBuf> {
        let destination = self.site_root.join(".gitignore");
        let example = self.site_root.join("example.gitignore");

        let content = if example.is_file() {
            backup_file(&destination)?;
            std::fs::read_to_string(&example)?
        } else if destination.is_file() {
            std::fs::read_to_string(&destination)?
        } else {
            String::new()
        };

        let content = if content.contains(".env") {
            content
        } else {
            content + GITIGNORE_DIST
        };
        std::fs::write(&destination, content)?;

        self.io
            .success(&format!("File created: {}", destination.display()));
        Ok(destination)
    }

    fn write_env_file(&self, parameters: &EnvParameters) -> SiteResult<PathBuf> {
        let destination = self.site_root.join(".env");
        backup_file(&destination)?;
        std::fs::write(&destination, parameters.to_dotenv())?;

        self.io
            .success(&format!("File created: {}", destination.display()));
        Ok(destination)
    }
}

/// Make a directory writable, returning the permissions to restore afterwards
#[cfg(unix)]
fn make_writable(directory: &Path) -> SiteResult<Option<std::fs::Permissions>> {
    use std::os::unix::fs::PermissionsExt;

    let original = std::fs::metadata(directory)?.permissions();
    if original.mode() & 0o200 != 0 {
        return Ok(None);
    }
    std::fs::set_permissions(directory, std::fs::Permissions::from_mode(0o755))?;
    Ok(Some(original))
}

#[cfg(not(unix))]
fn make_writable(_directory: &Path) -> SiteResult<Option<std::fs::Permissions>> {
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::testing::{Level, RecordingIo};
    use tempfile::tempdir;

    fn site() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let settings = dir.path().join("web/sites/default");
        std::fs::create_dir_all(&settings).unwrap();
        std::fs::write(settings.join("default.settings.php"), "<?php\n").unwrap();
        dir
    }

    #[test]
    fn test_generate_writes_all_files() {
        let dir = site();
        let io = RecordingIo::new();
        let generator = DotenvGenerator::new(dir.path(), dir.path().join("web"), &io);

        let files = generator.generate(&EnvParameters::default()).unwrap();

        assert_eq!(files.len(), 3);
        let settings =
            std::fs::read_to_string(dir.path().join("web/sites/default/settings.php")).unwrap();
        assert!(settings.starts_with("<?php\n"));
        assert!(settings.contains("$settings['config_sync_directory'] = '../config/sync';"));
        assert!(settings.contains("$settings['hash_salt'] = '"));
        assert!(!settings.contains("getenv('DATABASE_NAME')"));

        let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(gitignore.contains(".env"));

        let env = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert!(env.contains("DATABASE_NAME=drupal"));

        assert_eq!(io.messages(Level::Success).len(), 3);
    }

    #[test]
    fn test_env_loading_block() {
        let dir = site();
        let io = RecordingIo::new();
        let generator = DotenvGenerator::new(dir.path(), dir.path().join("web"), &io);
        let mut parameters = EnvParameters::default();
        parameters.set("load_from_env", "true");
        parameters.set("load_settings", "true");

        generator.generate(&parameters).unwrap();

        let settings =
            std::fs::read_to_string(dir.path().join("web/sites/default/settings.php")).unwrap();
        assert!(settings.contains("getenv('DATABASE_NAME')"));
        assert!(settings.contains("settings.local.php"));
        let env = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert!(env.contains("LOAD_FROM_ENV=true"));
    }

    #[test]
    fn test_existing_files_are_backed_up() {
        let dir = site();
        let settings = dir.path().join("web/sites/default/settings.php");
        std::fs::write(&settings, "old settings").unwrap();
        std::fs::write(dir.path().join(".env"), "OLD=1\n").unwrap();
        let io = RecordingIo::new();
        let generator = DotenvGenerator::new(dir.path(), dir.path().join("web"), &io);

        generator.generate(&EnvParameters::default()).unwrap();

        let backup = dir.path().join("web/sites/default/settings.php.original");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "old settings");
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env.original")).unwrap(),
            "OLD=1\n"
        );
    }

    #[test]
    fn test_gitignore_with_env_entry_is_kept() {
        let dir = site();
        std::fs::write(dir.path().join(".gitignore"), "vendor/\n.env\n").unwrap();
        let io = RecordingIo::new();
        let generator = DotenvGenerator::new(dir.path(), dir.path().join("web"), &io);

        generator.generate(&EnvParameters::default()).unwrap();

        let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(gitignore, "vendor/\n.env\n");
    }

    #[test]
    fn test_example_gitignore_replaces_existing() {
        let dir = site();
        std::fs::write(dir.path().join(".gitignore"), "old\n").unwrap();
        std::fs::write(dir.path().join("example.gitignore"), "vendor/\n").unwrap();
        let io = RecordingIo::new();
        let generator = DotenvGenerator::new(dir.path(), dir.path().join("web"), &io);

        generator.generate(&EnvParameters::default()).unwrap();

        let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(gitignore.starts_with("vendor/\n"));
        assert!(gitignore.contains(".env"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".gitignore.original")).unwrap(),
            "old\n"
        );
    }

    #[test]
    fn test_missing_default_settings() {
        let dir = tempdir().unwrap();
        let io = RecordingIo::new();
        let generator = DotenvGenerator::new(dir.path(), dir.path().join("web"), &io);

        let err = generator.generate(&EnvParameters::default()).unwrap_err();
        assert!(matches!(err, SiteError::FileNotFound(_)));
        assert!(!dir.path().join(".env").exists());
    }
}
