//! Image upload policy
//!
//! Naming, extension and size checks and directory layout for uploaded
//! images. Files are stored under `runtime_root/save_path` with a name
//! derived from a digest of the original stem, keeping the extension.

use std::io;
use std::path::{Path, PathBuf};

use crate::crypto::sha256_hex;

/// Scratch file created and removed to confirm the image directory takes writes
const WRITE_CHECK_FILE: &str = ".write-check";

#[derive(Debug, Clone)]
pub struct ImagePolicy {
    /// Public URL prefix, without trailing slash
    pub prefix_url: String,
    /// Root directory for runtime files
    pub runtime_root: PathBuf,
    /// Image directory relative to `runtime_root`, with trailing slash
    pub save_path: String,
    /// Upper bound in bytes
    pub max_size: usize,
    /// Lowercased, dot-prefixed extensions
    pub allow_exts: Vec<String>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            prefix_url: "http://127.0.0.1:8000".to_string(),
            runtime_root: PathBuf::from("runtime/"),
            save_path: "upload/images/".to_string(),
            max_size: 5 * 1024 * 1024,
            allow_exts: vec![".jpg".into(), ".jpeg".into(), ".png".into()],
        }
    }
}

impl ImagePolicy {
    /// Stored name: hex digest of the stem plus the original extension
    pub fn image_name(&self, original: &str) -> String {
        let file_name = Path::new(original)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(original);
        let ext = extension(file_name);
        let stem = &file_name[..file_name.len() - ext.len()];
        format!("{}{}", sha256_hex(stem.as_bytes()), ext)
    }

    pub fn check_ext(&self, name: &str) -> bool {
        let ext = extension(name).to_ascii_lowercase();
        !ext.is_empty() && self.allow_exts.iter().any(|a| a.eq_ignore_ascii_case(&ext))
    }

    pub fn check_size(&self, len: usize) -> bool {
        len <= self.max_size
    }

    /// Absolute-or-relative directory where images land
    pub fn full_dir(&self) -> PathBuf {
        self.runtime_root.join(&self.save_path)
    }

    /// Path relative to the runtime root, as returned to clients
    pub fn save_url(&self, name: &str) -> String {
        format!("{}{}", self.save_path, name)
    }

    pub fn image_url(&self, name: &str) -> String {
        format!("{}/{}", self.prefix_url, self.save_url(name))
    }

    /// Create the image directory when missing and confirm it is writable
    pub async fn ensure_dir(&self) -> io::Result<PathBuf> {
        let dir = self.full_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let meta = tokio::fs::metadata(&dir).await?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", dir.display()),
            ));
        }

        // The directory must accept a write, not just look writable
        let marker = dir.join(WRITE_CHECK_FILE);
        tokio::fs::write(&marker, b"").await.map_err(|e| {
            io::Error::new(e.kind(), format!("{} is not writable: {e}", dir.display()))
        })?;
        tokio::fs::remove_file(&marker).await?;
        Ok(dir)
    }
}

/// Extension including the dot, or empty
fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(i) => &name[i..],
    }
}

/// Parse a comma-separated extension list into the policy's form
pub fn parse_exts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_name_keeps_extension() {
        let policy = ImagePolicy::default();
        let name = policy.image_name("cat.PNG");
        assert!(name.ends_with(".PNG"));
        assert_eq!(name.len(), 64 + 4);
        assert_eq!(name, policy.image_name("cat.PNG"));
        assert_ne!(name, policy.image_name("dog.PNG"));
    }

    #[test]
    fn test_image_name_strips_directories() {
        let policy = ImagePolicy::default();
        assert_eq!(policy.image_name("../../cat.png"), policy.image_name("cat.png"));
    }

    #[test]
    fn test_check_ext_case_insensitive() {
        let policy = ImagePolicy::default();
        assert!(policy.check_ext("a.JPG"));
        assert!(policy.check_ext("a.jpeg"));
        assert!(!policy.check_ext("a.gif"));
        assert!(!policy.check_ext("png"));
        assert!(!policy.check_ext(".png"));
    }

    #[test]
    fn test_check_size_bound() {
        let policy = ImagePolicy::default();
        assert!(policy.check_size(5 * 1024 * 1024));
        assert!(!policy.check_size(5 * 1024 * 1024 + 1));
    }

    #[test]
    fn test_urls() {
        let policy = ImagePolicy::default();
        assert_eq!(policy.save_url("x.png"), "upload/images/x.png");
        assert_eq!(
            policy.image_url("x.png"),
            "http://127.0.0.1:8000/upload/images/x.png"
        );
    }

    #[test]
    fn test_parse_exts() {
        assert_eq!(parse_exts(".JPG, png,,"), vec![".jpg", ".png"]);
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let policy = ImagePolicy {
            runtime_root: tmp.path().to_path_buf(),
            ..ImagePolicy::default()
        };
        let dir = policy.ensure_dir().await.unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("upload/images"));
    }

    #[tokio::test]
    async fn test_ensure_dir_leaves_no_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let policy = ImagePolicy {
            runtime_root: tmp.path().to_path_buf(),
            ..ImagePolicy::default()
        };
        let dir = policy.ensure_dir().await.unwrap();
        assert!(!dir.join(WRITE_CHECK_FILE).exists());
        // Idempotent on an existing directory
        assert_eq!(policy.ensure_dir().await.unwrap(), dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ensure_dir_rejects_unwritable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let policy = ImagePolicy {
            runtime_root: tmp.path().to_path_buf(),
            ..ImagePolicy::default()
        };
        let dir = policy.full_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users write through mode bits
        let writable = std::fs::write(dir.join("x"), b"").is_ok();
        let result = policy.ensure_dir().await;
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        if writable {
            assert!(result.is_ok());
        } else {
            assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
        }
    }

    #[tokio::test]
    async fn test_ensure_dir_rejects_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("upload"), b"x").unwrap();
        let policy = ImagePolicy {
            runtime_root: tmp.path().to_path_buf(),
            ..ImagePolicy::default()
        };
        assert!(policy.ensure_dir().await.is_err());
    }
}
