//! Extraction configuration.

/// Default mode for directories implied by an entry's path.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default mode for files when header modes are not applied.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Settings for the filesystem materializer.
///
/// # Examples
///
/// ```
/// use untar_core::ExtractionConfig;
///
/// let config = ExtractionConfig::default();
/// assert!(config.preserve_permissions);
///
/// let plain = ExtractionConfig {
///     preserve_permissions: false,
///     ..Default::default()
/// };
/// assert_eq!(plain.file_mode(0o600), 0o644);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Mode for parent directories created on demand.
    pub default_dir_mode: u32,

    /// Mode for files when `preserve_permissions` is off.
    pub default_file_mode: u32,

    /// Create entries with the mode recorded in their header.
    ///
    /// The process umask still applies.
    pub preserve_permissions: bool,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `default_dir_mode`: 0o755
    /// - `default_file_mode`: 0o644
    /// - `preserve_permissions`: true
    fn default() -> Self {
        Self {
            default_dir_mode: DEFAULT_DIR_MODE,
            default_file_mode: DEFAULT_FILE_MODE,
            preserve_permissions: true,
        }
    }
}

impl ExtractionConfig {
    /// Mode to create a directory entry with.
    #[must_use]
    pub const fn dir_mode(&self, header_mode: u32) -> u32 {
        if self.preserve_permissions {
            header_mode
        } else {
            self.default_dir_mode
        }
    }

    /// Mode to create a file entry with.
    #[must_use]
    pub const fn file_mode(&self, header_mode: u32) -> u32 {
        if self.preserve_permissions {
            header_mode
        } else {
            self.default_file_mode
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.default_dir_mode, 0o755);
        assert_eq!(config.default_file_mode, 0o644);
        assert!(config.preserve_permissions);
    }

    #[test]
    fn test_header_modes_applied_by_default() {
        let config = ExtractionConfig::default();
        assert_eq!(config.dir_mode(0o700), 0o700);
        assert_eq!(config.file_mode(0o600), 0o600);
    }

    #[test]
    fn test_defaults_when_not_preserving() {
        let config = ExtractionConfig {
            preserve_permissions: false,
            ..Default::default()
        };
        assert_eq!(config.dir_mode(0o700), 0o755);
        assert_eq!(config.file_mode(0o600), 0o644);
    }
}
