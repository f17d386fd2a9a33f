//! Create-vs-update selection for archive targets.

use std::path::Path;

/// How a build operation opens its archive target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveMode {
    /// No file exists at the target; a fresh archive is written.
    Create,
    /// A file exists; its entries are kept and new entries are added,
    /// replacing any entry with the same stored name.
    Update,
}

impl ArchiveMode {
    /// Selects the mode for `archive_path`.
    ///
    /// Running the same build twice against one target therefore updates
    /// the archive instead of failing on an existing file.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziptrack_core::ArchiveMode;
    ///
    /// assert_eq!(
    ///     ArchiveMode::select("/definitely/not/here.zip"),
    ///     ArchiveMode::Create
    /// );
    /// ```
    #[must_use]
    pub fn select(archive_path: impl AsRef<Path>) -> Self {
        if archive_path.as_ref().exists() {
            Self::Update
        } else {
            Self::Create
        }
    }

    /// Lowercase name used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

impl std::fmt::Display for ArchiveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
