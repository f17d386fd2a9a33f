//! Options for build and extract operations.

use crate::copy::DEFAULT_CHUNK_SIZE;

/// Options for building an archive.
///
/// # Examples
///
/// ```
/// use ziptrack_core::BuildOptions;
///
/// // Bare file names, Deflate level 6, 4 KiB chunks
/// let options = BuildOptions::default();
///
/// let custom = BuildOptions::default()
///     .with_preserve_full_path(true)
///     .with_compression_level(Some(9))
///     .with_chunk_size(64 * 1024);
/// assert!(custom.preserve_full_path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Store each entry under its full path instead of its bare file name.
    ///
    /// The root and any drive prefix are stripped and separators become `/`,
    /// so `/home/me/a.txt` is stored as `home/me/a.txt`.
    ///
    /// Default: `false`.
    pub preserve_full_path: bool,

    /// Deflate level 1-9; `None` or `Some(0)` stores entries uncompressed.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Bytes moved per read/write step (minimum 1).
    ///
    /// Smaller chunks give finer progress at the cost of more callbacks.
    ///
    /// Default: 4096.
    pub chunk_size: usize,

    /// Record Unix permission bits on each entry (Unix only).
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            preserve_full_path: false,
            compression_level: Some(6),
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_permissions: true,
        }
    }
}

impl BuildOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether entries keep their full path.
    #[must_use]
    pub fn with_preserve_full_path(mut self, preserve: bool) -> Self {
        self.preserve_full_path = preserve;
        self
    }

    /// Sets the compression level. Values above 9 are clamped to 9.
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.compression_level = level.map(|l| l.min(9));
        self
    }

    /// Sets the chunk size in bytes.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets whether permission bits are recorded.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Returns `true` if entries are written without compression.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        matches!(self.compression_level, None | Some(0))
    }
}

/// Options for extracting an archive.
///
/// # Examples
///
/// ```
/// use ziptrack_core::ExtractOptions;
///
/// let options = ExtractOptions::default().with_respect_stored_dirs(true);
/// assert!(options.respect_stored_dirs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Recreate the directory structure stored in entry names.
    ///
    /// When `false`, every file lands directly in the destination directory
    /// under its bare name, and directory entries are skipped.
    ///
    /// Default: `false`.
    pub respect_stored_dirs: bool,

    /// Bytes moved per read/write step (minimum 1).
    ///
    /// Default: 4096.
    pub chunk_size: usize,

    /// Apply Unix permission bits stored in the archive (Unix only).
    ///
    /// Default: `false`.
    pub preserve_permissions: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            respect_stored_dirs: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_permissions: false,
        }
    }
}

impl ExtractOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether stored directories are honoured.
    #[must_use]
    pub fn with_respect_stored_dirs(mut self, respect: bool) -> Self {
        self.respect_stored_dirs = respect;
        self
    }

    /// Sets the chunk size in bytes.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets whether stored permission bits are applied.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}
