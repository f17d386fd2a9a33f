//! Chunked stream copy with per-item and aggregate progress.
//!
//! The copier moves exactly one item's declared length from a reader to a
//! writer, one chunk at a time, and reports both percentages after every
//! non-empty chunk. Only one chunk is ever in flight.
//!
//! # Guarantees
//!
//! - Per-item bytes never exceed the declared length
//! - Reports are non-decreasing within an item and across the operation
//! - A failed item is never reported as 100% complete

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ArchiveError;
use crate::Result;
use crate::progress::ProgressSinks;
use crate::progress::Transfer;
use crate::progress::percentage;

/// Default chunk size for one read/write step (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Reusable chunk buffer.
///
/// One buffer is allocated per operation and shared by every item, so the
/// copy loop never allocates.
///
/// # Examples
///
/// ```
/// use ziptrack_core::copy::CopyBuffer;
///
/// let buffer = CopyBuffer::with_chunk_size(64 * 1024);
/// assert_eq!(buffer.chunk_size(), 64 * 1024);
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Creates a buffer with the default 4 KiB chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Creates a buffer with a custom chunk size (minimum 1 byte).
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            buf: vec![0u8; chunk_size.max(1)],
        }
    }

    /// Returns the chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies one item of `item_len` bytes from `reader` to `writer`.
///
/// Reports per-item `0` before the first chunk, then both percentages after
/// every chunk, and returns the new cumulative byte count held by `transfer`.
///
/// A zero-length item is a fast path: nothing is read, the item is reported
/// complete once and the aggregate reports its current value.
///
/// # Errors
///
/// Returns an error if:
/// - Reading from the source fails (other than `Interrupted`, which is retried)
/// - Writing to the destination fails
/// - The source yields more or fewer bytes than `item_len`
///   ([`ArchiveError::LengthMismatch`])
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use ziptrack_core::copy::{CopyBuffer, copy_with_progress};
/// use ziptrack_core::{ProgressSinks, Transfer};
///
/// let mut transfer = Transfer::new(20);
/// let mut buffer = CopyBuffer::with_chunk_size(4);
/// let mut output = Vec::new();
///
/// let total = copy_with_progress(
///     &mut Cursor::new(b"hello"),
///     &mut output,
///     5,
///     &mut transfer,
///     &mut ProgressSinks::none(),
///     &mut buffer,
/// )?;
///
/// assert_eq!(total, 5);
/// assert_eq!(output, b"hello");
/// # Ok::<(), ziptrack_core::ArchiveError>(())
/// ```
pub fn copy_with_progress<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    item_len: u64,
    transfer: &mut Transfer,
    sinks: &mut ProgressSinks<'_>,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    if item_len == 0 {
        sinks.report_item(100.0);
        sinks.report_total(transfer.percent());
        return Ok(transfer.processed());
    }

    sinks.report_item(0.0);

    let mut item_bytes: u64 = 0;
    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ArchiveError::Io(e)),
        };

        let next = item_bytes + bytes_read as u64;
        if next > item_len {
            return Err(ArchiveError::LengthMismatch {
                expected: item_len,
                actual: next,
            });
        }

        writer.write_all(&buffer.buf[..bytes_read])?;

        item_bytes = next;
        let cumulative = transfer.advance(bytes_read as u64);
        sinks.report_item(percentage(item_bytes, item_len));
        sinks.report_total(percentage(cumulative, transfer.expected()));
    }

    if item_bytes != item_len {
        return Err(ArchiveError::LengthMismatch {
            expected: item_len,
            actual: item_bytes,
        });
    }

    Ok(transfer.processed())
}
