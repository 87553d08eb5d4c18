//! Host editor capabilities consumed by the buffer source
//!
//! The source never touches editor state directly. Every query about buffers,
//! windows and the current buffer goes through [`Host`], so a real editor
//! binding and the in-memory model used by the CLI and tests are
//! interchangeable.

pub mod lines;
pub mod memory;

use std::fmt;

use serde::Serialize;

use crate::error::HostError;

pub use memory::MemoryHost;

/// Opaque buffer number assigned by the host, stable for the buffer's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BufferId(pub u32);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BufferId {
    fn from(id: u32) -> Self {
        BufferId(id)
    }
}

/// Capability set the host editor provides
///
/// Methods without a buffer argument operate on the host's current buffer,
/// which is the buffer named in the context of an `on_event` call.
pub trait Host {
    /// Whether the buffer is still loaded. An error means the host could not
    /// answer and callers treat the buffer as unloaded.
    fn buffer_loaded(&self, id: BufferId) -> Result<bool, HostError>;

    /// Number of lines in the current buffer
    fn current_line_count(&self) -> usize;

    /// 1-based byte offset of the start of `line` (1-based) in the current
    /// buffer. `line_count + 1` addresses one past the end. `None` when the
    /// buffer has no content.
    fn byte_offset_of_line(&self, line: usize) -> Option<usize>;

    /// Buffers displayed in any window of the current tab
    fn visible_buffers_in_current_tab(&self) -> Vec<BufferId>;

    /// Buffer-local filetype of the current buffer
    fn current_filetype(&self) -> String;

    /// Raw line contents of the current buffer, at most `max_lines` of them.
    /// Lines are undecoded bytes without their terminator.
    fn read_lines(&self, max_lines: usize) -> Box<dyn Iterator<Item = Vec<u8>> + '_>;
}

/// Size of the current buffer in bytes, newlines included
pub fn buffer_size(host: &dyn Host) -> usize {
    host.byte_offset_of_line(host.current_line_count() + 1)
        .map_or(0, |offset| offset.saturating_sub(1))
}
