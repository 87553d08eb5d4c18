//! In-memory editor model
//!
//! Holds buffers, their filetypes and loaded flags, a current buffer and the
//! set of buffers shown in the current tab. Backs the CLI and the test suites.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::lines::{split_lines, strip_cr, tail_window};
use super::{BufferId, Host};
use crate::error::{BufferSourceError, HostError};

#[derive(Debug, Clone)]
struct MemoryBuffer {
    filetype: String,
    /// Raw lines; CRLF lines keep their `\r`
    lines: Vec<Vec<u8>>,
    loaded: bool,
    path: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    buffers: BTreeMap<BufferId, MemoryBuffer>,
    current: Option<BufferId>,
    tab: Vec<BufferId>,
    next_id: u32,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Adds a loaded buffer and returns its id. Ids are handed out in
    /// increasing order starting at 1.
    pub fn add_buffer(&mut self, filetype: &str, content: impl AsRef<[u8]>) -> BufferId {
        let id = BufferId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.buffers.insert(
            id,
            MemoryBuffer {
                filetype: filetype.to_string(),
                lines: split_lines(content.as_ref()),
                loaded: true,
                path: None,
            },
        );
        id
    }

    /// Reads a file into a new buffer. The filetype is detected from the
    /// extension unless one is given.
    pub fn open_file(
        &mut self,
        path: &Path,
        filetype: Option<&str>,
    ) -> Result<BufferId, BufferSourceError> {
        let content = fs::read(path)?;
        let filetype = filetype
            .map(str::to_string)
            .unwrap_or_else(|| detect_filetype(path));

        #[cfg(debug_assertions)]
        log::debug!(
            "Opened {:?} as {} ({} bytes)",
            path,
            filetype,
            content.len()
        );

        let id = self.add_buffer(&filetype, content);
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.path = Some(path.to_path_buf());
        }
        Ok(id)
    }

    pub fn set_current(&mut self, id: BufferId) {
        self.current = Some(id);
    }

    pub fn current(&self) -> Option<BufferId> {
        self.current
    }

    pub fn set_tab(&mut self, ids: Vec<BufferId>) {
        self.tab = ids;
    }

    /// Marks a buffer unloaded while keeping it listed
    pub fn unload(&mut self, id: BufferId) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.loaded = false;
        }
    }

    /// Removes a buffer entirely; later queries about it fail
    pub fn wipe(&mut self, id: BufferId) {
        self.buffers.remove(&id);
        self.tab.retain(|t| *t != id);
        if self.current == Some(id) {
            self.current = None;
        }
    }

    pub fn set_filetype(&mut self, id: BufferId, filetype: &str) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.filetype = filetype.to_string();
        }
    }

    pub fn set_content(&mut self, id: BufferId, content: impl AsRef<[u8]>) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.lines = split_lines(content.as_ref());
        }
    }

    pub fn filetype_of(&self, id: BufferId) -> Option<&str> {
        self.buffers.get(&id).map(|b| b.filetype.as_str())
    }

    pub fn path_of(&self, id: BufferId) -> Option<&Path> {
        self.buffers.get(&id).and_then(|b| b.path.as_deref())
    }

    pub fn buffer_ids(&self) -> Vec<BufferId> {
        self.buffers.keys().copied().collect()
    }

    fn current_buffer(&self) -> Option<&MemoryBuffer> {
        self.current.and_then(|id| self.buffers.get(&id))
    }
}

impl Host for MemoryHost {
    fn buffer_loaded(&self, id: BufferId) -> Result<bool, HostError> {
        self.buffers
            .get(&id)
            .map(|b| b.loaded)
            .ok_or(HostError::UnknownBuffer(id))
    }

    fn current_line_count(&self) -> usize {
        self.current_buffer().map_or(0, |b| b.lines.len())
    }

    fn byte_offset_of_line(&self, line: usize) -> Option<usize> {
        let buffer = self.current_buffer()?;
        if buffer.lines.is_empty() || line == 0 || line > buffer.lines.len() + 1 {
            return None;
        }
        let preceding: usize = buffer.lines[..line - 1].iter().map(|l| l.len() + 1).sum();
        Some(preceding + 1)
    }

    fn visible_buffers_in_current_tab(&self) -> Vec<BufferId> {
        self.tab.clone()
    }

    fn current_filetype(&self) -> String {
        self.current_buffer()
            .map(|b| b.filetype.clone())
            .unwrap_or_default()
    }

    fn read_lines(&self, max_lines: usize) -> Box<dyn Iterator<Item = Vec<u8>> + '_> {
        match self.current_buffer() {
            Some(buffer) => Box::new(
                tail_window(&buffer.lines, max_lines)
                    .iter()
                    .map(|line| strip_cr(line).to_vec()),
            ),
            None => Box::new(std::iter::empty()),
        }
    }
}

/// Maps a file extension to a filetype name. Unknown extensions map to
/// `text`.
pub fn detect_filetype(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let filetype = match ext.as_str() {
        "rs" => "rust",
        "py" | "pyi" => "python",
        "go" => "go",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" => "cpp",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "rb" => "ruby",
        "lua" => "lua",
        "vim" => "vim",
        "sh" | "bash" => "sh",
        "css" => "css",
        "scss" => "scss",
        "less" => "less",
        "html" | "htm" => "html",
        "xml" => "xml",
        "lisp" | "el" => "lisp",
        "scm" => "scheme",
        "clj" | "cljs" | "cljc" => "clojure",
        "rkt" => "racket",
        "md" | "markdown" => "markdown",
        "toml" => "toml",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        _ => "text",
    };
    filetype.to_string()
}
