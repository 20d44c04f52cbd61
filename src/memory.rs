//! In-memory implementation of the host capability traits.
//!
//! Each document is backed by a [`ropey::Rope`]. The test suite runs against
//! this host, and it doubles as a headless host for embedding without a real
//! editor attached. Everything is single-threaded, matching the cooperative
//! scheduling model of the hosts this crate targets.

use std::{cell::RefCell, collections::HashMap, ops::Range, rc::Rc};

use miette::Result;
use ropey::Rope;

use crate::host::{
    EditTransaction, HostWorkspace, LineEnding, PaletteOptions, TextDocument, TextEditor,
};

struct Buffer {
    content: Rope,
    eol: LineEnding,
}

impl Buffer {
    fn replace(&mut self, span: Range<usize>, text: &str) {
        self.content.remove(span.clone());
        self.content.insert(span.start, text);
    }
}

/// An owned editor handle over a shared in-memory buffer.
pub struct MemoryEditor {
    uri: String,
    buffer: Rc<RefCell<Buffer>>,
}

impl TextDocument for MemoryEditor {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn eol(&self) -> LineEnding {
        self.buffer.borrow().eol
    }

    fn text(&self) -> String {
        self.buffer.borrow().content.to_string()
    }
}

impl TextEditor for MemoryEditor {
    fn document(&self) -> &dyn TextDocument {
        self
    }

    fn edit(&mut self, build: &mut dyn FnMut(&mut dyn EditTransaction)) -> Result<()> {
        let mut transaction = MemoryTransaction {
            uri: self.uri.clone(),
            buffer: Rc::clone(&self.buffer),
        };
        build(&mut transaction);
        Ok(())
    }
}

struct MemoryTransaction {
    uri: String,
    buffer: Rc<RefCell<Buffer>>,
}

impl TextDocument for MemoryTransaction {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn eol(&self) -> LineEnding {
        self.buffer.borrow().eol
    }

    fn text(&self) -> String {
        self.buffer.borrow().content.to_string()
    }
}

impl EditTransaction for MemoryTransaction {
    fn document(&self) -> &dyn TextDocument {
        self
    }

    fn replace(&mut self, span: Range<usize>, text: &str) {
        self.buffer.borrow_mut().replace(span, text);
    }
}

/// In-memory host workspace: a URI-to-buffer map plus recorded message
/// surfaces.
#[derive(Default)]
pub struct MemoryHost {
    documents: HashMap<String, Rc<RefCell<Buffer>>>,
    root_path: Option<String>,
    home_dir: Option<String>,
    deferred_opens: HashMap<String, u32>,
    open_attempts: HashMap<String, u32>,
    warnings: Vec<String>,
    errors: Vec<String>,
    palette_responses: Vec<Option<usize>>,
    palette_prompts: Vec<Vec<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document that `open_file` can resolve.
    pub fn insert_document(&mut self, uri: &str, text: &str, eol: LineEnding) {
        self.documents.insert(
            uri.to_string(),
            Rc::new(RefCell::new(Buffer {
                content: Rope::from_str(text),
                eol,
            })),
        );
    }

    /// Make the next `attempts` calls to `open_file` for `uri` return
    /// nothing, the way a host behaves while a just-created file is still
    /// unresolvable.
    pub fn defer_open(&mut self, uri: &str, attempts: u32) {
        self.deferred_opens.insert(uri.to_string(), attempts);
    }

    pub fn set_root_path(&mut self, path: &str) {
        self.root_path = Some(path.to_string());
    }

    pub fn set_home_dir(&mut self, path: &str) {
        self.home_dir = Some(path.to_string());
    }

    /// Queue the response for the next choice-palette prompt. An unqueued
    /// prompt resolves as dismissed.
    pub fn push_palette_response(&mut self, response: Option<usize>) {
        self.palette_responses.push(response);
    }

    pub fn document_text(&self, uri: &str) -> Option<String> {
        self.documents
            .get(uri)
            .map(|buffer| buffer.borrow().content.to_string())
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn open_attempts(&self, uri: &str) -> u32 {
        self.open_attempts.get(uri).copied().unwrap_or(0)
    }

    pub fn palette_prompts(&self) -> &[Vec<String>] {
        &self.palette_prompts
    }
}

impl HostWorkspace for MemoryHost {
    type Editor = MemoryEditor;

    fn open_file(&mut self, uri: &str) -> Option<MemoryEditor> {
        *self.open_attempts.entry(uri.to_string()).or_insert(0) += 1;

        if let Some(remaining) = self.deferred_opens.get_mut(uri) {
            if *remaining > 0 {
                *remaining -= 1;
                return None;
            }
        }

        let buffer = self.documents.get(uri)?;
        Some(MemoryEditor {
            uri: uri.to_string(),
            buffer: Rc::clone(buffer),
        })
    }

    fn show_warning_message(&mut self, message: &str) {
        log::warn!("{}", message);
        self.warnings.push(message.to_string());
    }

    fn show_error_message(&mut self, message: &str) {
        log::error!("{}", message);
        self.errors.push(message.to_string());
    }

    fn show_choice_palette(
        &mut self,
        choices: &[String],
        _options: &PaletteOptions,
    ) -> Option<usize> {
        self.palette_prompts.push(choices.to_vec());
        if self.palette_responses.is_empty() {
            return None;
        }
        self.palette_responses.remove(0)
    }

    fn root_path(&self) -> Option<String> {
        self.root_path.clone()
    }

    fn home_dir(&self) -> Option<String> {
        self.home_dir.clone()
    }
}
