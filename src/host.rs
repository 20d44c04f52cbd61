use std::ops::Range;

use miette::Result;

/// End-of-line delimiter reported by a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    /// Detect the delimiter from a source text. Any CRLF wins, otherwise LF.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Length of the delimiter in characters.
    pub fn char_len(self) -> usize {
        self.as_str().len()
    }
}

/// Read access to a host document.
///
/// Implementations return a fresh snapshot on every call; the host may mutate
/// the document between calls, so nothing here is cached.
pub trait TextDocument {
    fn uri(&self) -> &str;
    fn eol(&self) -> LineEnding;
    /// Full text of the document at the time of the call.
    fn text(&self) -> String;
}

/// A single host edit transaction.
///
/// Replacements take effect immediately, so [`EditTransaction::document`]
/// reflects the replacements made earlier in the same transaction.
pub trait EditTransaction {
    fn document(&self) -> &dyn TextDocument;
    /// Replace the character span with `text`.
    fn replace(&mut self, span: Range<usize>, text: &str);
}

/// An open editor handed out by the host.
pub trait TextEditor {
    fn document(&self) -> &dyn TextDocument;
    /// Run `build` inside one edit transaction on this editor. The host
    /// applies everything `build` queued as a unit.
    fn edit(&mut self, build: &mut dyn FnMut(&mut dyn EditTransaction)) -> Result<()>;
}

/// Options for the host choice palette.
#[derive(Debug, Clone, Default)]
pub struct PaletteOptions {
    pub placeholder: Option<String>,
}

/// The capability surface a host workspace provides to the helpers in this
/// crate. Passed explicitly to every function that needs it so tests can
/// substitute an in-memory implementation.
pub trait HostWorkspace {
    type Editor: TextEditor;

    /// Open (or focus) the document at `uri`. Some hosts return nothing on
    /// the first attempt for a just-created file; see
    /// [`open_file_with_retry`].
    fn open_file(&mut self, uri: &str) -> Option<Self::Editor>;

    fn show_warning_message(&mut self, message: &str);

    fn show_error_message(&mut self, message: &str);

    /// Present `choices` and resolve to the picked index, or `None` when the
    /// palette was dismissed.
    fn show_choice_palette(&mut self, choices: &[String], options: &PaletteOptions)
        -> Option<usize>;

    fn root_path(&self) -> Option<String>;

    fn home_dir(&self) -> Option<String>;
}

/// The context a host hands to a command callback: the whole workspace, or
/// the editor the command was invoked from.
pub enum CommandScope<E> {
    Workspace,
    Editor(E),
}

impl<E> CommandScope<E> {
    pub fn is_workspace(&self) -> bool {
        matches!(self, Self::Workspace)
    }
}

/// Open a document, retrying once when the host returns nothing on the first
/// attempt.
///
/// Works around hosts that cannot resolve a file that was created moments
/// ago until the second call. Exactly one retry, no backoff.
pub fn open_file_with_retry<H: HostWorkspace>(host: &mut H, uri: &str) -> Option<H::Editor> {
    if let Some(editor) = host.open_file(uri) {
        return Some(editor);
    }

    log::warn!("First open attempt returned no editor, retrying once: {}", uri);
    host.open_file(uri)
}
