//! Helper utilities for editor extensions speaking the Language Server
//! Protocol: offset-range/LSP-range conversion, `TextEdit` and
//! `WorkspaceEdit` application, and small host-facing plumbing helpers. The
//! host editor is abstracted behind the traits in [`host`].

pub mod commands;
pub mod conversions;
pub mod edits;
pub mod host;
pub mod memory;
pub mod path;
pub mod settings;

pub use commands::{show_choice_palette, wrap_command};
pub use conversions::{lsp_range_to_offset_range, offset_range_to_lsp_range};
pub use edits::{apply_edits, apply_workspace_edit};
pub use host::{
    open_file_with_retry, CommandScope, EditTransaction, HostWorkspace, LineEnding, PaletteOptions,
    TextDocument, TextEditor,
};
pub use memory::{MemoryEditor, MemoryHost};
pub use path::{clean_path, percent_decode};
pub use settings::{DisplaySettings, EditSettings, Settings};
