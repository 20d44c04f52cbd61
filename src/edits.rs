use lsp_types::{
    AnnotatedTextEdit, DocumentChangeOperation, DocumentChanges, OneOf, ResourceOp,
    TextDocumentEdit, TextEdit, WorkspaceEdit,
};
use miette::Result;

use crate::{
    conversions::lsp_range_to_offset_range,
    host::{open_file_with_retry, HostWorkspace, TextEditor},
    settings::EditSettings,
};

/// Apply a batch of LSP text edits to one editor inside a single transaction.
///
/// Edits are replayed in reverse input order. Every replacement already made
/// lies after the edit currently being converted, so an edit's range,
/// expressed against the pre-batch document, still resolves to the right
/// span. Edits must be non-overlapping, per the LSP contract; this is not
/// validated.
pub fn apply_edits(editor: &mut dyn TextEditor, edits: &[TextEdit]) -> Result<()> {
    editor.edit(&mut |transaction| {
        for edit in edits.iter().rev() {
            let span = lsp_range_to_offset_range(transaction.document(), &edit.range);
            transaction.replace(span, &edit.new_text);
        }
    })
}

/// Apply an LSP workspace edit across the host's documents, best effort.
///
/// The newer `documentChanges` form wins over the deprecated `changes`
/// mapping when both are present. Create/rename/delete operations are not
/// applied; by default a warning names each one that was skipped
/// ([`EditSettings::report_unsupported_operations`]).
///
/// A document that cannot be opened is reported as a warning and skipped;
/// edits already applied to other documents are not rolled back.
pub fn apply_workspace_edit<H: HostWorkspace>(
    host: &mut H,
    workspace_edit: &WorkspaceEdit,
    settings: &EditSettings,
) {
    if let Some(document_changes) = &workspace_edit.document_changes {
        match document_changes {
            DocumentChanges::Edits(edits) => {
                for change in edits {
                    apply_document_edit(host, change);
                }
            }
            DocumentChanges::Operations(operations) => {
                for operation in operations {
                    match operation {
                        DocumentChangeOperation::Edit(change) => apply_document_edit(host, change),
                        DocumentChangeOperation::Op(op) => skip_resource_op(host, op, settings),
                    }
                }
            }
        }
    } else if let Some(changes) = &workspace_edit.changes {
        for (uri, edits) in changes {
            if edits.is_empty() {
                continue;
            }
            apply_to_uri(host, uri.as_str(), edits);
        }
    }
}

fn apply_document_edit<H: HostWorkspace>(host: &mut H, change: &TextDocumentEdit) {
    if change.edits.is_empty() {
        return;
    }

    let edits = change
        .edits
        .iter()
        .map(|edit| match edit {
            OneOf::Left(edit) => edit.clone(),
            // Annotations carry presentation metadata only; the edit applies as-is.
            OneOf::Right(AnnotatedTextEdit { text_edit, .. }) => text_edit.clone(),
        })
        .collect::<Vec<_>>();

    apply_to_uri(host, change.text_document.uri.as_str(), &edits);
}

fn apply_to_uri<H: HostWorkspace>(host: &mut H, uri: &str, edits: &[TextEdit]) {
    let Some(mut editor) = open_file_with_retry(host, uri) else {
        host.show_warning_message(&format!("Failed to open {}", uri));
        return;
    };

    if let Err(err) = apply_edits(&mut editor, edits) {
        log::warn!("Failed to apply edits to {}: {}", uri, err);
        host.show_warning_message(&format!("Failed to apply edits to {}", uri));
    }
}

fn skip_resource_op<H: HostWorkspace>(host: &mut H, op: &ResourceOp, settings: &EditSettings) {
    let (kind, uri) = match op {
        ResourceOp::Create(create) => ("create", create.uri.as_str()),
        ResourceOp::Rename(rename) => ("rename", rename.new_uri.as_str()),
        ResourceOp::Delete(delete) => ("delete", delete.uri.as_str()),
    };

    log::warn!("Skipping unsupported {} operation: {}", kind, uri);
    if settings.report_unsupported_operations {
        host.show_warning_message(&format!(
            "Skipped unsupported {} file operation: {}",
            kind, uri
        ));
    }
}
