use miette::Result;
use serde_json::Value;

use crate::host::{CommandScope, HostWorkspace, PaletteOptions};

/// Wrap a fallible command callback so any error it raises is caught and
/// surfaced as a host error message instead of propagating into the host
/// process.
///
/// Hosts invoke commands with either the workspace or an editor as the
/// receiver, plus a free-form argument list; [`CommandScope`] carries that
/// distinction explicitly.
pub fn wrap_command<H, F>(mut command: F) -> impl FnMut(&mut H, CommandScope<H::Editor>, &[Value])
where
    H: HostWorkspace,
    F: FnMut(&mut H, CommandScope<H::Editor>, &[Value]) -> Result<()>,
{
    move |host, scope, arguments| {
        if let Err(err) = command(host, scope, arguments) {
            host.show_error_message(&err.to_string());
        }
    }
}

/// Present `choices` through the host palette, rendering each item with
/// `render`. Resolves to the chosen item, or `None` when the palette was
/// dismissed.
pub fn show_choice_palette<'a, H, T, F>(
    host: &mut H,
    choices: &'a [T],
    render: F,
    options: &PaletteOptions,
) -> Option<&'a T>
where
    H: HostWorkspace,
    F: Fn(&T) -> String,
{
    let rendered = choices.iter().map(render).collect::<Vec<_>>();
    let index = host.show_choice_palette(&rendered, options)?;
    choices.get(index)
}
