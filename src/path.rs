use crate::{host::HostWorkspace, settings::DisplaySettings};

/// Rewrite a `file://` URI into a short display form.
///
/// A matched workspace-root prefix becomes `.`; with no workspace root, the
/// configured volume-root prefix collapses to a bare `file://`; a matched
/// home-directory prefix becomes `~`. Any remaining scheme prefix is stripped
/// at the end. That strip has to run last, or the rewrites above would never
/// see the `file://` form they match on.
pub fn clean_path<H: HostWorkspace>(host: &H, settings: &DisplaySettings, path: &str) -> String {
    let mut path = percent_decode(path);

    if let Some(root) = host.root_path() {
        if let Some(rest) = path.strip_prefix(&format!("file://{}", root)) {
            path = format!(".{}", rest);
        }
    } else if let Some(rest) = path.strip_prefix(&format!("file://{}", settings.volume_prefix)) {
        path = format!("file://{}", rest);
    }

    if settings.collapse_home {
        if let Some(home) = host.home_dir() {
            if let Some(rest) = path.strip_prefix(&format!("file://{}", home)) {
                path = format!("~{}", rest);
            }
        }
    }

    match path.strip_prefix("file://") {
        Some(rest) => rest.to_string(),
        None => path,
    }
}

/// Minimal `%XX` decoding for display paths. Invalid escapes pass through
/// verbatim.
pub fn percent_decode(input: &str) -> String {
    fn hex_val(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).to_string()
}
