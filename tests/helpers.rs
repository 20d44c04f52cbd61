use common::{host_with_document, init_logging};
use editor_lsp_utils::{
    apply_edits, clean_path, percent_decode, show_choice_palette, wrap_command, CommandScope,
    DisplaySettings, HostWorkspace, LineEnding, MemoryEditor, MemoryHost, PaletteOptions, Settings,
};
use lsp_types::{Position, TextEdit};
use miette::miette;
use serde_json::Value;


#[test]
fn test_clean_path_strips_workspace_root() {
    init_logging();
    let mut host = MemoryHost::new();
    host.set_root_path("/Users/x/proj");

    let cleaned = clean_path(
        &host,
        &DisplaySettings::default(),
        "file:///Users/x/proj/foo.ts",
    );
    assert_eq!(cleaned, "./foo.ts");
}

#[test]
fn test_clean_path_collapses_home_without_root() {
    init_logging();
    let mut host = MemoryHost::new();
    host.set_home_dir("/Users/x");

    let cleaned = clean_path(&host, &DisplaySettings::default(), "file:///Users/x/bar.ts");
    assert_eq!(cleaned, "~/bar.ts");
}

#[test]
fn test_clean_path_collapses_volume_prefix() {
    init_logging();
    let host = MemoryHost::new();

    let cleaned = clean_path(
        &host,
        &DisplaySettings::default(),
        "file:///Volumes/Macintosh HD/tmp/a.ts",
    );
    assert_eq!(cleaned, "/tmp/a.ts");

    // With a home directory set, the collapsed path falls under it.
    let mut host = MemoryHost::new();
    host.set_home_dir("/Users/x");
    let cleaned = clean_path(
        &host,
        &DisplaySettings::default(),
        "file:///Volumes/Macintosh HD/Users/x/baz.ts",
    );
    assert_eq!(cleaned, "~/baz.ts");
}

#[test]
fn test_clean_path_decodes_percent_escapes() {
    init_logging();
    let mut host = MemoryHost::new();
    host.set_root_path("/Users/x/proj");

    let cleaned = clean_path(
        &host,
        &DisplaySettings::default(),
        "file:///Users/x/proj/my%20file.ts",
    );
    assert_eq!(cleaned, "./my file.ts");
}

#[test]
fn test_clean_path_passes_plain_paths_through() {
    init_logging();
    let host = MemoryHost::new();

    let cleaned = clean_path(&host, &DisplaySettings::default(), "src/main.rs");
    assert_eq!(cleaned, "src/main.rs");
}

#[test]
fn test_clean_path_home_collapse_can_be_disabled() {
    init_logging();
    let mut host = MemoryHost::new();
    host.set_home_dir("/Users/x");

    let settings = DisplaySettings {
        collapse_home: false,
        ..Default::default()
    };
    let cleaned = clean_path(&host, &settings, "file:///Users/x/bar.ts");
    assert_eq!(cleaned, "/Users/x/bar.ts");
}

#[test]
fn test_percent_decode() {
    assert_eq!(percent_decode("%41"), "A");
    assert_eq!(percent_decode("caf%c3%a9"), "café");
    assert_eq!(percent_decode("a%zzb"), "a%zzb");
    assert_eq!(percent_decode("trailing%4"), "trailing%4");
}

#[test]
fn test_choice_palette_resolves_to_the_picked_item() {
    init_logging();
    let mut host = MemoryHost::new();
    host.push_palette_response(Some(2));

    let choices = vec![1, 2, 3];
    let options = PaletteOptions {
        placeholder: Some("Pick a number".to_string()),
    };
    let picked = show_choice_palette(&mut host, &choices, |n| format!("number {}", n), &options);

    assert_eq!(picked, Some(&3));
    assert_eq!(
        host.palette_prompts(),
        &[vec![
            "number 1".to_string(),
            "number 2".to_string(),
            "number 3".to_string(),
        ]]
    );
}

#[test]
fn test_choice_palette_dismissal_yields_none() {
    init_logging();
    let mut host = MemoryHost::new();
    host.push_palette_response(None);

    let choices = vec!["a", "b"];
    let picked = show_choice_palette(
        &mut host,
        &choices,
        |s| s.to_string(),
        &PaletteOptions::default(),
    );
    assert_eq!(picked, None);

    // An index the host should never produce resolves to nothing as well.
    host.push_palette_response(Some(9));
    let picked = show_choice_palette(
        &mut host,
        &choices,
        |s| s.to_string(),
        &PaletteOptions::default(),
    );
    assert_eq!(picked, None);
}

#[test]
fn test_wrap_command_surfaces_errors() {
    init_logging();
    let mut host = MemoryHost::new();

    let mut wrapped = wrap_command(
        |_host: &mut MemoryHost, _scope: CommandScope<MemoryEditor>, _args: &[Value]| {
            Err(miette!("command exploded"))
        },
    );
    wrapped(&mut host, CommandScope::Workspace, &[]);

    assert_eq!(host.errors().len(), 1);
    assert!(host.errors()[0].contains("command exploded"));
}

#[test]
fn test_wrap_command_passes_successful_results_through() {
    init_logging();
    let mut host = MemoryHost::new();

    let mut wrapped = wrap_command(
        |_host: &mut MemoryHost, scope: CommandScope<MemoryEditor>, args: &[Value]| {
            assert!(scope.is_workspace());
            assert_eq!(args.len(), 1);
            Ok(())
        },
    );
    wrapped(&mut host, CommandScope::Workspace, &[Value::from("arg")]);

    assert!(host.errors().is_empty());
}

#[test]
fn test_wrap_command_with_editor_scope() {
    let uri = "file:///notes/a.md";
    let mut host = host_with_document(uri, "aaa", LineEnding::Lf);
    let editor = host.open_file(uri).unwrap();

    let mut wrapped = wrap_command(
        |_host: &mut MemoryHost, scope: CommandScope<MemoryEditor>, _args: &[Value]| {
            let CommandScope::Editor(mut editor) = scope else {
                return Err(miette!("expected an editor scope"));
            };
            let edits = vec![TextEdit {
                range: lsp_types::Range::new(Position::new(0, 0), Position::new(0, 3)),
                new_text: "bbb".to_string(),
            }];
            apply_edits(&mut editor, &edits)
        },
    );
    wrapped(&mut host, CommandScope::Editor(editor), &[]);

    assert!(host.errors().is_empty());
    assert_eq!(host.document_text(uri).unwrap(), "bbb");
}

#[test]
fn test_settings_defaults() {
    let settings = Settings::default();
    assert!(settings.edits.report_unsupported_operations);
    assert!(settings.display.collapse_home);
    assert_eq!(settings.display.volume_prefix, "/Volumes/Macintosh HD");
}

#[test]
fn test_settings_parse_partial_toml() {
    let settings: Settings = toml::from_str(
        "[edits]\n\
         report_unsupported_operations = false\n",
    )
    .unwrap();

    assert!(!settings.edits.report_unsupported_operations);
    assert!(settings.display.collapse_home);
}

#[test]
fn test_settings_fall_back_to_defaults_when_file_is_missing() {
    init_logging();
    let settings = Settings::from_file_or_default("/nonexistent/editor_lsp_utils.toml");
    assert!(settings.edits.report_unsupported_operations);
}
