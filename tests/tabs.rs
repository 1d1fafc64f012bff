//! Tab lifecycle through the message loop: open, drop, save, save as,
//! uniqueness of on-disk paths and titles

mod common;

use std::path::PathBuf;

use common::{app, asks_save_path, notice_level, test_model, titles, write_file};
use opent::commands::{Cmd, NoticeLevel};
use opent::messages::{AppMsg, Msg};
use opent::update::update;

#[test]
fn test_new_file_opens_untitled_tab() {
    let mut model = test_model();
    app(&mut model, AppMsg::NewFile);
    app(&mut model, AppMsg::NewFile);
    assert_eq!(model.tabs.len(), 2);
    assert_eq!(model.tabs.active_index(), Some(1));
    assert_eq!(titles(&model), vec!["unti...", "unti..."]);
    assert_eq!(model.tabs.active_tab().unwrap().tooltip, "");
}

#[test]
fn test_opening_same_path_twice_keeps_one_tab() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "A");
    let b = write_file(dir.path(), "b.txt", "B");

    let mut model = test_model();
    update(&mut model, Msg::open(&a));
    update(&mut model, Msg::open(&b));
    assert_eq!(model.tabs.active_index(), Some(1));

    update(&mut model, Msg::open(&a));
    assert_eq!(model.tabs.len(), 2);
    assert_eq!(model.tabs.active_index(), Some(0));
    assert_eq!(model.ui.status_message, format!("Already open: {}", a.display()));
}

#[test]
fn test_alternate_spelling_of_open_path_is_same_tab() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let a = write_file(dir.path(), "a.txt", "A");
    let dotted = dir.path().join("sub").join("..").join("a.txt");

    let mut model = test_model();
    update(&mut model, Msg::open(&a));
    update(&mut model, Msg::open(&dotted));
    assert_eq!(model.tabs.len(), 1);
}

#[test]
fn test_open_non_text_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_file(dir.path(), "pic.png", [0x89, b'P', b'N', b'G']);

    let mut model = test_model();
    let cmd = update(&mut model, Msg::open(&png));
    assert_eq!(notice_level(&cmd), Some(NoticeLevel::Error));
    assert!(model.tabs.is_empty());
}

#[test]
fn test_open_dialog_result_opens_each_path() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "A");
    let b = write_file(dir.path(), "b.txt", "B");

    let mut model = test_model();
    let cmd = app(&mut model, AppMsg::OpenFileDialog);
    assert_eq!(cmd, Some(Cmd::ShowOpenFileDialog { start_dir: None }));

    app(&mut model, AppMsg::OpenFileDialogResult { paths: vec![a, b] });
    assert_eq!(titles(&model), vec!["a.txt", "b.txt"]);

    let cmd = app(&mut model, AppMsg::OpenFileDialog);
    assert_eq!(
        cmd,
        Some(Cmd::ShowOpenFileDialog {
            start_dir: Some(dir.path().canonicalize().unwrap())
        })
    );
}

#[test]
fn test_cancelled_open_dialog_does_nothing() {
    let mut model = test_model();
    assert!(app(&mut model, AppMsg::OpenFileDialogResult { paths: vec![] }).is_none());
    assert!(model.tabs.is_empty());
}

#[test]
fn test_drop_skips_missing_paths_and_continues_after_failures() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "A");
    let png = write_file(dir.path(), "pic.png", [0u8; 4]);
    let b = write_file(dir.path(), "b.txt", "B");
    let missing = dir.path().join("gone.txt");

    let mut model = test_model();
    let cmd = app(&mut model, AppMsg::FilesDropped(vec![a, missing, png, b]));

    assert_eq!(titles(&model), vec!["a.txt", "b.txt"]);
    assert_eq!(notice_level(&cmd), Some(NoticeLevel::Error));
}

#[test]
fn test_save_untitled_asks_for_path_in_save_dir() {
    let mut model = test_model();
    app(&mut model, AppMsg::NewFile);
    let cmd = app(&mut model, AppMsg::SaveFile);
    assert!(asks_save_path(&cmd));
    if let Some(Cmd::ShowSaveFileDialog {
        suggested_path: Some(path),
    }) = cmd
    {
        assert_eq!(path.file_name().unwrap(), "untitled.txt");
    }
}

#[test]
fn test_save_as_associates_and_registers_path() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("notes.txt");

    let mut model = test_model();
    app(&mut model, AppMsg::NewFile);
    update(&mut model, Msg::insert("hello"));
    app(&mut model, AppMsg::SaveFileAs);
    app(
        &mut model,
        AppMsg::SaveFileAsDialogResult {
            path: Some(target.clone()),
        },
    );

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "hello");
    assert_eq!(titles(&model), vec!["note..."]);
    assert!(model.tabs.is_file_open(&target));
    assert!(model.ui.pending.is_none());

    // Opening the saved path now activates the same tab
    update(&mut model, Msg::open(&target));
    assert_eq!(model.tabs.len(), 1);
}

#[test]
fn test_save_as_onto_path_open_in_other_tab_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "A");

    let mut model = test_model();
    update(&mut model, Msg::open(&a));
    app(&mut model, AppMsg::NewFile);
    update(&mut model, Msg::insert("new"));
    app(&mut model, AppMsg::SaveFileAs);
    let cmd = app(&mut model, AppMsg::SaveFileAsDialogResult { path: Some(a.clone()) });

    assert_eq!(notice_level(&cmd), Some(NoticeLevel::Error));
    assert_eq!(std::fs::read_to_string(&a).unwrap(), "A");
    assert!(model.active_document().unwrap().is_untitled());
    assert!(model.active_document().unwrap().is_modified());
}

#[test]
fn test_cancelled_save_as_changes_nothing() {
    let mut model = test_model();
    app(&mut model, AppMsg::NewFile);
    update(&mut model, Msg::insert("x"));
    app(&mut model, AppMsg::SaveFileAs);
    app(&mut model, AppMsg::SaveFileAsDialogResult { path: None });

    assert!(model.active_document().unwrap().is_untitled());
    assert!(model.active_document().unwrap().is_modified());
    assert_eq!(model.ui.status_message, "Save cancelled");
}

#[test]
fn test_save_associated_file_writes_and_cleans() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "A");

    let mut model = test_model();
    update(&mut model, Msg::open(&a));
    update(&mut model, Msg::insert(">"));
    assert_eq!(titles(&model), vec!["a.txt*"]);

    app(&mut model, AppMsg::SaveFile);
    assert_eq!(std::fs::read_to_string(&a).unwrap(), ">A");
    assert_eq!(titles(&model), vec!["a.txt"]);
}

#[test]
fn test_long_names_truncate_with_marker() {
    let dir = tempfile::tempdir().unwrap();
    let long = write_file(dir.path(), "verylongname.txt", "x");

    let mut model = test_model();
    update(&mut model, Msg::open(&long));
    assert_eq!(titles(&model), vec!["very..."]);
    update(&mut model, Msg::insert("y"));
    assert_eq!(titles(&model), vec!["ver...*"]);
    assert_eq!(
        PathBuf::from(&model.tabs.active_tab().unwrap().tooltip),
        long.canonicalize().unwrap()
    );
}

#[test]
fn test_activate_tab_out_of_range_is_ignored() {
    let mut model = test_model();
    app(&mut model, AppMsg::NewFile);
    assert!(app(&mut model, AppMsg::ActivateTab(5)).is_none());
    assert_eq!(model.tabs.active_index(), Some(0));
}
