use diadrop::codec;
use diadrop::errors::DiaError;
use diadrop::project::{ChartType, DataPoint, Project};
use diadrop::store::{ProjectStore, StoreOptions};
use diadrop::DiaCipher;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn open(dir: &std::path::Path) -> ProjectStore {
    ProjectStore::open(dir, StoreOptions::default()).unwrap()
}

fn sales() -> Project {
    let mut p = Project::new("Sales").unwrap();
    p.push_point(DataPoint::new("Jan", 100.0, "#0066FF"));
    p.push_point(DataPoint::new("Feb", 150.5, "#00B4D8"));
    p.set_chart_type(ChartType::Bar);
    p.set_title("Sales");
    p
}

#[test]
fn save_then_load_restores_project() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = sales();
    p.custom_colors.insert("background".into(), "#2B2B2B".into());
    let path = store.save(&mut p).unwrap();
    assert_eq!(path, dir.path().join("Sales.dia"));
    assert_eq!(store.load("Sales").unwrap(), p);
}

#[test]
fn file_on_disk_is_not_plaintext() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = sales();
    let path = store.save(&mut p).unwrap();
    let bytes = fs::read(path).unwrap();
    assert!(diadrop::crypto::is_dia_blob(&bytes));
    let as_text = String::from_utf8_lossy(&bytes);
    assert!(!as_text.contains("__Data__"));
    assert!(!as_text.contains("Jan"));
    assert_eq!(store.read_text("Sales").unwrap(), codec::serialize(&p));
}

#[test]
fn listing_skips_garbage_and_foreign_files() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = sales();
    store.save(&mut p).unwrap();
    // Random bytes with the right extension.
    fs::write(dir.path().join("garbage.dia"), b"\x00\x01 definitely not a blob").unwrap();
    // Encrypted with someone else's key.
    let foreign = DiaCipher::from_key([9u8; 32]).encrypt(&codec::serialize(&p)).unwrap();
    fs::write(dir.path().join("foreign.dia"), foreign).unwrap();
    // Decrypts fine but does not parse.
    let bad_text = store.cipher().encrypt("[__Data__]\n[Jan | abc | #FF0000]").unwrap();
    fs::write(dir.path().join("broken.dia"), bad_text).unwrap();
    // Other extensions are ignored outright.
    fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
    fs::create_dir(dir.path().join("folder.dia")).unwrap();

    let projects = store.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0], p);
}

#[test]
fn listing_is_newest_first() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    for name in ["first", "second", "third"] {
        let mut p = Project::new(name).unwrap();
        store.save(&mut p).unwrap();
        std::thread::sleep(Duration::from_millis(5));
    }
    // Touch the oldest again so it moves to the front.
    let mut first = store.load("first").unwrap();
    store.save(&mut first).unwrap();

    let names: Vec<_> = store.list_projects().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["first", "third", "second"]);
}

#[test]
fn empty_directory_lists_nothing() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("nested").join("projects"));
    assert!(store.list_projects().unwrap().is_empty());
}

#[test]
fn rename_moves_the_file() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = Project::new("A").unwrap();
    p.add_point("x", 1.0);
    store.save(&mut p).unwrap();

    store.rename(&mut p, "B").unwrap();
    assert_eq!(p.name, "B");
    assert!(!dir.path().join("A.dia").exists());
    assert!(dir.path().join("B.dia").exists());
    let loaded = store.load("B").unwrap();
    assert_eq!(loaded.name, "B");
    assert_eq!(loaded.series, p.series);
    assert_eq!(store.list_projects().unwrap().len(), 1);
}

#[test]
fn rename_trims_and_validates_new_name() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = Project::new("A").unwrap();
    store.save(&mut p).unwrap();

    assert!(matches!(store.rename(&mut p, "   "), Err(DiaError::InvalidName(_))));
    assert!(matches!(store.rename(&mut p, "../escape"), Err(DiaError::InvalidName(_))));
    assert_eq!(p.name, "A");
    assert!(store.exists("A"));

    store.rename(&mut p, "  Padded  ").unwrap();
    assert_eq!(p.name, "Padded");
    assert!(store.exists("Padded"));
    assert!(!store.exists("A"));
}

#[test]
fn rename_to_same_name_just_saves() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = Project::new("Same").unwrap();
    store.save(&mut p).unwrap();
    store.rename(&mut p, "Same").unwrap();
    assert!(store.exists("Same"));
}

#[test]
fn rename_of_never_saved_project_still_writes_new_file() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = Project::new("draft").unwrap();
    store.rename(&mut p, "final").unwrap();
    assert!(store.exists("final"));
    assert!(!store.exists("draft"));
}

#[test]
fn delete_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut p = sales();
    store.save(&mut p).unwrap();
    assert!(store.delete(&p).unwrap());
    assert!(!store.exists("Sales"));
    assert!(!store.delete(&p).unwrap());
    assert!(matches!(store.load("Sales"), Err(DiaError::NoSuchProject(_))));
}

#[test]
fn same_name_overwrites_previous_file() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let mut a = Project::new("dup").unwrap();
    a.add_point("from-a", 1.0);
    let mut b = Project::new("dup").unwrap();
    b.add_point("from-b", 2.0);
    store.save(&mut a).unwrap();
    store.save(&mut b).unwrap();
    let projects = store.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].series[0].label, "from-b");
}

#[test]
fn load_reports_decrypt_and_parse_failures() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    fs::write(dir.path().join("junk.dia"), b"junk").unwrap();
    assert!(matches!(store.load("junk"), Err(DiaError::Decrypt(_))));

    let blob = store.cipher().encrypt("[__Data__]\n[a | NaNx | #000000]").unwrap();
    fs::write(dir.path().join("bad.dia"), blob).unwrap();
    let err = store.load("bad").unwrap_err();
    assert!(err.is_unreadable());
    assert!(matches!(err, DiaError::Parse { line: 2, .. }));
}

#[test]
fn export_then_import_into_another_store() {
    let src_dir = tempdir().unwrap();
    let dst_dir = tempdir().unwrap();
    let src = open(src_dir.path());
    let dst = open(dst_dir.path());
    let mut p = sales();
    src.save(&mut p).unwrap();

    let exported = src_dir.path().join("share.dia.bak");
    src.export_file(&p, &exported).unwrap();
    let imported = dst.import_file(&exported).unwrap();
    assert_eq!(imported.name, "Sales");
    assert_eq!(imported.series, p.series);
    assert!(dst.exists("Sales"));
}

#[test]
fn import_rejects_unreadable_file() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let src = dir.path().join("elsewhere.bin");
    fs::write(&src, b"plain text is not a project").unwrap();
    assert!(matches!(store.import_file(&src), Err(DiaError::Decrypt(_))));
    assert!(store.list_projects().unwrap().is_empty());
}
