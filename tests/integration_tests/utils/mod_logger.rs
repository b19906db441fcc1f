use diadrop::project::Project;
use diadrop::store::{ProjectStore, StoreOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn configure_logging_writes_app_and_audit_in_dir() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("proc_logs");
    diadrop::logger::configure_logging(Some(&base), Some("debug"), Some(3)).unwrap();
    log::info!("hello app");
    log::info!(target: "diadrop::audit", "audit event");
    assert!(base.join("app.log").exists());
    assert!(base.join("audit.log").exists());
}

#[test]
fn configure_logging_twice_is_harmless() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("again");
    fs::create_dir_all(&base).unwrap();
    diadrop::logger::configure_logging(Some(&base), Some("trace"), Some(2)).unwrap();
    diadrop::logger::configure_logging(Some(&base), Some("off"), None).unwrap();
    assert!(base.join("app.log").exists());

    // Store operations keep working whatever logger is installed.
    let store = ProjectStore::open(dir.path().join("projects"), StoreOptions::default()).unwrap();
    let mut p = Project::new("logged").unwrap();
    store.save(&mut p).unwrap();
    assert!(store.delete(&p).unwrap());
}

#[test]
fn unusable_log_dir_is_an_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("not_a_dir");
    fs::write(&file, b"x").unwrap();
    let err = diadrop::logger::configure_logging(Some(&file.join("logs")), None, None).unwrap_err();
    assert!(matches!(err, diadrop::DiaError::Io(_)));
}
