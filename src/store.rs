//! On-disk project collection: one encrypted `<name>.dia` file per project.

use crate::codec;
use crate::crypto::DiaCipher;
use crate::errors::DiaError;
use crate::fsutil::{remove_if_exists, with_retry, write_atomic};
use crate::project::{Project, now_timestamp, validate_name};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const EXTENSION: &str = "dia";

const AUDIT: &str = "diadrop::audit";

/// Store tuning.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Extra attempts for transient I/O failures.
    pub io_retries: u32,
    /// Pause before the first retry; doubled on each further attempt.
    pub retry_backoff_ms: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { io_retries: 2, retry_backoff_ms: 25 }
    }
}

/// Loads and saves projects in a directory.
///
/// Writes to one project file are serialized through a per-name lock, so a timer-driven
/// autosave and a user-triggered save never interleave. Different projects do not contend.
pub struct ProjectStore {
    dir: PathBuf,
    options: StoreOptions,
    cipher: DiaCipher,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore").field("dir", &self.dir).field("options", &self.options).finish()
    }
}

impl ProjectStore {
    /// Open (creating if needed) the project directory.
    pub fn open(dir: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, DiaError> {
        Self::with_cipher(dir, options, DiaCipher::new())
    }

    pub fn with_cipher(
        dir: impl Into<PathBuf>,
        options: StoreOptions,
        cipher: DiaCipher,
    ) -> Result<Self, DiaError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("project store opened at {}", dir.display());
        Ok(Self { dir, options, cipher, locks: Mutex::new(HashMap::new()) })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn cipher(&self) -> &DiaCipher {
        &self.cipher
    }

    /// File path for a project name. Names that are not a single plain file name are rejected.
    pub fn project_path(&self, name: &str) -> Result<PathBuf, DiaError> {
        let valid = !name.trim().is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !valid {
            return Err(DiaError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.project_path(name).is_ok_and(|p| p.is_file())
    }

    fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        self.locks.lock().entry(name.to_string()).or_default().clone()
    }

    /// Forget the lock of a name whose file is gone, unless another caller holds it.
    fn release_lock(&self, name: &str, lock: &Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        // One reference in the map, one held by the caller.
        if Arc::strong_count(lock) == 2 {
            locks.remove(name);
        }
    }

    fn retry<T>(&self, op: impl FnMut() -> io::Result<T>) -> io::Result<T> {
        with_retry(self.options.io_retries, Duration::from_millis(self.options.retry_backoff_ms), op)
    }

    /// Every readable project in the directory, most recently modified first.
    ///
    /// Files that cannot be decrypted or parsed are logged and left out.
    pub fn list_projects(&self) -> Result<Vec<Project>, DiaError> {
        let entries = fs::read_dir(&self.dir)?.map(|entry| entry.map(|e| e.path()));
        Ok(self.collect_projects(entries))
    }

    fn collect_projects(&self, entries: impl Iterator<Item = io::Result<PathBuf>>) -> Vec<Project> {
        let mut projects = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("skipping unreadable entry in {}: {e}", self.dir.display());
                    continue;
                }
            };
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match self.read_project(&path) {
                Ok(p) => projects.push(p),
                Err(e) if e.is_unreadable() => {
                    log::warn!("skipping unreadable project file {}: {e}", path.display());
                }
                Err(e) => log::error!("could not read {}: {e}", path.display()),
            }
        }
        projects.sort_by(|a, b| b.modified.cmp(&a.modified));
        projects
    }

    /// Load one project by name.
    pub fn load(&self, name: &str) -> Result<Project, DiaError> {
        let path = self.project_path(name)?;
        self.read_project(&path).map_err(|e| not_found_as(e, name))
    }

    /// Decrypted `.dia` text of a stored project.
    pub fn read_text(&self, name: &str) -> Result<String, DiaError> {
        let path = self.project_path(name)?;
        self.read_plaintext(&path).map_err(|e| not_found_as(e, name))
    }

    fn read_plaintext(&self, path: &Path) -> Result<String, DiaError> {
        let blob = self.retry(|| fs::read(path))?;
        Ok(self.cipher.decrypt(&blob)?)
    }

    fn read_project(&self, path: &Path) -> Result<Project, DiaError> {
        codec::deserialize(&self.read_plaintext(path)?)
    }

    /// Stamp `modified`, then encrypt and write the project to `<dir>/<name>.dia`,
    /// replacing any previous file of that name.
    ///
    /// On failure the project's `modified` stamp is left as it was.
    pub fn save(&self, project: &mut Project) -> Result<PathBuf, DiaError> {
        let path = self.project_path(&project.name)?;
        let lock = self.lock_for(&project.name);
        let _guard = lock.lock();
        self.write_stamped(project, &path)?;
        log::info!(target: AUDIT, "saved project {:?}", project.name);
        Ok(path)
    }

    fn write_stamped(&self, project: &mut Project, path: &Path) -> Result<(), DiaError> {
        let previous = std::mem::replace(&mut project.modified, now_timestamp());
        let result = self.write_project(project, path);
        if result.is_err() {
            project.modified = previous;
        }
        result
    }

    fn write_project(&self, project: &Project, path: &Path) -> Result<(), DiaError> {
        let blob = self.cipher.encrypt(&codec::serialize(project))?;
        self.retry(|| write_atomic(path, &blob))?;
        Ok(())
    }

    /// Rename a project: the file under the new name is written first, then the file under
    /// the old name is removed.
    ///
    /// If writing the new file fails the project is unchanged. If only the removal of the
    /// old file fails, the project already carries the new name and the error is returned.
    pub fn rename(&self, project: &mut Project, new_name: &str) -> Result<(), DiaError> {
        let new_name = validate_name(new_name)?;
        let new_path = self.project_path(&new_name)?;
        let old_name = project.name.clone();
        if new_name == old_name {
            self.save(project)?;
            return Ok(());
        }
        let old_path = self.project_path(&old_name)?;

        let old_lock = self.lock_for(&old_name);
        let new_lock = self.lock_for(&new_name);
        let (first, second) =
            if old_name < new_name { (&old_lock, &new_lock) } else { (&new_lock, &old_lock) };
        let _g1 = first.lock();
        let _g2 = second.lock();

        let mut renamed = project.clone();
        renamed.name = new_name;
        self.write_stamped(&mut renamed, &new_path)?;
        *project = renamed;
        self.retry(|| remove_if_exists(&old_path))?;
        log::info!(target: AUDIT, "renamed project {old_name:?} to {:?}", project.name);
        self.release_lock(&old_name, &old_lock);
        Ok(())
    }

    /// Remove the project's file. A missing file is not an error; returns whether a file
    /// was actually removed.
    pub fn delete(&self, project: &Project) -> Result<bool, DiaError> {
        self.delete_by_name(&project.name)
    }

    pub fn delete_by_name(&self, name: &str) -> Result<bool, DiaError> {
        let path = self.project_path(name)?;
        let lock = self.lock_for(name);
        let _guard = lock.lock();
        let removed = self.retry(|| remove_if_exists(&path))?;
        if removed {
            log::info!(target: AUDIT, "deleted project {name:?}");
        } else {
            log::debug!("delete: no file for {name:?}");
        }
        self.release_lock(name, &lock);
        Ok(removed)
    }

    /// Bring an encrypted `.dia` file from anywhere into the store under its own name.
    pub fn import_file(&self, source: &Path) -> Result<Project, DiaError> {
        let mut project = self.read_project(source)?;
        self.save(&mut project)?;
        log::info!(target: AUDIT, "imported {:?} from {}", project.name, source.display());
        Ok(project)
    }

    /// Write an encrypted copy of the project to an arbitrary path.
    pub fn export_file(&self, project: &Project, dest: &Path) -> Result<(), DiaError> {
        self.write_project(project, dest)?;
        log::info!(target: AUDIT, "exported {:?} to {}", project.name, dest.display());
        Ok(())
    }
}

fn not_found_as(e: DiaError, name: &str) -> DiaError {
    match e {
        DiaError::Io(err) if err.kind() == io::ErrorKind::NotFound => {
            DiaError::NoSuchProject(name.to_string())
        }
        other => other,
    }
}
