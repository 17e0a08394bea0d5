use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::atomic;
use crate::error::{Error, Result};
use crate::locks::LockRegistry;
use crate::logger::{Logger, Options};
use crate::names;

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// A file-backed JSON document store.
///
/// Records live at `<root>/<collection>/<resource>.json`. Writes and deletes
/// within one collection are serialized through a per-collection lock; reads
/// take no lock and rely on writes being atomic replaces.
///
/// # Example
///
/// ```rust
/// use jsondb_driver::{Driver, Options};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Driver::new(dir.path(), Options::default()).unwrap();
///
/// db.write("users", "alice", &json!({"name": "Alice", "age": "30"})).unwrap();
/// let alice: serde_json::Value = db.read("users", "alice").unwrap();
/// assert_eq!(alice["name"], "Alice");
///
/// db.delete("users", "alice").unwrap();
/// assert!(db.read::<serde_json::Value>("users", "alice").unwrap_err().is_not_found());
/// ```
pub struct Driver {
    root: PathBuf,
    locks: LockRegistry,
    logger: Option<Arc<dyn Logger>>,
}

impl Driver {
    /// Opens the store rooted at `dir`, creating the directory and any missing
    /// parents if needed.
    pub fn new(dir: impl AsRef<Path>, options: Options) -> Result<Driver> {
        let dir = dir.as_ref();
        let logger = options.logger;

        match fs::metadata(dir) {
            Ok(attr) if attr.is_dir() => {
                if let Some(logger) = &logger {
                    logger.debug(format_args!(
                        "Using '{}' (database already exists)",
                        dir.display()
                    ));
                }
            }
            Ok(_) => {
                return Err(Error::Io {
                    path: dir.to_path_buf(),
                    source: std::io::Error::other("Root path must be a directory."),
                });
            }
            Err(_) => {
                if let Some(logger) = &logger {
                    logger.debug(format_args!(
                        "Creating the database at '{}'...",
                        dir.display()
                    ));
                }
                create_dir_all(dir)?;
            }
        }

        let root = dir.canonicalize().map_err(Error::io(dir))?;

        Ok(Driver {
            root,
            locks: LockRegistry::new(),
            logger,
        })
    }

    /// The normalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The sink supplied at construction, if any.
    pub fn logger(&self) -> Option<&dyn Logger> {
        self.logger.as_deref()
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// Creates or replaces `resource` in `collection`.
    ///
    /// The collection directory is created on first use. The value is stored
    /// as indented JSON followed by a newline. A value that fails to encode
    /// leaves the store untouched.
    ///
    /// JSON has no representation for NaN or infinity: non-finite floats are
    /// stored as `null` and will not decode back into a float.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<()> {
        names::validate("collection", collection)?;
        names::validate("resource", resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let mut contents = serde_json::to_vec_pretty(value).map_err(Error::Encode)?;
        contents.push(b'\n');

        let dir = self.collection_path(collection);
        create_dir_all(&dir)?;

        let file_path = names::resource_file(&dir, resource);
        log::debug!("Writing {}...", file_path.display());
        atomic::replace(&file_path, &contents)
    }

    /// Reads `resource` from `collection` and decodes it as `T`.
    ///
    /// `resource` may be given with or without the `.json` suffix.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> Result<T> {
        names::validate("collection", collection)?;
        names::validate("resource", resource)?;

        let dir = self.collection_path(collection);
        let file_path = names::resolve(&dir, resource).ok_or_else(|| Error::NotFound {
            path: dir.join(resource),
        })?;

        log::debug!("Reading {}...", file_path.display());
        let contents = fs::read_to_string(&file_path).map_err(Error::io(&file_path))?;
        decode(&file_path, &contents)
    }

    /// Returns the raw text of every resource in `collection`, in directory
    /// enumeration order.
    ///
    /// Any entry that cannot be read fails the whole call.
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>> {
        Ok(self
            .read_entries(collection)?
            .into_iter()
            .map(|(_, contents)| contents)
            .collect())
    }

    /// Like [`Driver::read_all`], decoding every record as `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        self.read_entries(collection)?
            .iter()
            .map(|(path, contents)| decode(path, contents))
            .collect()
    }

    fn read_entries(&self, collection: &str) -> Result<Vec<(PathBuf, String)>> {
        names::validate("collection", collection)?;

        let dir = self.collection_path(collection);
        if !dir.is_dir() {
            return Err(Error::NotFound { path: dir });
        }

        log::debug!("Reading all of {}...", dir.display());
        let mut entries = Vec::new();
        for entry in walkdir::WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|error| Error::Io {
                path: error
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.clone()),
                source: error.into(),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !names::is_resource_file(path) {
                continue;
            }

            let contents = fs::read_to_string(path).map_err(Error::io(path))?;
            entries.push((path.to_path_buf(), contents));
        }

        Ok(entries)
    }

    /// Removes `resource` from `collection`, or the whole collection when
    /// `resource` is empty.
    ///
    /// A missing target is reported as [`Error::NotFound`].
    pub fn delete(&self, collection: &str, resource: &str) -> Result<()> {
        names::validate("collection", collection)?;
        if !resource.is_empty() {
            names::validate("resource", resource)?;
        }

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = self.collection_path(collection);
        if resource.is_empty() {
            if !dir.is_dir() {
                return Err(Error::NotFound { path: dir });
            }
            log::debug!("Deleting collection {}...", dir.display());
            return fs::remove_dir_all(&dir).map_err(Error::io(&dir));
        }

        let file_path = names::resolve(&dir, resource).ok_or_else(|| Error::NotFound {
            path: dir.join(resource),
        })?;

        log::debug!("Deleting {}...", file_path.display());
        fs::remove_file(&file_path).map_err(Error::io(&file_path))
    }
}

fn decode<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T> {
    serde_json::from_str(contents).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn create_dir_all(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(Error::io(dir))
}
