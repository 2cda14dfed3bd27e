use std::{
    fmt::{Debug, Formatter},
    fs,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard},
};

use crate::{
    avl::{AvlTree, BalanceReport},
    codec,
    error::{InputInvalid, NoBackingFile, Result},
    person::{Field, Person},
};

/// The options for configuring a PersonDB instance.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) create_if_missing: bool,
}

impl Options {
    /// Creates a new Options instance with default values.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Decide whether a missing database file is acceptable.
    ///
    /// If it is true, opening a path that does not exist yields an empty database, and the file
    /// is created on the first save. If it is false (the default), opening fails with an IO error.
    #[inline]
    pub fn create_if_missing(&mut self, flag: bool) -> &mut Self {
        self.create_if_missing = flag;
        self
    }

    /// Open a PersonDB instance with the current options.
    #[inline]
    pub fn open(&self, path: impl AsRef<Path>) -> Result<PersonDB> {
        PersonDB::open_with_options(path, self.clone())
    }
}

/// Counters describing how a load went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines that parsed into a record and were handed to the index, duplicates included.
    pub accepted: usize,
    /// Accepted records dropped because their key was already present.
    pub duplicates: usize,
    /// Malformed lines that never reached the index.
    pub skipped: usize,
}

/// The main database struct, all entry points are here.
///
/// The whole index sits behind one lock: mutations exclude every other access for their
/// duration, lookups and traversals share it.
pub struct PersonDB {
    options: Options,
    path: Option<PathBuf>,
    tree: RwLock<AvlTree>,
    load_report: LoadReport,
}

impl PersonDB {
    /// Open a PersonDB instance from the given file path with default options.
    #[inline]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, Options::default())
    }

    /// Open a PersonDB instance from the given file path with the provided options.
    pub fn open_with_options(path: impl AsRef<Path>, options: Options) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::File::open(&path) {
            Ok(file) => Some(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound && options.create_if_missing => None,
            Err(e) => return Err(e.into()),
        };

        let mut db = Self {
            options,
            path: Some(path),
            tree: Default::default(),
            load_report: Default::default(),
        };

        if let Some(file) = file {
            db.load_report = db.load(BufReader::new(file))?;
        } else {
            tracing::info!("{} does not exist, starting empty", db.display_path());
        }

        Ok(db)
    }

    /// Create an empty PersonDB instance that is not bound to any file.
    #[inline]
    pub fn in_memory() -> Self {
        Self {
            options: Options::default(),
            path: None,
            tree: Default::default(),
            load_report: Default::default(),
        }
    }

    /// Options used to configure the PersonDB.
    #[inline]
    pub fn options(&self) -> Options {
        self.options.clone()
    }

    /// The file this database was opened from, and saves to.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// How the initial load from the database file went.
    #[inline]
    pub fn load_report(&self) -> LoadReport {
        self.load_report
    }

    /// Load records line by line from the reader into the database.
    ///
    /// Empty lines are ignored. Malformed lines are skipped with a warning and never abort the
    /// load. A record whose key is already present is dropped, the existing record wins.
    pub fn load(&self, reader: impl BufRead) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut tree = self.tree.write().unwrap();

        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            if line.is_empty() || line == b"\r" {
                continue;
            }

            match codec::decode_bytes(&line) {
                Ok(person) => {
                    report.accepted += 1;
                    if !tree.insert(person) {
                        report.duplicates += 1;
                        tracing::debug!(
                            "line {}: duplicate key, keeping the first record",
                            index + 1
                        );
                    }
                }
                Err(e) => {
                    report.skipped += 1;
                    tracing::warn!(
                        "line {}: skipping record ({}): {}",
                        index + 1,
                        e,
                        String::from_utf8_lossy(&line).trim_end()
                    );
                }
            }
        }

        tracing::info!(
            "loaded {} person records ({} duplicates, {} skipped)",
            report.accepted,
            report.duplicates,
            report.skipped
        );
        Ok(report)
    }

    /// Rewrite the database file with all records in ascending key order.
    ///
    /// Returns the number of records written.
    pub fn save(&self) -> Result<usize> {
        let Some(path) = &self.path else {
            return Err(NoBackingFile.into());
        };
        self.save_to(path)
    }

    /// Write all records to the given path in ascending key order, replacing its content.
    ///
    /// Fails with [`ErrorCode::InputInvalid`](crate::ErrorCode::InputInvalid) before touching the
    /// file if any record holds a field that cannot be written as a single token.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let tree = self.tree.read().unwrap();
        Self::validate_tree(&tree)?;

        // Create all necessary intermediate directories.
        if let Some(parent_dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent_dir)?;
        }

        let count = Self::write_tree(&tree, BufWriter::new(fs::File::create(path)?))?;
        tracing::info!("saved {} person records to {}", count, path.display());
        Ok(count)
    }

    /// Write all records to the writer in the database file format.
    ///
    /// Nothing is written if any record fails validation, see [`PersonDB::save_to`].
    pub fn write_to(&self, writer: impl Write) -> Result<usize> {
        let tree = self.tree.read().unwrap();
        Self::validate_tree(&tree)?;
        Self::write_tree(&tree, writer)
    }

    /// Insert a new record.
    ///
    /// Returns `false` if a record with the same names already exists; that record is kept
    /// unchanged.
    pub fn insert(&self, person: Person) -> Result<bool> {
        Self::validate_person(&person)?;
        Ok(self.tree.write().unwrap().insert(person))
    }

    /// Check if the database contains a record with the given names.
    #[inline]
    pub fn contains(&self, first: &str, last: &str) -> bool {
        self.tree.read().unwrap().contains(first, last)
    }

    /// Get the record with the given names.
    #[inline]
    pub fn get(&self, first: &str, last: &str) -> Option<Person> {
        self.tree.read().unwrap().get(first, last).cloned()
    }

    /// All records with the given last name, in key order.
    #[inline]
    pub fn family(&self, last: &str) -> Vec<Person> {
        let tree = self.tree.read().unwrap();
        tree.family(last).into_iter().cloned().collect()
    }

    /// All records with the given first name, in key order.
    #[inline]
    pub fn with_first_name(&self, first: &str) -> Vec<Person> {
        let tree = self.tree.read().unwrap();
        tree.with_first_name(first).cloned().collect()
    }

    /// The record with the earliest birth date, the first in key order on ties.
    #[inline]
    pub fn oldest(&self) -> Option<Person> {
        self.tree.read().unwrap().oldest().cloned()
    }

    /// All records in ascending key order.
    #[inline]
    pub fn records(&self) -> Vec<Person> {
        self.tree.read().unwrap().iter().cloned().collect()
    }

    /// Overwrite a non-key field of the record with the given names.
    ///
    /// Returns `false` if there is no such record.
    pub fn update(&self, first: &str, last: &str, field: Field, value: &str) -> Result<bool> {
        Self::validate_token("value", value)?;

        let mut tree = self.tree.write().unwrap();
        let Some(person) = tree.get_mut(first, last) else {
            return Ok(false);
        };
        person.set(field, value)?;
        Ok(true)
    }

    /// Delete the record with the given names, returning it if it was present.
    #[inline]
    pub fn delete(&self, first: &str, last: &str) -> Option<Person> {
        self.tree.write().unwrap().delete(first, last)
    }

    /// Measure the tree height and check that it is balanced.
    #[inline]
    pub fn verify(&self) -> BalanceReport {
        self.tree.read().unwrap().check()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.read().unwrap().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.read().unwrap().is_empty()
    }

    /// Perform read-only access to the index using closure.
    #[inline]
    pub fn view<T>(&self, f: impl FnOnce(&AvlTree) -> T) -> T {
        f(&self.tree.read().unwrap())
    }

    /// Perform read-write access to the index using closure, excluding all other access.
    ///
    /// Records inserted here skip the token checks of [`PersonDB::insert`]; saving rejects them.
    #[inline]
    pub fn modify<T>(&self, f: impl FnOnce(&mut AvlTree) -> T) -> T {
        f(&mut self.tree.write().unwrap())
    }

    #[inline]
    fn display_path(&self) -> std::path::Display<'_> {
        self.path.as_deref().unwrap_or(Path::new("<memory>")).display()
    }

    fn validate_tree(tree: &AvlTree) -> Result<()> {
        tree.iter().try_for_each(Self::validate_person)
    }

    fn validate_person(person: &Person) -> Result<()> {
        const NAMES: [&str; 6] = ["last name", "first name", "state", "zip code", "password", "ssn"];

        for (field, value) in NAMES.into_iter().zip(person.text_fields()) {
            Self::validate_token(field, value)?;
        }
        Ok(())
    }

    fn write_tree(tree: &AvlTree, mut writer: impl Write) -> Result<usize> {
        for person in tree.iter() {
            writeln!(writer, "{person}")?;
        }
        writer.flush()?;
        Ok(tree.len())
    }

    fn validate_token(field: &'static str, value: &str) -> Result<()> {
        if codec::is_token(value) {
            return Ok(());
        }
        Err(InputInvalid {
            field,
            value: value.to_owned(),
        }
        .into())
    }
}

impl PersonDB {
    /// Get a debugger for the PersonDB.
    #[inline]
    pub fn debugger(&self) -> Debugger {
        Debugger {
            tree: self.tree.read().unwrap(),
        }
    }
}

/// Holds the index for reading; its `Debug` output draws the shape of the tree.
pub struct Debugger<'a> {
    tree: RwLockReadGuard<'a, AvlTree>,
}

impl Debugger<'_> {
    #[inline]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    #[inline]
    pub fn check(&self) -> BalanceReport {
        self.tree.check()
    }
}

impl Debug for Debugger<'_> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.tree.dump(f)
    }
}
