use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// File extension of level files.
pub const LEVEL_EXTENSION: &str = "data";

const RENAME_EXTENSION: &str = "renaming";

/// Name of the `n`-th level (1-based), e.g. `Level007`.
#[must_use]
pub fn level_name(n: usize) -> String {
    format!("Level{n:03}")
}

/// Sort key placing `Level99` before `Level101` before `Level1000`.
///
/// Names are compared by their text with trailing digits removed, then by the
/// numeric value of those digits.
fn level_order_key(name: &str) -> (&str, Option<u64>, &str) {
    let prefix = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = name[prefix.len()..].parse().ok();
    (prefix, number, name)
}

fn path_order_key(path: &Path) -> (String, Option<u64>, PathBuf) {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let (prefix, number, _) = level_order_key(&stem);
    (prefix.to_owned(), number, path.to_path_buf())
}

/// Where level texts are kept.
///
/// Levels are addressed by name. [`list`](LevelStore::list) normalizes the
/// store so that names are contiguous `Level001`, `Level002`, ... in their
/// previous sort order, and returns them.
pub trait LevelStore: fmt::Debug {
    /// Normalizes level names and returns them in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated or renamed.
    fn list(&mut self) -> io::Result<Vec<String>>;

    /// Reads the text of level `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the level does not exist or cannot be read.
    fn read(&self, name: &str) -> io::Result<String>;

    /// Creates or replaces level `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the level cannot be written.
    fn write(&mut self, name: &str, contents: &str) -> io::Result<()>;
}

/// Levels stored as `<name>.data` files in one directory.
#[derive(Debug, Clone)]
pub struct FsLevelStore {
    dir: PathBuf,
}

impl FsLevelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of level `name`.
    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{LEVEL_EXTENSION}"))
    }

    fn level_files(&self) -> io::Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut files = vec![];
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == LEVEL_EXTENSION) {
                files.push(path);
            }
        }
        files.sort_by_cached_key(|path| path_order_key(path));
        Ok(files)
    }
}

impl LevelStore for FsLevelStore {
    fn list(&mut self) -> io::Result<Vec<String>> {
        let files = self.level_files()?;
        let names: Vec<String> = (1..=files.len()).map(level_name).collect();

        // Renames go through a temporary name first so that shifting
        // `Level003` down to `Level002` cannot clobber a file still to be moved.
        let mut staged = vec![];
        for (path, name) in files.iter().zip(&names) {
            if path.file_stem().is_some_and(|stem| stem == name.as_str()) {
                continue;
            }
            let tmp = self.dir.join(format!("{name}.{RENAME_EXTENSION}"));
            fs::rename(path, &tmp)?;
            staged.push((tmp, self.path_of(name)));
        }
        for (tmp, target) in staged {
            log::debug!("renaming level file to {}", target.display());
            fs::rename(tmp, target)?;
        }

        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.path_of(name))
    }

    fn write(&mut self, name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_of(name), contents)
    }
}

/// Levels held in memory, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelStore {
    levels: BTreeMap<String, String>,
}

impl MemoryLevelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a level under an arbitrary name.
    #[must_use]
    pub fn with_level(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.levels.insert(name.into(), contents.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.levels.get(name).map(String::as_str)
    }
}

impl LevelStore for MemoryLevelStore {
    fn list(&mut self) -> io::Result<Vec<String>> {
        let mut levels: Vec<_> = std::mem::take(&mut self.levels).into_iter().collect();
        levels.sort_by(|(a, _), (b, _)| level_order_key(a).cmp(&level_order_key(b)));
        self.levels = levels
            .into_iter()
            .map(|(_, contents)| contents)
            .enumerate()
            .map(|(i, contents)| (level_name(i + 1), contents))
            .collect();
        Ok(self.levels.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> io::Result<String> {
        self.levels.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no level named {name}"))
        })
    }

    fn write(&mut self, name: &str, contents: &str) -> io::Result<()> {
        self.levels.insert(name.to_owned(), contents.to_owned());
        Ok(())
    }
}
