//! Local puzzle input store

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Which input file of a puzzle to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Real,
    Example,
}

impl InputKind {
    fn extension(self) -> &'static str {
        match self {
            InputKind::Real => "input",
            InputKind::Example => "example",
        }
    }
}

/// Read-only view of the input directory
///
/// Directory structure: `{dir}/{year}/day{DD}.input` and
/// `{dir}/{year}/day{DD}.example`. A single explicit file can replace the
/// store entry of one puzzle.
#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
    kind: InputKind,
    override_file: Option<(u16, u8, PathBuf)>,
}

impl InputStore {
    pub fn new(dir: PathBuf, kind: InputKind) -> Self {
        Self {
            dir,
            kind,
            override_file: None,
        }
    }

    /// Serve `path` for year/day instead of the store file
    pub fn with_override(mut self, year: u16, day: u8, path: PathBuf) -> Self {
        self.override_file = Some((year, day, path));
        self
    }

    /// Path the input for year/day is read from
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match &self.override_file {
            Some((y, d, path)) if (*y, *d) == (year, day) => path.clone(),
            _ => self
                .dir
                .join(year.to_string())
                .join(format!("day{day:02}.{}", self.kind.extension())),
        }
    }

    /// Check if the input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Load the input for year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("{year}/{day:02}: read {} bytes from {}", content.len(), path.display());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(InputError::Missing(path)),
            Err(source) => Err(InputError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"), InputKind::Real);
        assert_eq!(store.path(2024, 1), PathBuf::from("inputs/2024/day01.input"));
        assert_eq!(store.path(2023, 25), PathBuf::from("inputs/2023/day25.input"));

        let examples = InputStore::new(PathBuf::from("inputs"), InputKind::Example);
        assert_eq!(examples.path(2021, 6), PathBuf::from("inputs/2021/day06.example"));
    }

    #[test]
    fn test_read_real_and_example() {
        let temp = TempDir::new().unwrap();
        write(&temp, "2020/day01.input", "real\n");
        write(&temp, "2020/day01.example", "example\n");

        let real = InputStore::new(temp.path().to_path_buf(), InputKind::Real);
        assert!(real.contains(2020, 1));
        assert_eq!(real.read(2020, 1).unwrap(), "real\n");

        let example = InputStore::new(temp.path().to_path_buf(), InputKind::Example);
        assert_eq!(example.read(2020, 1).unwrap(), "example\n");
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), InputKind::Real);
        assert!(!store.contains(2022, 3));
        match store.read(2022, 3) {
            Err(InputError::Missing(path)) => assert!(path.ends_with("2022/day03.input")),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2022/day03.input")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), InputKind::Real);
        assert!(!store.contains(2022, 3));
        assert!(matches!(store.read(2022, 3), Err(InputError::Read { .. })));
    }

    #[test]
    fn test_override_applies_to_one_puzzle() {
        let temp = TempDir::new().unwrap();
        let custom = write(&temp, "custom.txt", "custom\n");
        write(&temp, "2020/day02.input", "stored\n");

        let store = InputStore::new(temp.path().to_path_buf(), InputKind::Real)
            .with_override(2020, 1, custom.clone());
        assert_eq!(store.path(2020, 1), custom);
        assert_eq!(store.read(2020, 1).unwrap(), "custom\n");
        assert_eq!(store.read(2020, 2).unwrap(), "stored\n");
    }
}
