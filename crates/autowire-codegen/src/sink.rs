use crate::{error::Error, pass::GeneratedUnit};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

///
/// UnitSink
///
/// Accepts one named unit per class. A unit with a name already written in
/// this or an earlier pass replaces it.
///

pub trait UnitSink {
    fn write(&mut self, unit: &GeneratedUnit) -> Result<(), Error>;
}

///
/// MemorySink
///

#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    units: BTreeMap<String, String>,
}

impl MemorySink {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.units.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }
}

impl UnitSink for MemorySink {
    fn write(&mut self, unit: &GeneratedUnit) -> Result<(), Error> {
        self.units.insert(unit.name.clone(), unit.source.clone());

        Ok(())
    }
}

///
/// DirSink
///
/// Writes each unit to `<dir>/<name>`.
///

#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl UnitSink for DirSink {
    fn write(&mut self, unit: &GeneratedUnit) -> Result<(), Error> {
        let path = self.dir.join(&unit.name);

        fs::write(&path, &unit.source).map_err(|source| Error::Write { path, source })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, source: &str) -> GeneratedUnit {
        GeneratedUnit {
            name: name.to_string(),
            module_path: vec![],
            source: source.to_string(),
        }
    }

    #[test]
    fn memory_sink_overwrites_by_name() {
        let mut sink = MemorySink::default();
        sink.write(&unit("a_wired.rs", "old")).unwrap();
        sink.write(&unit("b_wired.rs", "b")).unwrap();
        sink.write(&unit("a_wired.rs", "new")).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("a_wired.rs"), Some("new"));
        assert_eq!(sink.names().collect::<Vec<_>>(), vec!["a_wired.rs", "b_wired.rs"]);
    }

    #[test]
    fn dir_sink_writes_and_replaces_files() {
        let dir = std::env::temp_dir().join(format!("autowire-sink-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut sink = DirSink::new(&dir);
        sink.write(&unit("lamp_wired.rs", "first")).unwrap();
        sink.write(&unit("lamp_wired.rs", "second")).unwrap();

        assert_eq!(fs::read_to_string(dir.join("lamp_wired.rs")).unwrap(), "second");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dir_sink_reports_the_failing_path() {
        let mut sink = DirSink::new("/definitely/not/here");
        let err = sink.write(&unit("x_wired.rs", "")).unwrap_err();

        assert!(matches!(err, Error::Write { ref path, .. } if path.ends_with("x_wired.rs")));
    }
}
