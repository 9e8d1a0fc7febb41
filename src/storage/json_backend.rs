use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use super::{KeyValueStore, Result};

const ENTRY_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one `<key>.json` file per entry.
///
/// Writes are staged to a sibling temporary file and renamed into place, so a
/// failed write never truncates the previous value.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), ENTRY_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "entry".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("store")).expect("json store");
        (store, temp)
    }

    #[test]
    fn set_and_get_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.set("theme", "\"light\"").expect("write entry");
        assert_eq!(
            store.get("theme").expect("read entry").as_deref(),
            Some("\"light\"")
        );
        assert!(store.entry_path("theme").ends_with("theme.json"));
    }

    #[test]
    fn missing_entry_reads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("transactions").expect("read entry").is_none());
        store.remove("transactions").expect("removing a missing key is fine");
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let (store, _guard) = store_with_temp_dir();
        store.set("transactions", "[]").expect("initial write");

        // A directory squatting on the staging path makes File::create fail.
        let path = store.entry_path("transactions");
        fs::create_dir_all(tmp_path(&path)).unwrap();

        assert!(store.set("transactions", "[1]").is_err());
        assert_eq!(
            store.get("transactions").unwrap().as_deref(),
            Some("[]"),
            "failed write must not clobber the stored entry"
        );
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        assert_eq!(canonical_key("My Ledger/Theme"), "my_ledger_theme");
        assert_eq!(canonical_key("  "), "entry");
    }
}
