use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use log::{debug, info};
use crate::models::{CourseRecord, Grade};

// Key the course list is stored under.
pub const STORAGE_KEY: &str = "gpaCalculatorData";

// A durable key/value store holding text values.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn describe(&self) -> String;
}

// Keeps every key in one JSON object file. A missing file is an empty store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Store {} is not a JSON object of strings", self.path.display()))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Whole-file replace through a sibling so readers never see half a write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace store {}", self.path.display()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// The seed shown on a first visit.
pub fn default_courses() -> Vec<CourseRecord> {
    [
        ("Differential Eqn", "2", Grade::A),
        ("DSA", "2", Grade::BPlus),
        ("Com", "5", Grade::BPlus),
        ("Linear Alge", "3", Grade::BPlus),
        ("Discrete", "3", Grade::AMinus),
        ("Elec", "3", Grade::B),
    ]
    .into_iter()
    .map(|(name, credits, grade)| CourseRecord::new(Some(name), Some(credits), Some(grade)))
    .collect()
}

// Overwrites the snapshot with the full course list, in order.
pub fn save(store: &mut dyn Store, courses: &[CourseRecord]) -> Result<()> {
    let snapshot = serde_json::to_string(courses)?;
    store
        .set(STORAGE_KEY, &snapshot)
        .with_context(|| format!("Failed to save courses to {}", store.describe()))?;
    debug!("Saved {} course(s) to {}", courses.len(), store.describe());
    Ok(())
}

// Reads the snapshot back. Never writes.
pub fn load(store: &dyn Store) -> Result<Vec<CourseRecord>> {
    let Some(snapshot) = store.get(STORAGE_KEY)? else {
        info!("No saved courses in {}, using the defaults", store.describe());
        return Ok(default_courses());
    };

    let courses: Vec<CourseRecord> = serde_json::from_str(&snapshot).with_context(|| {
        format!("Saved courses under '{}' in {} are malformed", STORAGE_KEY, store.describe())
    })?;

    if courses.is_empty() {
        debug!("Saved course list is empty, starting with one blank row");
        return Ok(vec![CourseRecord::blank()]);
    }
    debug!("Loaded {} course(s) from {}", courses.len(), store.describe());
    Ok(courses)
}
