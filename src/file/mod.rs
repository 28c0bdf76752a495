// src/file/mod.rs
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use crate::api::AnalysisResult;

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

#[derive(Debug)]
pub struct RonFileHandler<T> {
    _marker: PhantomData<T>,
}

impl<T> RonFileHandler<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T: Serialize + DeserializeOwned> FileHandler<T> for RonFileHandler<T> {
    fn load(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        ron::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn save(&self, data: &T, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let content = ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default())?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[derive(Debug)]
pub struct JsonFileHandler<T> {
    _marker: PhantomData<T>,
}

impl<T> JsonFileHandler<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T: Serialize + DeserializeOwned> FileHandler<T> for JsonFileHandler<T> {
    fn load(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn save(&self, data: &T, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let content = serde_json::to_string_pretty(data)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

pub fn export_report(report: &AnalysisResult, path: &Path) -> Result<()> {
    JsonFileHandler::new().save(report, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PainPoint;

    #[test]
    fn exported_report_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("sleep.json");
        let report = AnalysisResult {
            pain_points: vec![PainPoint {
                title: "Trackers disagree".into(),
                description: None,
                frequency: Some(3),
                severity: None,
            }],
            ..Default::default()
        };

        export_report(&report, &path).unwrap();
        let loaded: AnalysisResult = JsonFileHandler::new().load(&path).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = RonFileHandler::<Vec<String>>::new()
            .load(Path::new("/definitely/not/here.ron"))
            .unwrap_err();
        assert!(err.to_string().contains("here.ron"));
    }
}
