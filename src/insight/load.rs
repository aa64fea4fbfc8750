use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::error::DataError;
use super::model::ArboretumData;
use super::parse::parse_arboretum;

const BUNDLED_SAMPLE: &str = include_str!("../../assets/arboretum.json");

pub fn load_arboretum(path: &Path) -> Result<ArboretumData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read arboretum data from {}", path.display()))?;

    let data = parse_arboretum(&raw)
        .with_context(|| format!("failed to load arboretum data from {}", path.display()))?;

    report_ingest(&data);
    Ok(data)
}

pub fn bundled_sample() -> Result<ArboretumData, DataError> {
    let data = parse_arboretum(BUNDLED_SAMPLE)?;
    report_ingest(&data);
    Ok(data)
}

/// One-time validation pass: rendering drops dangling edges silently, so they
/// are reported here instead.
fn report_ingest(data: &ArboretumData) {
    let dangling = data.dangling_references();
    for reference in &dangling {
        warn!(
            source = reference.source_id.as_str(),
            target = reference.target_id.as_str(),
            "connection target does not exist"
        );
    }

    info!(
        insights = data.len(),
        foundational = data.foundational_count(),
        connections = data.connection_count(),
        dangling = dangling.len(),
        "arboretum data loaded"
    );
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn bundled_sample_is_valid() {
        let data = bundled_sample().unwrap();
        assert!(!data.is_empty());
        assert!(data.foundational_count() > 0);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLED_SAMPLE.as_bytes()).unwrap();

        let data = load_arboretum(file.path()).unwrap();
        assert_eq!(data.len(), bundled_sample().unwrap().len());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_arboretum(Path::new("/nonexistent/arboretum.json")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/arboretum.json"));
    }

    #[test]
    fn malformed_file_keeps_data_error_as_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "insights": [ { "id": "a" "#).unwrap();

        let error = load_arboretum(file.path()).unwrap_err();
        assert!(error.downcast_ref::<DataError>().is_some());
    }
}
