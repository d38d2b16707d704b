//! Catalogue loading from JSON files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::record::{ClusterKeywords, SpecialistRecord};

/// A fully loaded catalogue: specialist records plus cluster keywords.
///
/// Built once at startup and treated as read-only. Reloading means loading a
/// new `Catalog` and swapping it in whole.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All specialist records, in file order.
    pub records: Vec<SpecialistRecord>,
    /// Ordered keyword lists per cluster id.
    pub clusters: ClusterKeywords,
}

impl Catalog {
    /// Returns the cluster ids referenced by records but absent from the
    /// cluster catalogue (excluding the unassigned sentinel).
    ///
    /// A well-formed catalogue returns an empty list.
    pub fn dangling_cluster_ids(&self) -> Vec<i32> {
        let mut dangling: Vec<i32> = self
            .records
            .iter()
            .filter(|r| r.is_clustered() && !self.clusters.contains_key(&r.topic_cluster))
            .map(|r| r.topic_cluster)
            .collect();
        dangling.sort_unstable();
        dangling.dedup();
        dangling
    }
}

/// Loads a catalogue from a records file and a clusters file.
///
/// The records file is a JSON array of [`SpecialistRecord`]. The clusters file
/// is a JSON object mapping cluster-id strings to ordered keyword lists, e.g.
/// `{"0": ["Parkinson disease", "movement disorders"]}`. Entries keyed `"-1"`
/// (the unassigned sentinel) are dropped.
pub fn load_catalog(records_path: &Path, clusters_path: &Path) -> Result<Catalog, CatalogError> {
    let records = parse_records_str(&read_file(records_path)?, records_path)?;
    let clusters = parse_clusters_str(&read_file(clusters_path)?, clusters_path)?;
    Ok(Catalog { records, clusters })
}

/// Reads a file to a string, wrapping I/O errors with the path.
fn read_file(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses specialist records from a JSON array string.
pub fn parse_records_str(
    content: &str,
    path: &Path,
) -> Result<Vec<SpecialistRecord>, CatalogError> {
    serde_json::from_str(content).map_err(|source| CatalogError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a cluster keyword catalogue from a JSON object string.
///
/// Map keys are cluster-id strings; non-integer keys are an error. The `-1`
/// sentinel key is accepted but discarded, since the unassigned pseudo-cluster
/// never participates in matching.
pub fn parse_clusters_str(content: &str, path: &Path) -> Result<ClusterKeywords, CatalogError> {
    let raw: BTreeMap<String, Vec<String>> =
        serde_json::from_str(content).map_err(|source| CatalogError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;

    let mut clusters = ClusterKeywords::new();
    for (key, keywords) in raw {
        let id: i32 = key
            .trim()
            .parse()
            .map_err(|_| CatalogError::InvalidClusterId { key: key.clone() })?;
        if id >= 0 {
            clusters.insert(id, keywords);
        }
    }
    Ok(clusters)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    /// Writes a file under `dir` and returns its path.
    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_catalog_roundtrip() {
        let dir = TempDir::new().unwrap();
        let records = write_file(
            &dir,
            "records.json",
            r#"[{"id": 1, "name": "Dr. Alice Nguyen", "topic_cluster": 0}]"#,
        );
        let clusters = write_file(
            &dir,
            "clusters.json",
            r#"{"0": ["Parkinson disease", "movement disorders"]}"#,
        );

        let catalog = load_catalog(&records, &clusters).unwrap();
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.clusters[&0].len(), 2);
        assert!(catalog.dangling_cluster_ids().is_empty());
    }

    #[test]
    fn load_catalog_missing_file() {
        let dir = TempDir::new().unwrap();
        let clusters = write_file(&dir, "clusters.json", "{}");
        let missing = dir.path().join("nope.json");

        let err = load_catalog(&missing, &clusters).unwrap_err();
        assert!(matches!(err, CatalogError::ReadFile { .. }));
    }

    #[test]
    fn parse_clusters_drops_sentinel() {
        let content = r#"{"-1": ["outliers"], "2": ["diabetes"]}"#;
        let clusters = parse_clusters_str(content, Path::new("clusters.json")).unwrap();

        assert!(!clusters.contains_key(&-1));
        assert_eq!(clusters[&2], vec!["diabetes".to_string()]);
    }

    #[test]
    fn parse_clusters_rejects_bad_key() {
        let content = r#"{"abc": ["diabetes"]}"#;
        let err = parse_clusters_str(content, Path::new("clusters.json")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidClusterId { key } if key == "abc"));
    }

    #[test]
    fn parse_records_rejects_bad_json() {
        let err = parse_records_str("not json", Path::new("records.json")).unwrap_err();
        assert!(matches!(err, CatalogError::ParseJson { .. }));
    }

    #[test]
    fn dangling_cluster_ids_reported_sorted() {
        let catalog = Catalog {
            records: vec![
                serde_json::from_str(r#"{"id": 1, "name": "a", "topic_cluster": 9}"#).unwrap(),
                serde_json::from_str(r#"{"id": 2, "name": "b", "topic_cluster": 4}"#).unwrap(),
                serde_json::from_str(r#"{"id": 3, "name": "c", "topic_cluster": -1}"#).unwrap(),
            ],
            clusters: ClusterKeywords::new(),
        };

        assert_eq!(catalog.dangling_cluster_ids(), vec![4, 9]);
    }
}
