//! Result rendering: tables for terminals, JSON for pipes.

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use medref_engine::{ClusterScore, ScoredRecord, SearchResponse, SearchStats};
use serde::Serialize;

/// JSON envelope for `medref search --json`.
#[derive(Serialize)]
pub struct JsonSearchOutput<'a> {
    /// The query as given on the command line.
    pub query: &'a str,
    /// The location filter, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    /// The full engine response.
    #[serde(flatten)]
    pub response: &'a SearchResponse,
}

/// JSON envelope for `medref clusters --json`.
#[derive(Serialize)]
pub struct JsonClustersOutput<'a> {
    /// The query as given on the command line.
    pub query: &'a str,
    /// Scored clusters, best first.
    pub clusters: &'a [ClusterScore],
}

/// Prints ranked results as a table.
pub fn print_results_table(results: &[ScoredRecord]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Score",
        "Name",
        "Specialty",
        "Subspecialty",
        "Location",
        "Cluster",
    ]);
    for record in results {
        table.add_row(vec![
            Cell::new(format!("{:.2}", record.scores.search_score)),
            Cell::new(&record.name),
            Cell::new(&record.specialty),
            Cell::new(&record.subspecialty),
            Cell::new(format_location(record)),
            Cell::new(record.topic_cluster.to_string()),
        ]);
    }
    println!("{table}");
}

/// Prints cluster scores as a table.
pub fn print_clusters_table(scores: &[ClusterScore]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Cluster", "Score", "Matched keywords"]);
    for cs in scores {
        table.add_row(vec![
            Cell::new(cs.cluster_id.to_string()),
            Cell::new(format!("{:.2}", cs.score)),
            Cell::new(cs.matched_keywords.join(", ")),
        ]);
    }
    println!("{table}");
}

/// Prints pipeline statistics for `--explain`.
pub fn print_stats(stats: &SearchStats) {
    let path = match stats.path {
        Some(p) => format!("{p:?}").to_lowercase(),
        None => "none".to_string(),
    };
    println!("Path:                  {path}");
    println!("Clusters scored:       {}", stats.clusters_scored);
    println!("Candidates considered: {}", stats.candidates_considered);
    println!("Results returned:      {}", stats.result_count);
}

/// City and state joined for display, skipping empty parts.
fn format_location(record: &ScoredRecord) -> String {
    let parts: Vec<&str> = [record.city.as_str(), record.state.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    parts.join(", ")
}
