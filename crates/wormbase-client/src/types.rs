//! Entity-type catalogue and response types.
//!
//! The entity vocabulary is closed and defined at compile time. Widget
//! groups are defaults and documentation only; widget names are never
//! validated locally; an unknown name is forwarded to the remote endpoint
//! and fails there as a per-widget error.

use serde::{Deserialize, Serialize};

/// The closed set of WormBase entity classes.
pub const ENTITY_TYPES: [&str; 40] = [
    "gene",
    "protein",
    "transcript",
    "cds",
    "pseudogene",
    "phenotype",
    "disease",
    "strain",
    "variation",
    "transgene",
    "rnai",
    "anatomy_term",
    "life_stage",
    "go_term",
    "interaction",
    "expression_cluster",
    "expr_pattern",
    "paper",
    "person",
    "laboratory",
    "clone",
    "sequence",
    "feature",
    "operon",
    "gene_class",
    "molecule",
    "antibody",
    "construct",
    "motif",
    "homology_group",
    "rearrangement",
    "transposon",
    "transposon_family",
    "pcr_oligo",
    "position_matrix",
    "microarray_results",
    "structure_data",
    "analysis",
    "gene_cluster",
    "expr_profile",
];

/// Widgets served for every entity class.
pub const COMMON_WIDGETS: &[&str] = &["overview", "external_links", "references"];

/// Widgets served for genes.
pub const GENE_WIDGETS: &[&str] = &[
    "overview",
    "external_links",
    "references",
    "expression",
    "phenotype",
    "interactions",
    "homology",
    "sequences",
    "genetics",
    "ontology",
    "reagents",
    "mapping_data",
    "human_diseases",
    "history",
];

/// Widgets served for proteins.
pub const PROTEIN_WIDGETS: &[&str] = &[
    "overview",
    "external_links",
    "references",
    "sequences",
    "motif_details",
    "homology",
    "blast_details",
];

/// Widgets served for phenotypes.
pub const PHENOTYPE_WIDGETS: &[&str] = &[
    "overview",
    "external_links",
    "references",
    "rnai",
    "variation",
    "transgene",
    "go",
    "anatomy",
];

/// Default widget set fetched when a caller does not name any.
///
/// This is the dispatch table behind the per-type tools: one entry per
/// entity class with a richer default, everything else gets the overview.
pub fn default_widgets(entity_type: &str) -> &'static [&'static str] {
    match entity_type {
        "gene" => &["overview", "phenotype", "expression", "ontology"],
        _ => &["overview"],
    }
}

/// Whether `entity_type` belongs to the closed catalogue.
pub fn is_entity_type(entity_type: &str) -> bool {
    ENTITY_TYPES.contains(&entity_type)
}

/// One hit in a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub label: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A search outcome. `total` is whatever the backend reported (or the
/// local slice length when it reported nothing). Advisory only, callers
/// must not assume it equals `results.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: usize,
}
