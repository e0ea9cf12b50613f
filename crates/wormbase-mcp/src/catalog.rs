//! The entity-type catalogue resource.
//!
//! A single static JSON document listing every queryable entity class
//! with a human-readable description. Served read-only under a fixed URI.

use serde_json::{json, Value};
use wormbase_client::ENTITY_TYPES;

/// URI of the catalogue resource.
pub const ENTITY_TYPES_URI: &str = "wormbase://entity-types";

/// Curated descriptions for the classes users ask about most; everything
/// else gets a generated one-liner.
fn describe(entity_type: &str) -> String {
    match entity_type {
        "gene" => "Genes in C. elegans and related nematodes".to_string(),
        "protein" => "Protein sequences and annotations".to_string(),
        "phenotype" => "Observable characteristics and traits".to_string(),
        "disease" => "Human diseases with nematode models".to_string(),
        "strain" => "Laboratory strains and genetic backgrounds".to_string(),
        "variation" => "Genetic variants and alleles".to_string(),
        "transgene" => "Transgenic constructs".to_string(),
        "rnai" => "RNAi experiments and results".to_string(),
        "anatomy_term" => "Anatomical structures and cell types".to_string(),
        "life_stage" => "Developmental stages".to_string(),
        "go_term" => "Gene Ontology terms".to_string(),
        "interaction" => "Molecular and genetic interactions".to_string(),
        "expression_cluster" => "Co-expression clusters".to_string(),
        "paper" => "Scientific publications".to_string(),
        "person" => "Researchers in the field".to_string(),
        "laboratory" => "Research laboratories".to_string(),
        other => format!("{other} entities in WormBase"),
    }
}

/// Build the catalogue document served at [`ENTITY_TYPES_URI`].
pub fn entity_types_document() -> Value {
    json!({
        "description": "Available WormBase entity types that can be queried",
        "types": ENTITY_TYPES
            .iter()
            .map(|ty| json!({ "name": ty, "description": describe(ty) }))
            .collect::<Vec<_>>(),
    })
}
