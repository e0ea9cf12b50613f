//! WormBase MCP Server: Model Context Protocol interface for the
//! WormBase biological database.
//!
//! Exposes the lookup operations of [`wormbase_client`] as MCP tools
//! (search, get_gene, get_protein, get_phenotype, get_disease, get_strain,
//! get_variation, get_interactions, get_expression, get_ontology,
//! get_entity, get_paper) plus one read-only resource listing the
//! entity-type catalogue.

pub mod catalog;
pub mod tools;
