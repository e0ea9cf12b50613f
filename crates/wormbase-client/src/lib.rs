//! # WormBase Client
//!
//! HTTP client for the [WormBase](https://wormbase.org) REST and search
//! services: entity search with identifier short-circuiting and a
//! degradation cascade, per-widget entity fetches, and normalization of
//! the provider's semi-structured JSON into flat records.
//!
//! All operations are stateless per call; nothing is cached or persisted.
//!
//! ```rust,ignore
//! use wormbase_client::WormBaseClient;
//!
//! let client = WormBaseClient::from_env();
//! let hits = client.search("daf-2", Some("gene"), Some(5)).await?;
//! let gene = client.get_gene("WBGene00000898", None).await;
//! ```

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{infer_type_from_id, looks_like_id, WormBaseClient, BASE_URL_ENV};
pub use error::{ClientError, ClientResult};
pub use normalize::{clean_widget_data, simplify_value};
pub use types::{
    default_widgets, is_entity_type, SearchResponse, SearchResult, COMMON_WIDGETS, ENTITY_TYPES,
    GENE_WIDGETS, PHENOTYPE_WIDGETS, PROTEIN_WIDGETS,
};
