//! HTTP client for the WormBase REST and search services.
//!
//! One logical flow per call: build a URL, GET it with the fixed header
//! set, decode JSON, normalize. No caching, no retries; a remote failure
//! is caught once and degraded (per-widget error marker, fallback cascade,
//! or a propagated [`ClientError`]).

use crate::error::{ClientError, ClientResult};
use crate::normalize::clean_widget_data;
use crate::types::{default_widgets, SearchResponse, SearchResult};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

const BASE_URL: &str = "http://rest.wormbase.org";
const SEARCH_URL: &str = "https://wormbase.org/search";

/// Environment variable overriding the REST base origin.
pub const BASE_URL_ENV: &str = "WORMBASE_BASE_URL";

// The public REST endpoints reject non-browser clients, so requests
// advertise a desktop Chrome identity.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Recognized identifier shapes, in priority order; first match wins.
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^WB[A-Z][a-z]+\d+$",   // WBGene00006763, WBVar00143949
        r"^WBPhenotype:\d+$",    // WBPhenotype:0000643
        r"^DOID:\d+$",           // Disease Ontology
        r"^GO:\d+$",             // Gene Ontology
        r"^[A-Z]+\d+$",          // bare alphanumeric accessions (CE12345, N2-style)
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex should not panic"))
    .collect()
});

/// ID prefix → entity class, in priority order.
const PREFIX_TYPES: [(&str, &str); 12] = [
    ("WBGene", "gene"),
    ("WBProtein", "protein"),
    ("CE", "protein"),
    ("WBVar", "variation"),
    ("WBStrain", "strain"),
    ("WBPhenotype", "phenotype"),
    ("WBTransgene", "transgene"),
    ("WBRNAi", "rnai"),
    ("WBPaper", "paper"),
    ("WBPerson", "person"),
    ("DOID:", "disease"),
    ("GO:", "go_term"),
];

/// Entity classes tried, in order, when the search endpoint is down.
const FALLBACK_TYPES: [&str; 5] = ["gene", "protein", "variation", "strain", "phenotype"];

/// Whether `query` has the shape of a structured identifier.
pub fn looks_like_id(query: &str) -> bool {
    ID_PATTERNS.iter().any(|p| p.is_match(query))
}

/// Infer the entity class from an identifier prefix. First matching
/// prefix wins; `None` means "cannot infer, skip the direct lookup".
pub fn infer_type_from_id(id: &str) -> Option<&'static str> {
    PREFIX_TYPES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, ty)| *ty)
}

/// Stateless client for the WormBase REST and search services.
#[derive(Debug, Clone)]
pub struct WormBaseClient {
    client: reqwest::Client,
    base_url: String,
    search_url: String,
}

impl Default for WormBaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WormBaseClient {
    /// Create a client against the production origins.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            search_url: SEARCH_URL.to_string(),
        }
    }

    /// Create a client, honoring the `WORMBASE_BASE_URL` override.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(base) => Self::new().with_base_url(&base),
            Err(_) => Self::new(),
        }
    }

    /// Override the REST base origin.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the search-service origin.
    pub fn with_search_url(mut self, search_url: &str) -> Self {
        self.search_url = search_url.trim_end_matches('/').to_string();
        self
    }

    /// GET a URL with the fixed header set and decode the JSON body.
    async fn fetch(&self, url: &str) -> ClientResult<Value> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("User-Agent", USER_AGENT)
            .header("Sec-Fetch-Dest", "empty")
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "cross-site")
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Fetch one widget of one entity and normalize it.
    async fn fetch_widget(
        &self,
        entity_type: &str,
        id: &str,
        widget: &str,
    ) -> ClientResult<Map<String, Value>> {
        let url = format!(
            "{}/rest/widget/{}/{}/{}",
            self.base_url,
            entity_type,
            urlencoding::encode(id),
            widget
        );
        let data = self.fetch(&url).await?;
        Ok(clean_widget_data(&data))
    }

    /// Search WormBase for entities.
    ///
    /// Queries that look like structured identifiers short-circuit into a
    /// direct single-entity lookup. If the search endpoint itself fails,
    /// the query is retried as a direct overview lookup across a fixed
    /// list of candidate classes; a zero-result response is a valid,
    /// non-error outcome.
    pub async fn search(
        &self,
        query: &str,
        entity_type: Option<&str>,
        limit: Option<usize>,
    ) -> ClientResult<SearchResponse> {
        let limit = limit.unwrap_or(10);

        if looks_like_id(query) {
            if let Some(hit) = self.try_direct_lookup(query, entity_type).await {
                return Ok(SearchResponse {
                    query: query.to_string(),
                    results: vec![hit],
                    total: 1,
                });
            }
        }

        let search_type = entity_type.unwrap_or("all");
        let url = format!(
            "{}/{}/{}?content-type=application/json",
            self.search_url,
            search_type,
            urlencoding::encode(query)
        );

        match self.fetch(&url).await {
            Ok(response) => {
                let results = parse_search_results(&response, limit);
                let total = results.len();
                Ok(SearchResponse {
                    query: query.to_string(),
                    results,
                    total,
                })
            }
            Err(err) => {
                warn!(error = %err, "search endpoint failed, trying direct lookups");
                Ok(self.fallback_search(query, entity_type).await)
            }
        }
    }

    /// Direct single-entity lookup for an identifier-shaped query.
    /// Returns `None` when the type cannot be inferred or the overview
    /// comes back empty or unfetchable.
    async fn try_direct_lookup(
        &self,
        id: &str,
        entity_type: Option<&str>,
    ) -> Option<SearchResult> {
        let inferred = entity_type.or_else(|| infer_type_from_id(id))?;
        let overview = self.fetch_widget(inferred, id, "overview").await.ok()?;
        if overview.is_empty() {
            return None;
        }
        Some(SearchResult {
            id: id.to_string(),
            label: extract_label(&overview).unwrap_or_else(|| id.to_string()),
            class: inferred.to_string(),
            taxonomy: None,
            description: extract_description(&overview),
        })
    }

    /// Cascade tried when the search endpoint is unreachable: overview
    /// lookups per candidate class, first hit wins, exhaustion yields a
    /// well-formed empty response.
    async fn fallback_search(&self, query: &str, entity_type: Option<&str>) -> SearchResponse {
        let candidates: Vec<&str> = match entity_type {
            Some(ty) => vec![ty],
            None => FALLBACK_TYPES.to_vec(),
        };

        for ty in candidates {
            let overview = match self.fetch_widget(ty, query, "overview").await {
                Ok(overview) if !overview.is_empty() => overview,
                _ => continue,
            };
            return SearchResponse {
                query: query.to_string(),
                results: vec![SearchResult {
                    id: query.to_string(),
                    label: extract_label(&overview).unwrap_or_else(|| query.to_string()),
                    class: ty.to_string(),
                    taxonomy: None,
                    description: extract_description(&overview),
                }],
                total: 1,
            };
        }

        SearchResponse {
            query: query.to_string(),
            results: Vec::new(),
            total: 0,
        }
    }

    /// Fetch an entity as a map of widget name → normalized data.
    ///
    /// Widgets fetch independently: a failed widget stores an
    /// `{"error": ...}` marker under its key and never aborts the others,
    /// so every requested key is present in the result. Defaults come from
    /// the per-class table in [`crate::types::default_widgets`].
    pub async fn get_entity(
        &self,
        entity_type: &str,
        id: &str,
        widgets: Option<&[String]>,
    ) -> Map<String, Value> {
        let requested: Vec<&str> = match widgets {
            Some(widgets) => widgets.iter().map(String::as_str).collect(),
            None => default_widgets(entity_type).to_vec(),
        };

        let mut record = Map::new();
        record.insert("id".to_string(), json!(id));
        record.insert("type".to_string(), json!(entity_type));

        for widget in requested {
            match self.fetch_widget(entity_type, id, widget).await {
                Ok(data) => {
                    record.insert(widget.to_string(), Value::Object(data));
                }
                Err(err) => {
                    warn!(widget, error = %err, "widget fetch failed");
                    record.insert(
                        widget.to_string(),
                        json!({ "error": format!("Failed to fetch {widget}") }),
                    );
                }
            }
        }

        record
    }

    /// Fetch a gene with the gene default widget set.
    pub async fn get_gene(&self, id: &str, widgets: Option<&[String]>) -> Map<String, Value> {
        self.get_entity("gene", id, widgets).await
    }

    /// Fetch gene interactions, optionally projected to one kind.
    ///
    /// With `interaction_type` other than `"all"`, only the selected key
    /// of {physical, genetic, regulatory} appears in the result; keys not
    /// selected are omitted entirely, not set to empty.
    pub async fn get_interactions(
        &self,
        id: &str,
        interaction_type: &str,
    ) -> ClientResult<Map<String, Value>> {
        let interactions = self.fetch_widget("gene", id, "interactions").await?;

        if interaction_type == "all" {
            return Ok(interactions);
        }

        let mut filtered = Map::new();
        if let Some(value) = interactions.get(interaction_type) {
            filtered.insert(interaction_type.to_string(), value.clone());
        }
        Ok(filtered)
    }

    /// Fetch the expression widget of a gene. No fallback.
    pub async fn get_expression(&self, id: &str) -> ClientResult<Map<String, Value>> {
        self.fetch_widget("gene", id, "expression").await
    }

    /// Fetch the ontology widget of a gene. No fallback.
    pub async fn get_ontology(&self, id: &str) -> ClientResult<Map<String, Value>> {
        self.fetch_widget("gene", id, "ontology").await
    }

    /// Fetch one field of an entity via the narrower field endpoint.
    ///
    /// The provider sometimes wraps the value under the field name and
    /// sometimes doesn't; the named field is returned when present,
    /// otherwise the whole decoded payload.
    pub async fn get_field(
        &self,
        entity_type: &str,
        id: &str,
        field: &str,
    ) -> ClientResult<Value> {
        let url = format!(
            "{}/rest/field/{}/{}/{}",
            self.base_url,
            entity_type,
            urlencoding::encode(id),
            field
        );
        let data = self.fetch(&url).await?;
        Ok(match data.get(field) {
            Some(value) if !value.is_null() => value.clone(),
            _ => data,
        })
    }
}

/// Map raw search hits into [`SearchResult`]s, tolerating the provider
/// naming its result list differently across endpoints.
fn parse_search_results(response: &Value, limit: usize) -> Vec<SearchResult> {
    let hits = ["hits", "results", "matches"]
        .iter()
        .find_map(|key| response.get(*key).and_then(Value::as_array));

    let Some(hits) = hits else {
        return Vec::new();
    };

    hits.iter()
        .take(limit)
        .map(|hit| SearchResult {
            id: str_at(hit, "id")
                .or_else(|| str_path(hit, "name", "id"))
                .or_else(|| str_at(hit, "wbid"))
                .unwrap_or_default(),
            label: str_at(hit, "label")
                .or_else(|| str_path(hit, "name", "label"))
                .or_else(|| str_at(hit, "name"))
                .unwrap_or_default(),
            class: str_at(hit, "class")
                .or_else(|| str_at(hit, "type"))
                .or_else(|| str_at(hit, "category"))
                .unwrap_or_default(),
            taxonomy: str_at(hit, "taxonomy").or_else(|| str_at(hit, "species")),
            description: str_at(hit, "description").or_else(|| str_at(hit, "summary")),
        })
        .collect()
}

fn str_at(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(str::to_string)
}

fn str_path(value: &Value, outer: &str, inner: &str) -> Option<String> {
    value.get(outer)?.get(inner)?.as_str().map(str::to_string)
}

/// Pull a display label out of a normalized overview.
fn extract_label(overview: &Map<String, Value>) -> Option<String> {
    let name = overview.get("name");
    name.and_then(|n| n.get("label"))
        .and_then(Value::as_str)
        .or_else(|| {
            name.and_then(|n| n.get("data"))
                .and_then(|d| d.get("label"))
                .and_then(Value::as_str)
        })
        .or_else(|| overview.get("label").and_then(Value::as_str))
        .map(str::to_string)
}

/// Pull a description out of a normalized overview.
fn extract_description(overview: &Map<String, Value>) -> Option<String> {
    overview
        .get("description")
        .and_then(|v| v.get("data"))
        .and_then(Value::as_str)
        .or_else(|| {
            overview
                .get("concise_description")
                .and_then(|v| v.get("data"))
                .and_then(Value::as_str)
        })
        .or_else(|| overview.get("description").and_then(Value::as_str))
        .or_else(|| overview.get("concise_description").and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infers_types_from_documented_prefixes() {
        assert_eq!(infer_type_from_id("WBGene00006763"), Some("gene"));
        assert_eq!(infer_type_from_id("WBProtein000123"), Some("protein"));
        assert_eq!(infer_type_from_id("CE12345"), Some("protein"));
        assert_eq!(infer_type_from_id("WBVar00143949"), Some("variation"));
        assert_eq!(infer_type_from_id("WBStrain00000001"), Some("strain"));
        assert_eq!(infer_type_from_id("WBPhenotype:0000643"), Some("phenotype"));
        assert_eq!(infer_type_from_id("WBTransgene00000123"), Some("transgene"));
        assert_eq!(infer_type_from_id("WBRNAi00000456"), Some("rnai"));
        assert_eq!(infer_type_from_id("WBPaper00000001"), Some("paper"));
        assert_eq!(infer_type_from_id("WBPerson77"), Some("person"));
        assert_eq!(infer_type_from_id("DOID:0050177"), Some("disease"));
        assert_eq!(infer_type_from_id("GO:0000001"), Some("go_term"));
    }

    #[test]
    fn unknown_prefixes_do_not_infer() {
        assert_eq!(infer_type_from_id("daf-2"), None);
        assert_eq!(infer_type_from_id("genes involved in longevity"), None);
        assert_eq!(infer_type_from_id(""), None);
    }

    #[test]
    fn id_shapes_are_recognized() {
        assert!(looks_like_id("WBGene00006763"));
        assert!(looks_like_id("WBPhenotype:0000643"));
        assert!(looks_like_id("DOID:0050177"));
        assert!(looks_like_id("GO:0000001"));
        assert!(looks_like_id("CE12345"));
        assert!(looks_like_id("CB1370"));

        assert!(!looks_like_id("daf-2"));
        assert!(!looks_like_id("unc-13"));
        assert!(!looks_like_id("genes involved in longevity"));
        assert!(!looks_like_id("WBGene"));
    }

    #[test]
    fn parses_hits_across_list_key_variants() {
        for key in ["hits", "results", "matches"] {
            let response = json!({
                key: [
                    { "id": "WBGene1", "label": "daf-2", "class": "gene" },
                    { "name": { "id": "WBGene2", "label": "unc-13" }, "type": "gene" }
                ]
            });
            let results = parse_search_results(&response, 10);
            assert_eq!(results.len(), 2, "list key {key}");
            assert_eq!(results[0].id, "WBGene1");
            assert_eq!(results[1].id, "WBGene2");
            assert_eq!(results[1].label, "unc-13");
            assert_eq!(results[1].class, "gene");
        }
    }

    #[test]
    fn truncates_to_limit_and_tolerates_sparse_hits() {
        let response = json!({
            "hits": [
                { "wbid": "X1", "name": "first", "category": "gene", "species": "c_elegans" },
                { "summary": "only a summary" },
                { "id": "X3" }
            ]
        });
        let results = parse_search_results(&response, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "X1");
        assert_eq!(results[0].label, "first");
        assert_eq!(results[0].class, "gene");
        assert_eq!(results[0].taxonomy.as_deref(), Some("c_elegans"));
        assert_eq!(results[1].id, "");
        assert_eq!(results[1].description.as_deref(), Some("only a summary"));
    }

    #[test]
    fn no_recognizable_list_means_no_results() {
        assert!(parse_search_results(&json!({ "count": 3 }), 10).is_empty());
        assert!(parse_search_results(&json!(null), 10).is_empty());
    }

    #[test]
    fn label_extraction_follows_the_fallback_chain() {
        let nested = clean_widget_data(&json!({
            "fields": { "name": { "data": { "id": "G", "label": "daf-2", "class": "gene" } } }
        }));
        assert_eq!(extract_label(&nested).as_deref(), Some("daf-2"));

        let flat: Map<String, Value> =
            serde_json::from_value(json!({ "label": "bare" })).unwrap();
        assert_eq!(extract_label(&flat).as_deref(), Some("bare"));

        let none: Map<String, Value> = serde_json::from_value(json!({ "status": "live" })).unwrap();
        assert_eq!(extract_label(&none), None);
    }

    #[test]
    fn description_extraction_prefers_wrapped_data() {
        let overview: Map<String, Value> = serde_json::from_value(json!({
            "description": { "data": "wrapped" },
            "concise_description": "flat"
        }))
        .unwrap();
        assert_eq!(extract_description(&overview).as_deref(), Some("wrapped"));

        let concise: Map<String, Value> =
            serde_json::from_value(json!({ "concise_description": "short" })).unwrap();
        assert_eq!(extract_description(&concise).as_deref(), Some("short"));
    }
}
