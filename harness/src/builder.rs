//! Fixture builder: the graph loader's stand-in.
//!
//! Turns a declarative node/edge spec into the core's inputs: compact
//! adjacency with reverse images, per-relation degree descriptors, and
//! the subject set. Relation IDs are assigned by lexicographic order over
//! relation names, matching the rank assignment the driver derives from
//! the descriptors.
//!
//! Subject detection lives here, not in the core: the driver takes
//! `subjects` as given.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use veil_kernel::feature::RawNodeV1;
use veil_kernel::graph::{CompactGraphV1, EdgeDirV1, EdgeTripleV1, GraphError};

/// How subjects are identified among the fixture's nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRuleV1 {
    /// The identifier contains the needle, case-insensitively.
    UriContains(String),
    /// Some concept label contains the needle (case-sensitive).
    ConceptContains(String),
}

/// One fixture node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpecV1 {
    pub identifier: String,
    pub concepts: Vec<String>,
}

/// One directed labeled fixture edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpecV1 {
    pub source: String,
    pub relation: String,
    pub target: String,
}

/// A complete fixture specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSpecV1 {
    pub nodes: Vec<NodeSpecV1>,
    pub edges: Vec<EdgeSpecV1>,
    pub subject_rule: SubjectRuleV1,
}

/// Shorthand for world definitions.
#[must_use]
pub fn node(identifier: &str, concepts: &[&str]) -> NodeSpecV1 {
    NodeSpecV1 {
        identifier: identifier.to_string(),
        concepts: concepts.iter().map(|c| (*c).to_string()).collect(),
    }
}

/// Shorthand for world definitions.
#[must_use]
pub fn edge(source: &str, relation: &str, target: &str) -> EdgeSpecV1 {
    EdgeSpecV1 {
        source: source.to_string(),
        relation: relation.to_string(),
        target: target.to_string(),
    }
}

/// Typed failure for fixture construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two nodes share an identifier.
    DuplicateIdentifier { identifier: String },
    /// An edge references an undeclared node.
    UnknownEndpoint { identifier: String },
    /// The assembled tables were rejected by the graph constructor.
    Graph(GraphError),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateIdentifier { identifier } => {
                write!(f, "duplicate node identifier: {identifier:?}")
            }
            Self::UnknownEndpoint { identifier } => {
                write!(f, "edge references undeclared node: {identifier:?}")
            }
            Self::Graph(e) => write!(f, "graph construction failed: {e}"),
        }
    }
}

impl std::error::Error for BuildError {}

/// The core inputs produced from a fixture spec.
#[derive(Debug, Clone)]
pub struct BuiltGraphV1 {
    pub graph: CompactGraphV1,
    pub raw: Vec<RawNodeV1>,
    pub subjects: BTreeSet<u32>,
}

/// Assemble core inputs from a fixture spec.
///
/// Node indices follow declaration order. Every edge lands twice in the
/// adjacency: `(Outgoing, rel, target)` at the source and
/// `(Incoming, rel, source)` at the target.
///
/// # Errors
///
/// Returns a [`BuildError`] for duplicate identifiers or edges naming
/// undeclared nodes.
pub fn build_graph(spec: &GraphSpecV1) -> Result<BuiltGraphV1, BuildError> {
    let mut index_of: HashMap<&str, u32> = HashMap::with_capacity(spec.nodes.len());
    for (idx, n) in spec.nodes.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let idx = idx as u32;
        if index_of.insert(n.identifier.as_str(), idx).is_some() {
            return Err(BuildError::DuplicateIdentifier {
                identifier: n.identifier.clone(),
            });
        }
    }
    let resolve = |identifier: &str| {
        index_of
            .get(identifier)
            .copied()
            .ok_or_else(|| BuildError::UnknownEndpoint {
                identifier: identifier.to_string(),
            })
    };

    // Relation IDs: 1-based, lexicographic over the names in use.
    let relation_names: BTreeSet<&str> =
        spec.edges.iter().map(|e| e.relation.as_str()).collect();
    let relation_ids: BTreeMap<&str, u32> = relation_names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = i as u32 + 1;
            (name, id)
        })
        .collect();

    let mut adj: Vec<Vec<EdgeTripleV1>> = vec![Vec::new(); spec.nodes.len()];
    // Per-node, per-relation (out, in) degree counts, keyed by name so
    // descriptors come out sorted.
    let mut degrees: Vec<BTreeMap<&str, (u64, u64)>> = vec![BTreeMap::new(); spec.nodes.len()];
    for e in &spec.edges {
        let s = resolve(&e.source)?;
        let t = resolve(&e.target)?;
        let relation = relation_ids[e.relation.as_str()];
        adj[s as usize].push(EdgeTripleV1 {
            dir: EdgeDirV1::Outgoing,
            relation,
            neighbor: t,
        });
        adj[t as usize].push(EdgeTripleV1 {
            dir: EdgeDirV1::Incoming,
            relation,
            neighbor: s,
        });
        degrees[s as usize].entry(e.relation.as_str()).or_insert((0, 0)).0 += 1;
        degrees[t as usize].entry(e.relation.as_str()).or_insert((0, 0)).1 += 1;
    }

    let mut raw = Vec::with_capacity(spec.nodes.len());
    let mut subjects = BTreeSet::new();
    for (idx, n) in spec.nodes.iter().enumerate() {
        let concepts: BTreeSet<String> = n.concepts.iter().cloned().collect();
        let relations = degrees[idx]
            .iter()
            .map(|(name, (out, inn))| format!("{name}:{out},{inn}"))
            .collect();
        let is_subject = match &spec.subject_rule {
            SubjectRuleV1::UriContains(needle) => n
                .identifier
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            SubjectRuleV1::ConceptContains(needle) => {
                concepts.iter().any(|c| c.contains(needle.as_str()))
            }
        };
        if is_subject {
            #[allow(clippy::cast_possible_truncation)]
            subjects.insert(idx as u32);
        }
        raw.push(RawNodeV1 {
            identifier: n.identifier.clone(),
            concepts,
            relations,
        });
    }

    let identifiers = spec.nodes.iter().map(|n| n.identifier.clone()).collect();
    let graph = CompactGraphV1::new(adj, identifiers).map_err(BuildError::Graph)?;
    Ok(BuiltGraphV1 {
        graph,
        raw,
        subjects,
    })
}
