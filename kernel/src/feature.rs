//! `FeatureRecordV1`: per-node features and their canonical byte buffer.
//!
//! # Buffer layout
//!
//! All words are `u64` little-endian:
//!
//! ```text
//! [ t         ]            node type code (0 = blank, 1 = constant)
//! [ |c|       ]            concept count
//! [ |r|       ]            relation count
//! [ c[0..|c|] ]            concept IDs, ascending
//! [ r[0..|r|] ]            (relation_rank, out_degree, in_degree) triples,
//!                          ascending by relation_rank
//! ```
//!
//! Equal `(t, c, r)` produce equal buffers produce equal initial colors.
//!
//! # Derived-cache invariant
//!
//! The buffer is a cache over `(t, c, r)`. Every writer of those fields is
//! a method of this type and rebuilds the buffer before returning; the
//! fields are private so the invariant cannot be bypassed.

use std::collections::BTreeSet;

/// Node type code. Only this field distinguishes a blank from a constant
/// in the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeTypeV1 {
    /// Anonymized node.
    Blank = 0,
    /// Named node.
    Constant = 1,
}

impl NodeTypeV1 {
    /// The code word written into the canonical buffer.
    #[must_use]
    pub const fn to_code(self) -> u64 {
        self as u64
    }

    /// Convert from a code word. Returns `None` for unrecognized values.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Blank),
            1 => Some(Self::Constant),
            _ => None,
        }
    }
}

/// Per-relation degree triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RelationDegreesV1 {
    /// Stable positive rank of the relation name (lexicographic).
    pub rank: u64,
    /// Outgoing edges of this relation at the node.
    pub outgoing: u64,
    /// Incoming edges of this relation at the node.
    pub incoming: u64,
}

/// Typed failure for feature construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// Concept IDs were not strictly ascending.
    UnorderedConcepts { position: usize },
    /// Relation triples were not strictly ascending by rank.
    UnorderedRelations { position: usize },
    /// A raw relation descriptor was not `"relname:out,in"`.
    MalformedRelationDescriptor { entry: String },
    /// A concept or relation name was missing from the lexicon.
    UnknownName { name: String },
}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnorderedConcepts { position } => {
                write!(f, "concept IDs not strictly ascending at position {position}")
            }
            Self::UnorderedRelations { position } => {
                write!(f, "relation triples not strictly ascending at position {position}")
            }
            Self::MalformedRelationDescriptor { entry } => {
                write!(f, "malformed relation descriptor: {entry:?}")
            }
            Self::UnknownName { name } => write!(f, "name not in lexicon: {name:?}"),
        }
    }
}

impl std::error::Error for FeatureError {}

/// Raw per-node features as supplied by the graph loader.
///
/// `relations` entries are `"relname:out,in"`, sorted lexicographically by
/// relation name. Relation names may themselves contain `:` (IRIs), so the
/// descriptor splits on the rightmost `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNodeV1 {
    /// External node identifier (URI).
    pub identifier: String,
    /// Concept labels attached to the node.
    pub concepts: BTreeSet<String>,
    /// Per-relation degree descriptors, sorted by relation name.
    pub relations: Vec<String>,
}

/// Split a `"relname:out,in"` descriptor into `(name, out, in)`.
///
/// # Errors
///
/// Returns [`FeatureError::MalformedRelationDescriptor`] when the rightmost
/// `:` or the `,` is missing, or the degree counts do not parse.
pub fn parse_relation_descriptor(entry: &str) -> Result<(&str, u64, u64), FeatureError> {
    let malformed = || FeatureError::MalformedRelationDescriptor {
        entry: entry.to_string(),
    };
    let (name, degrees) = entry.rsplit_once(':').ok_or_else(malformed)?;
    let (out_s, in_s) = degrees.split_once(',').ok_or_else(malformed)?;
    let outgoing: u64 = out_s.parse().map_err(|_| malformed())?;
    let incoming: u64 = in_s.parse().map_err(|_| malformed())?;
    if name.is_empty() {
        return Err(malformed());
    }
    Ok((name, outgoing, incoming))
}

/// A node's numeric features plus the canonical buffer derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecordV1 {
    node_type: NodeTypeV1,
    concepts: Vec<u64>,
    relations: Vec<RelationDegreesV1>,
    buffer: Vec<u8>,
}

impl FeatureRecordV1 {
    /// Build a record and its buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::UnorderedConcepts`] /
    /// [`FeatureError::UnorderedRelations`] when the inputs violate the
    /// canonical orderings.
    pub fn new(
        node_type: NodeTypeV1,
        concepts: Vec<u64>,
        relations: Vec<RelationDegreesV1>,
    ) -> Result<Self, FeatureError> {
        if let Some(position) = first_unordered(&concepts) {
            return Err(FeatureError::UnorderedConcepts { position });
        }
        if let Some(position) = first_unordered_by_rank(&relations) {
            return Err(FeatureError::UnorderedRelations { position });
        }
        let mut record = Self {
            node_type,
            concepts,
            relations,
            buffer: Vec::new(),
        };
        record.rebuild_buffer();
        Ok(record)
    }

    /// The node type.
    #[must_use]
    pub const fn node_type(&self) -> NodeTypeV1 {
        self.node_type
    }

    /// Concept IDs, ascending.
    #[must_use]
    pub fn concepts(&self) -> &[u64] {
        &self.concepts
    }

    /// Per-relation degree triples, ascending by rank.
    #[must_use]
    pub fn relations(&self) -> &[RelationDegreesV1] {
        &self.relations
    }

    /// The canonical buffer. Always consistent with `(t, c, r)`.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Set the node type and refresh the buffer.
    pub fn set_node_type(&mut self, node_type: NodeTypeV1) {
        self.node_type = node_type;
        self.rebuild_buffer();
    }

    /// A private copy with a different node type. This is how verification
    /// trials flip a candidate without touching shared records.
    #[must_use]
    pub fn with_node_type(&self, node_type: NodeTypeV1) -> Self {
        let mut clone = self.clone();
        clone.set_node_type(node_type);
        clone
    }

    fn rebuild_buffer(&mut self) {
        let words = 3 + self.concepts.len() + 3 * self.relations.len();
        let mut buf = Vec::with_capacity(words * 8);
        push_word(&mut buf, self.node_type.to_code());
        push_word(&mut buf, self.concepts.len() as u64);
        push_word(&mut buf, self.relations.len() as u64);
        for c in &self.concepts {
            push_word(&mut buf, *c);
        }
        for r in &self.relations {
            push_word(&mut buf, r.rank);
            push_word(&mut buf, r.outgoing);
            push_word(&mut buf, r.incoming);
        }
        self.buffer = buf;
    }
}

fn push_word(buf: &mut Vec<u8>, word: u64) {
    buf.extend_from_slice(&word.to_le_bytes());
}

fn first_unordered(ids: &[u64]) -> Option<usize> {
    ids.windows(2).position(|w| w[0] >= w[1]).map(|p| p + 1)
}

fn first_unordered_by_rank(relations: &[RelationDegreesV1]) -> Option<usize> {
    relations
        .windows(2)
        .position(|w| w[0].rank >= w[1].rank)
        .map(|p| p + 1)
}
