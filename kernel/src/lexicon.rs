//! `LexiconV1`: stable numeric IDs for concept labels and relation names.
//!
//! Concept IDs and relation ranks are positive integers assigned by
//! lexicographic order over the union of names seen in the raw features.
//! `BTreeMap` keeps the assignment order-independent of input order.

use std::collections::BTreeMap;

use crate::feature::{
    parse_relation_descriptor, FeatureError, FeatureRecordV1, NodeTypeV1, RawNodeV1,
    RelationDegreesV1,
};

/// Frozen name → ID tables for one graph.
#[derive(Debug, Clone)]
pub struct LexiconV1 {
    concepts: BTreeMap<String, u64>,
    relations: BTreeMap<String, u64>,
}

impl LexiconV1 {
    /// Collect every concept label and relation name across the raw
    /// features and assign 1-based ranks in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::MalformedRelationDescriptor`] when a
    /// relation descriptor does not parse.
    pub fn build(raw: &[RawNodeV1]) -> Result<Self, FeatureError> {
        let mut concepts: BTreeMap<String, u64> = BTreeMap::new();
        let mut relations: BTreeMap<String, u64> = BTreeMap::new();
        for node in raw {
            for c in &node.concepts {
                concepts.entry(c.clone()).or_insert(0);
            }
            for entry in &node.relations {
                let (name, _, _) = parse_relation_descriptor(entry)?;
                relations.entry(name.to_string()).or_insert(0);
            }
        }
        for (rank, id) in concepts.values_mut().enumerate() {
            *id = rank as u64 + 1;
        }
        for (rank, id) in relations.values_mut().enumerate() {
            *id = rank as u64 + 1;
        }
        Ok(Self {
            concepts,
            relations,
        })
    }

    /// The ID of a concept label, if known.
    #[must_use]
    pub fn concept_id(&self, name: &str) -> Option<u64> {
        self.concepts.get(name).copied()
    }

    /// The rank of a relation name, if known.
    #[must_use]
    pub fn relation_rank(&self, name: &str) -> Option<u64> {
        self.relations.get(name).copied()
    }

    /// Number of distinct concept labels.
    #[must_use]
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Number of distinct relation names.
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Materialize one numeric feature record per raw node, all typed
    /// [`NodeTypeV1::Blank`], buffers built.
    ///
    /// Concepts arrive as a sorted set of names, so their IDs come out
    /// ascending. Relation descriptors must already be sorted by name
    /// (the loader contract), so their ranks come out ascending too; a
    /// violation surfaces as an ordering error from the record
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns a [`FeatureError`] for unparseable descriptors, names
    /// missing from this lexicon, or ordering violations.
    pub fn materialize(&self, raw: &[RawNodeV1]) -> Result<Vec<FeatureRecordV1>, FeatureError> {
        let mut records = Vec::with_capacity(raw.len());
        for node in raw {
            let mut concepts = Vec::with_capacity(node.concepts.len());
            for name in &node.concepts {
                let id = self
                    .concept_id(name)
                    .ok_or_else(|| FeatureError::UnknownName { name: name.clone() })?;
                concepts.push(id);
            }
            let mut relations = Vec::with_capacity(node.relations.len());
            for entry in &node.relations {
                let (name, outgoing, incoming) = parse_relation_descriptor(entry)?;
                let rank = self
                    .relation_rank(name)
                    .ok_or_else(|| FeatureError::UnknownName {
                        name: name.to_string(),
                    })?;
                relations.push(RelationDegreesV1 {
                    rank,
                    outgoing,
                    incoming,
                });
            }
            records.push(FeatureRecordV1::new(NodeTypeV1::Blank, concepts, relations)?);
        }
        Ok(records)
    }
}
