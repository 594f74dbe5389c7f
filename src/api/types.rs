//! Request and response bodies for the genomics search endpoints.
//!
//! Only the fields we ask for via field masks are modelled here.
//! The API encodes 64-bit integers as JSON strings, so those go through `int64`.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchReadGroupSetsRequest {
    pub dataset_ids: Vec<String>,
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchReadGroupSetsResponse {
    #[serde(default)]
    pub read_group_sets: Vec<ReadGroupSet>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReadGroupSet {
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchReadsRequest {
    pub read_group_set_ids: Vec<String>,
    pub reference_name: String,
    #[serde(with = "int64")]
    pub start: i64,
    #[serde(with = "int64")]
    pub end: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchReadsResponse {
    #[serde(default)]
    pub alignments: Vec<Read>,
}

/// A single read, possibly aligned against the reference.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Read {
    pub alignment: Option<LinearAlignment>,
    #[serde(default)]
    pub aligned_sequence: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinearAlignment {
    pub position: Option<Position>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// 0-based offset on the reference.
    #[serde(default, with = "int64")]
    pub position: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCallSetsRequest {
    pub variant_set_ids: Vec<String>,
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchCallSetsResponse {
    #[serde(default)]
    pub call_sets: Vec<CallSet>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallSet {
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantsRequest {
    pub call_set_ids: Vec<String>,
    pub reference_name: String,
    #[serde(with = "int64")]
    pub start: i64,
    #[serde(with = "int64")]
    pub end: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchVariantsResponse {
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub reference_bases: String,
    #[serde(default)]
    pub alternate_bases: Vec<String>,
    #[serde(default)]
    pub calls: Vec<VariantCall>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VariantCall {
    /// Indices into the variant's alleles: 0 is the reference, `n` the n-th alternate.
    #[serde(default)]
    pub genotype: Vec<i64>,
}

/// Google-style int64 encoding: written as a string, accepted as a string or number.
mod int64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Encoded::deserialize(deserializer)? {
            Encoded::Number(value) => Ok(value),
            Encoded::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}
