//! Looks a single sample up at a single reference position.
//!
//! Two lookups share this module: the bases the sample's reads carry at the
//! position, and the genotype called for the sample there. Each resolves the
//! sample's name to an identifier first and gives up unless that name is unique.

mod reads;
mod variants;

pub use reads::BaseCounts;
pub use variants::CalledGenotype;

use reads::count_bases;
use variants::first_called_genotype;

use crate::api::{types::*, ApiError, GenomicsApi};

/// The 1000 Genomes dataset.
pub const DEFAULT_DATASET_ID: &str = "10473108253681171589";
pub const DEFAULT_SAMPLE: &str = "NA12872";
pub const DEFAULT_REFERENCE_NAME: &str = "22";
pub const DEFAULT_REFERENCE_POSITION: i64 = 51003835;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("searching for {sample} didn't return the right number of {kind}")]
    UnexpectedCount {
        kind: &'static str,
        sample: String,
        count: usize,
    },

    #[error("no variants overlap the queried position")]
    NoVariants,

    #[error("variant has no names")]
    UnnamedVariant,

    #[error("variant has no calls")]
    NoCalls,

    #[error("genotype index {0} has no matching allele")]
    InvalidGenotype(i64),

    #[error("expected a two-allele genotype, got {0} alleles")]
    NotDiploid(usize),
}

/// Which sample to look up, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleQuery {
    pub dataset_id: String,
    pub sample: String,
    pub reference_name: String,
    /// 0-based position on the reference.
    pub position: i64,
}

impl Default for SampleQuery {
    fn default() -> Self {
        Self {
            dataset_id: DEFAULT_DATASET_ID.to_string(),
            sample: DEFAULT_SAMPLE.to_string(),
            reference_name: DEFAULT_REFERENCE_NAME.to_string(),
            position: DEFAULT_REFERENCE_POSITION,
        }
    }
}

impl SampleQuery {
    /// The single-base interval `[position, position + 1)`.
    fn interval(&self) -> (i64, i64) {
        (self.position, self.position + 1)
    }
}

/// Unwraps the only item of a search result, or reports how many there were.
fn exactly_one<T>(items: Vec<T>, kind: &'static str, sample: &str) -> Result<T, QueryError> {
    let count = items.len();
    let mut items = items.into_iter();
    match (items.next(), items.next()) {
        (Some(item), None) => Ok(item),
        _ => Err(QueryError::UnexpectedCount {
            kind,
            sample: sample.to_string(),
            count,
        }),
    }
}

/// Counts the bases the sample's reads carry at the queried position.
pub async fn lookup_bases<A>(api: &mut A, query: &SampleQuery) -> Result<BaseCounts, QueryError>
where
    A: GenomicsApi + Send,
{
    // First, find the read group set for our sample.
    let response = api
        .search_read_group_sets(&SearchReadGroupSetsRequest {
            dataset_ids: vec![query.dataset_id.clone()],
            name: query.sample.clone(),
        })
        .await?;
    let read_group_set = exactly_one(response.read_group_sets, "read group sets", &query.sample)?;
    tracing::debug!("resolved {} to read group set {}", query.sample, read_group_set.id);

    // With it, look up the reads overlapping our position.
    let (start, end) = query.interval();
    let response = api
        .search_reads(&SearchReadsRequest {
            read_group_set_ids: vec![read_group_set.id],
            reference_name: query.reference_name.clone(),
            start,
            end,
        })
        .await?;

    Ok(count_bases(&response.alignments, query.position))
}

/// Finds the genotype called for the sample at the queried position.
pub async fn lookup_genotype<A>(
    api: &mut A,
    query: &SampleQuery,
) -> Result<CalledGenotype, QueryError>
where
    A: GenomicsApi + Send,
{
    // The dataset ID doubles as the variant set ID.
    let response = api
        .search_call_sets(&SearchCallSetsRequest {
            variant_set_ids: vec![query.dataset_id.clone()],
            name: query.sample.clone(),
        })
        .await?;
    let call_set = exactly_one(response.call_sets, "call sets", &query.sample)?;
    tracing::debug!("resolved {} to call set {}", query.sample, call_set.id);

    let (start, end) = query.interval();
    let response = api
        .search_variants(&SearchVariantsRequest {
            call_set_ids: vec![call_set.id],
            reference_name: query.reference_name.clone(),
            start,
            end,
        })
        .await?;

    first_called_genotype(&response.variants)
}
