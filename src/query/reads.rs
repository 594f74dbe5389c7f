use std::{collections::BTreeMap, fmt};

use crate::api::types::Read;

/// How many reads carry each base at the queried position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BaseCounts(BTreeMap<char, usize>);

impl BaseCounts {
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.0.iter().map(|(base, count)| (*base, *count))
    }
}

impl fmt::Display for BaseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (base, count) in self.iter() {
            writeln!(f, "{base}: {count}")?;
        }
        Ok(())
    }
}

/// The base this read places at `position`, if it reaches that far.
///
/// This only offsets from the alignment start; insertions, deletions and
/// clipping within the CIGAR are not taken into account.
pub fn base_at(read: &Read, position: i64) -> Option<char> {
    let start = read.alignment.as_ref()?.position.as_ref()?.position;
    let offset = usize::try_from(position.checked_sub(start)?).ok()?;
    read.aligned_sequence
        .as_bytes()
        .get(offset)
        .map(|base| char::from(*base))
}

/// Tallies the base each read carries at `position`.
pub fn count_bases(reads: &[Read], position: i64) -> BaseCounts {
    let mut counts = BTreeMap::new();
    for read in reads {
        let Some(base) = base_at(read, position) else {
            tracing::warn!("skipping read that doesn't cover position {position}");
            continue;
        };
        *counts.entry(base).or_insert(0) += 1;
    }
    BaseCounts(counts)
}
