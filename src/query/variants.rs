use std::fmt;

use super::QueryError;
use crate::api::types::Variant;

/// The pair of alleles called for one sample, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genotype(pub [String; 2]);

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.0[0], self.0[1])
    }
}

/// A sample's genotype at one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalledGenotype {
    pub variant_name: String,
    pub genotype: Genotype,
}

/// Resolves a diploid call's indices against a variant's alleles.
/// Index 0 is the reference; index `n` is the n-th alternate.
pub fn resolve_genotype(variant: &Variant, indices: &[i64]) -> Result<Genotype, QueryError> {
    let &[first, second] = indices else {
        return Err(QueryError::NotDiploid(indices.len()));
    };
    Ok(Genotype([
        resolve_allele(variant, first)?,
        resolve_allele(variant, second)?,
    ]))
}

fn resolve_allele(variant: &Variant, index: i64) -> Result<String, QueryError> {
    match index {
        0 => Ok(variant.reference_bases.clone()),
        index => index
            .checked_sub(1)
            .and_then(|alternate| usize::try_from(alternate).ok())
            .and_then(|alternate| variant.alternate_bases.get(alternate))
            .cloned()
            .ok_or(QueryError::InvalidGenotype(index)),
    }
}

/// Reads the first call of the first variant, as named by its first name.
pub fn first_called_genotype(variants: &[Variant]) -> Result<CalledGenotype, QueryError> {
    let variant = variants.first().ok_or(QueryError::NoVariants)?;
    let variant_name = variant
        .names
        .first()
        .cloned()
        .ok_or(QueryError::UnnamedVariant)?;
    let call = variant.calls.first().ok_or(QueryError::NoCalls)?;

    Ok(CalledGenotype {
        variant_name,
        genotype: resolve_genotype(variant, &call.genotype)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::VariantCall;

    fn variant(genotype: Vec<i64>) -> Variant {
        Variant {
            names: vec!["rs131767".to_string()],
            reference_bases: "G".to_string(),
            alternate_bases: vec!["A".to_string()],
            calls: vec![VariantCall { genotype }],
        }
    }

    #[test]
    fn heterozygous_call_maps_reference_and_alternate() {
        let genotype = resolve_genotype(&variant(vec![]), &[0, 1]).unwrap();
        assert_eq!(genotype, Genotype(["G".to_string(), "A".to_string()]));
    }

    #[test]
    fn homozygous_alternate_call() {
        let genotype = resolve_genotype(&variant(vec![]), &[1, 1]).unwrap();
        assert_eq!(genotype, Genotype(["A".to_string(), "A".to_string()]));
    }

    #[test]
    fn second_alternate_is_one_indexed() {
        let mut variant = variant(vec![]);
        variant.alternate_bases.push("T".to_string());
        let genotype = resolve_genotype(&variant, &[2, 0]).unwrap();
        assert_eq!(genotype.to_string(), "[T G]");
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let variant = variant(vec![]);
        assert!(matches!(
            resolve_genotype(&variant, &[0, 2]),
            Err(QueryError::InvalidGenotype(2))
        ));
        // No-calls are encoded as -1.
        assert!(matches!(
            resolve_genotype(&variant, &[-1, 0]),
            Err(QueryError::InvalidGenotype(-1))
        ));
    }

    #[test]
    fn only_two_allele_calls_are_resolved() {
        let snp = variant(vec![]);
        assert!(matches!(
            resolve_genotype(&snp, &[1]),
            Err(QueryError::NotDiploid(1))
        ));
        assert!(matches!(
            resolve_genotype(&snp, &[0, 1, 1]),
            Err(QueryError::NotDiploid(3))
        ));
        assert!(matches!(
            first_called_genotype(&[snp]),
            Err(QueryError::NotDiploid(0))
        ));
    }

    #[test]
    fn first_variant_and_call_are_used() {
        let mut second = variant(vec![0, 0]);
        second.names = vec!["rs2".to_string()];
        let called = first_called_genotype(&[variant(vec![0, 1]), second]).unwrap();
        assert_eq!(called.variant_name, "rs131767");
        assert_eq!(called.genotype.to_string(), "[G A]");
    }

    #[test]
    fn missing_pieces_are_errors() {
        assert!(matches!(first_called_genotype(&[]), Err(QueryError::NoVariants)));

        let mut unnamed = variant(vec![0, 1]);
        unnamed.names.clear();
        assert!(matches!(
            first_called_genotype(&[unnamed]),
            Err(QueryError::UnnamedVariant)
        ));

        let mut uncalled = variant(vec![0, 1]);
        uncalled.calls.clear();
        assert!(matches!(
            first_called_genotype(&[uncalled]),
            Err(QueryError::NoCalls)
        ));
    }
}
