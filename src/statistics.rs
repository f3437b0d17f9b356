use crate::config::EngineConfig;
use crate::significance;
use crate::types::{GenotypeFrequencies, HweResult, VariantRecord};
use rayon::prelude::*;

/// Estimate allele frequencies by allele counting over 2N copies.
///
/// Returns `(p_ref, q_alt)` with `q_alt = 1 - p_ref`.
pub fn allele_frequencies(record: &VariantRecord, sample_size: u32) -> (f64, f64) {
    let n_alleles = 2.0 * sample_size as f64;
    let p_ref = (2.0 * record.hom_ref as f64 + record.het as f64) / n_alleles;
    (p_ref, 1.0 - p_ref)
}

/// Observed genotype frequencies: counts / N
pub fn observed_frequencies(record: &VariantRecord, sample_size: u32) -> GenotypeFrequencies {
    let n = sample_size as f64;
    GenotypeFrequencies {
        ref_ref: record.hom_ref as f64 / n,
        ref_alt: record.het as f64 / n,
        alt_alt: record.hom_alt as f64 / n,
    }
}

/// Hardy-Weinberg genotype proportions for alternate allele frequency `q`:
/// (1-q)², 2q(1-q), q²
pub fn hwe_proportions(q_alt: f64) -> GenotypeFrequencies {
    let p = 1.0 - q_alt;
    GenotypeFrequencies {
        ref_ref: p * p,
        ref_alt: 2.0 * q_alt * p,
        alt_alt: q_alt * q_alt,
    }
}

pub fn expected_counts(expected: &GenotypeFrequencies, sample_size: u32) -> GenotypeFrequencies {
    let n = sample_size as f64;
    GenotypeFrequencies {
        ref_ref: expected.ref_ref * n,
        ref_alt: expected.ref_alt * n,
        alt_alt: expected.alt_alt * n,
    }
}

/// Pearson chi-square statistic: Σ (O - E)² / E
///
/// Returns `None` if any expected count is not strictly positive, which
/// happens at monomorphic sites where a genotype class cannot occur.
pub fn chi_square(observed: &[f64; 3], expected: &[f64; 3]) -> Option<f64> {
    if expected.iter().any(|&e| !(e > 0.0)) {
        return None;
    }

    let stat: f64 = observed
        .iter()
        .zip(expected.iter())
        .map(|(&o, &e)| (o - e).powi(2) / e)
        .sum();

    if stat.is_finite() {
        Some(stat.max(0.0))
    } else {
        None
    }
}

/// Annotate a single variant with allele frequencies, HWE expectations and the fit test.
pub fn annotate(record: &VariantRecord, config: &EngineConfig) -> HweResult {
    let n = config.sample_size;
    let (p_ref, q_alt) = allele_frequencies(record, n);
    let observed = observed_frequencies(record, n);
    let expected = hwe_proportions(q_alt);
    let exp_counts = expected_counts(&expected, n);

    let observed_counts = [record.hom_ref as f64, record.het as f64, record.hom_alt as f64];
    let test = chi_square(&observed_counts, &exp_counts.as_array())
        .map(|stat| significance::fit_test(stat, config.alpha));

    if test.is_none() {
        log::debug!(
            "{}: HWE test not applicable (expected counts {:.2}/{:.2}/{:.2})",
            record.id,
            exp_counts.ref_ref,
            exp_counts.ref_alt,
            exp_counts.alt_alt
        );
    }

    HweResult {
        variant: record.clone(),
        p_ref,
        q_alt,
        observed,
        expected,
        expected_counts: exp_counts,
        counts_consistent: record.total() == n as u64,
        test,
    }
}

/// Annotate every record, preserving input order.
///
/// Records are independent, so the work is spread over the rayon pool.
pub fn annotate_all(records: &[VariantRecord], config: &EngineConfig) -> Vec<HweResult> {
    let results: Vec<HweResult> = records
        .par_iter()
        .map(|r| annotate(r, config))
        .collect();

    let inconsistent = results.iter().filter(|r| !r.counts_consistent).count();
    if inconsistent > 0 {
        log::warn!(
            "{} / {} variants have genotype counts that do not sum to N = {}; frequencies may be misleading",
            inconsistent,
            results.len(),
            config.sample_size
        );
    }

    let not_applicable = results.iter().filter(|r| r.test.is_none()).count();
    if not_applicable > 0 {
        log::warn!(
            "{} / {} variants are monomorphic or have a zero expected genotype count; HWE test marked not applicable",
            not_applicable,
            results.len()
        );
    }

    results
}

/// Theoretical HWE curves sampled at `n_points` evenly spaced values of q in [0, 1].
pub fn hwe_curve(n_points: usize) -> Vec<(f64, GenotypeFrequencies)> {
    match n_points {
        0 => Vec::new(),
        1 => vec![(0.0, hwe_proportions(0.0))],
        _ => (0..n_points)
            .map(|i| {
                let q = i as f64 / (n_points - 1) as f64;
                (q, hwe_proportions(q))
            })
            .collect(),
    }
}
