use crate::types::{DeviationSummary, FitTest, HweResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Degrees of freedom for the biallelic HWE test: 3 classes - 1 - 1 estimated allele frequency
pub const HWE_DEGREES_OF_FREEDOM: f64 = 1.0;

/// Upper-tail probability P(X >= stat) for X ~ χ²(1).
pub fn chi_square_p_value(stat: f64) -> f64 {
    if !(stat > 0.0) {
        return 1.0;
    }
    if stat.is_infinite() {
        return 0.0;
    }
    match ChiSquared::new(HWE_DEGREES_OF_FREEDOM) {
        Ok(dist) => dist.sf(stat).clamp(0.0, 1.0),
        Err(e) => {
            log::error!("Failed to build chi-square distribution: {}", e);
            1.0
        }
    }
}

/// Turn a chi-square statistic into a p-value and deviation call at level `alpha`.
pub fn fit_test(chi_square: f64, alpha: f64) -> FitTest {
    let p_value = chi_square_p_value(chi_square);
    FitTest {
        chi_square,
        p_value,
        deviates: p_value < alpha,
    }
}

/// Count deviating variants. Records without a defined test are tallied
/// separately and never contribute to `deviating` or `tested`.
pub fn summarize(results: &[HweResult]) -> DeviationSummary {
    let mut summary = DeviationSummary {
        total: results.len(),
        ..Default::default()
    };

    for r in results {
        match r.test {
            Some(t) => {
                summary.tested += 1;
                if t.deviates {
                    summary.deviating += 1;
                }
            }
            None => summary.not_applicable += 1,
        }
        if !r.counts_consistent {
            summary.inconsistent += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::statistics::annotate_all;
    use crate::types::VariantRecord;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_quantiles() {
        // 3.841 is the 95th percentile of χ²(1)
        assert_relative_eq!(chi_square_p_value(3.841459), 0.05, epsilon = 1e-5);
        assert_relative_eq!(chi_square_p_value(6.634897), 0.01, epsilon = 1e-5);
        assert_relative_eq!(chi_square_p_value(0.893), 0.345, epsilon = 0.002);
    }

    #[test]
    fn test_zero_statistic() {
        assert_eq!(chi_square_p_value(0.0), 1.0);
    }

    #[test]
    fn test_p_values_monotonic_with_chi_square() {
        let stats = [0.0, 0.01, 0.5, 1.0, 3.84, 10.0, 50.0, 200.0];
        let p_vals: Vec<f64> = stats.iter().map(|&s| chi_square_p_value(s)).collect();

        for i in 1..p_vals.len() {
            assert!(p_vals[i] <= p_vals[i - 1], "p-values should not increase with chi-square");
        }
        for p in &p_vals {
            assert!(*p >= 0.0 && *p <= 1.0, "p-value out of range: {}", p);
        }
    }

    #[test]
    fn test_fit_test_threshold() {
        assert!(fit_test(3.9, 0.05).deviates);
        assert!(!fit_test(3.8, 0.05).deviates);
        assert!(!fit_test(3.9, 0.01).deviates);
    }

    #[test]
    fn test_summarize_excludes_not_applicable() {
        let records = vec![
            VariantRecord::new("rs1", 50, 50, 8),  // in equilibrium
            VariantRecord::new("rs2", 0, 108, 0),  // heterozygote excess
            VariantRecord::new("rs3", 108, 0, 0),  // monomorphic
            VariantRecord::new("rs4", 40, 40, 40), // counts sum to 120
        ];
        let results = annotate_all(&records, &EngineConfig::default());
        let summary = summarize(&results);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.not_applicable, 1);
        assert_eq!(summary.tested, 3);
        assert_eq!(summary.inconsistent, 1);
        assert_eq!(
            summary.deviating,
            results.iter().filter(|r| r.deviates()).count()
        );
        assert!(summary.deviating >= 1);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), DeviationSummary::default());
    }
}
