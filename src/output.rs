use crate::types::{DeviationSummary, HweResult};
use anyhow::Result;
use csv::Writer;
use std::path::Path;

fn na_or(value: Option<f64>, precision: usize) -> String {
    value.map_or("NA".to_string(), |v| format!("{:.*}", precision, v))
}

pub fn write_results(results: &[HweResult], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "rsid",
        "ref.ref",
        "ref.alt",
        "alt.alt",
        "ref",
        "alt",
        "freq_refref_obs",
        "freq_refalt_obs",
        "freq_altalt_obs",
        "freq_refref_exp",
        "freq_refalt_exp",
        "freq_altalt_exp",
        "exp_refref",
        "exp_refalt",
        "exp_altalt",
        "counts_consistent",
        "chi2",
        "p_value",
        "deviates_hwe",
    ])?;

    for r in results {
        let test = r.test;
        wtr.write_record([
            &r.variant.id,
            &r.variant.hom_ref.to_string(),
            &r.variant.het.to_string(),
            &r.variant.hom_alt.to_string(),
            &format!("{:.6}", r.p_ref),
            &format!("{:.6}", r.q_alt),
            &format!("{:.6}", r.observed.ref_ref),
            &format!("{:.6}", r.observed.ref_alt),
            &format!("{:.6}", r.observed.alt_alt),
            &format!("{:.6}", r.expected.ref_ref),
            &format!("{:.6}", r.expected.ref_alt),
            &format!("{:.6}", r.expected.alt_alt),
            &format!("{:.4}", r.expected_counts.ref_ref),
            &format!("{:.4}", r.expected_counts.ref_alt),
            &format!("{:.4}", r.expected_counts.alt_alt),
            &r.counts_consistent.to_string(),
            &na_or(test.map(|t| t.chi_square), 6),
            &test.map_or("NA".to_string(), |t| format!("{:e}", t.p_value)),
            &test.map_or("NA".to_string(), |t| t.deviates.to_string()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print the head of the result table and the deviation count to stderr.
pub fn report_summary(label: &str, results: &[HweResult], summary: &DeviationSummary, alpha: f64, head: usize) {
    eprintln!();
    eprintln!("{}", "=".repeat(72));
    eprintln!("Hardy-Weinberg chi-square test: {}", label);
    eprintln!("{}", "=".repeat(72));

    if head > 0 && !results.is_empty() {
        eprintln!();
        eprintln!("{:<24} {:>12} {:>14} {:>10}", "rsid", "chi2", "p_value", "deviates");
        eprintln!("{}", "-".repeat(72));
        for r in results.iter().take(head) {
            eprintln!(
                "{:<24} {:>12} {:>14} {:>10}",
                r.variant.id,
                na_or(r.test.map(|t| t.chi_square), 4),
                r.test.map_or("NA".to_string(), |t| format!("{:.4e}", t.p_value)),
                r.test.map_or("NA".to_string(), |t| t.deviates.to_string()),
            );
        }
    }

    eprintln!();
    eprintln!(
        "SNPs deviating from HWE (p < {}): {} / {}",
        alpha, summary.deviating, summary.tested
    );
    if summary.not_applicable > 0 {
        eprintln!(
            "SNPs not tested (monomorphic or zero expected count): {} / {}",
            summary.not_applicable, summary.total
        );
    }
    if summary.inconsistent > 0 {
        eprintln!(
            "SNPs whose counts do not sum to the sample size: {} / {}",
            summary.inconsistent, summary.total
        );
    }
    eprintln!("{}", "=".repeat(72));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::statistics::annotate_all;
    use crate::types::VariantRecord;

    #[test]
    fn test_write_results_marks_not_applicable() {
        let records = vec![
            VariantRecord::new("rs1", 50, 50, 8),
            VariantRecord::new("rs2", 108, 0, 0),
        ];
        let results = annotate_all(&records, &EngineConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_results(&results, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 19);
        let chi_idx = headers.iter().position(|h| h == "chi2").unwrap();
        let dev_idx = headers.iter().position(|h| h == "deviates_hwe").unwrap();

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "rs1");
        let chi: f64 = rows[0][chi_idx].parse().unwrap();
        assert!((chi - 0.893).abs() < 0.005);
        assert_eq!(&rows[0][dev_idx], "false");
        assert_eq!(&rows[1][chi_idx], "NA");
        assert_eq!(&rows[1][dev_idx], "NA");
    }
}
