use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const SHORT_ARM: &str = "\
rsid ref.ref ref.alt alt.alt
rs1 50 50 8
rs2 0 108 0
rs3 108 0 0
rs4 25 58 25
";

const LONG_ARM: &str = "\
rsid\tref.ref\tref.alt\talt.alt
rs10\t60\t40\t8
rs11\t90\t0\t18
";

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn hwe_scan() -> Command {
    Command::cargo_bin("hwe-scan").unwrap()
}

#[test]
fn single_region_writes_results_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "short_arm.txt", SHORT_ARM);

    hwe_scan()
        .args(["--input", &input, "--output-dir"])
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("SNPs deviating from HWE (p < 0.05): 1 / 3"))
        .stderr(predicate::str::contains("not tested (monomorphic or zero expected count): 1 / 4"));

    let csv = fs::read_to_string(dir.path().join("short_arm_hwe.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("rsid,ref.ref,ref.alt,alt.alt,ref,alt"));
    assert!(lines[3].starts_with("rs3,108,0,0"));
    assert!(lines[3].ends_with("NA,NA,NA"));
}

#[test]
fn compare_two_regions() {
    let dir = tempfile::tempdir().unwrap();
    let short = write(dir.path(), "short_arm.txt", SHORT_ARM);
    let long = write(dir.path(), "long_arm.txt", LONG_ARM);

    hwe_scan()
        .args(["-i", &short, "-c", &long, "--label", "Short arm", "--compare-label", "Long arm"])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Hardy-Weinberg chi-square test: Short arm"))
        .stderr(predicate::str::contains("Hardy-Weinberg chi-square test: Long arm"));

    assert!(dir.path().join("short_arm_hwe.csv").exists());
    assert!(dir.path().join("long_arm_hwe.csv").exists());
}

#[test]
fn missing_column_fails_with_column_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bad.txt", "rsid ref.ref alt.alt\nrs1 1 2\n");

    hwe_scan()
        .args(["--input", &input, "--output-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ref.alt"));
}

#[test]
fn non_numeric_count_fails_with_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bad.txt", "rsid ref.ref ref.alt alt.alt\nrs1 50 x 8\n");

    hwe_scan()
        .args(["--input", &input, "--output-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn invalid_alpha_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "short_arm.txt", SHORT_ARM);

    hwe_scan()
        .args(["--input", &input, "--alpha", "1.5", "--output-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha"));
}

#[test]
fn missing_input_file() {
    hwe_scan()
        .args(["--input", "/nonexistent/short_arm.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[cfg(feature = "plotting")]
#[test]
fn plot_is_written_side_by_side() {
    let dir = tempfile::tempdir().unwrap();
    let short = write(dir.path(), "short_arm.txt", SHORT_ARM);
    let long = write(dir.path(), "long_arm.txt", LONG_ARM);

    hwe_scan()
        .args(["-i", &short, "-c", &long, "--plot", "--plot-format", "svg", "--seed", "1", "-q"])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success();

    let svg = dir.path().join("short_arm_vs_long_arm_hwe.svg");
    assert!(svg.exists());
    assert!(fs::metadata(svg).unwrap().len() > 0);
}
