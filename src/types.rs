/// One biallelic variant with observed genotype counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub id: String,
    pub hom_ref: u32, // ref/ref
    pub het: u32,     // ref/alt
    pub hom_alt: u32, // alt/alt
}

impl VariantRecord {
    pub fn new(id: impl Into<String>, hom_ref: u32, het: u32, hom_alt: u32) -> Self {
        Self {
            id: id.into(),
            hom_ref,
            het,
            hom_alt,
        }
    }

    /// Number of individuals with a called genotype.
    pub fn total(&self) -> u64 {
        self.hom_ref as u64 + self.het as u64 + self.hom_alt as u64
    }
}

/// A value per genotype class. Holds frequencies or (expected) counts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenotypeFrequencies {
    pub ref_ref: f64,
    pub ref_alt: f64,
    pub alt_alt: f64,
}

impl GenotypeFrequencies {
    pub fn sum(&self) -> f64 {
        self.ref_ref + self.ref_alt + self.alt_alt
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.ref_ref, self.ref_alt, self.alt_alt]
    }
}

/// Outcome of a chi-square goodness-of-fit test against HWE proportions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTest {
    pub chi_square: f64,
    pub p_value: f64,
    pub deviates: bool, // p_value < alpha
}

/// Per-variant HWE annotation
#[derive(Debug, Clone)]
pub struct HweResult {
    pub variant: VariantRecord,
    pub p_ref: f64,
    pub q_alt: f64,
    pub observed: GenotypeFrequencies,
    pub expected: GenotypeFrequencies,
    pub expected_counts: GenotypeFrequencies,
    /// false when hom_ref + het + hom_alt differs from the configured sample size
    pub counts_consistent: bool,
    /// None when the test is not applicable (an expected count is zero)
    pub test: Option<FitTest>,
}

impl HweResult {
    pub fn deviates(&self) -> bool {
        self.test.map_or(false, |t| t.deviates)
    }

    /// `(q_alt, observed frequencies)` as drawn on the equilibrium plot.
    pub fn scatter_point(&self) -> (f64, GenotypeFrequencies) {
        (self.q_alt, self.observed)
    }
}

/// Dataset-level counts of the fit test outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviationSummary {
    pub total: usize,
    pub tested: usize,
    pub not_applicable: usize,
    pub deviating: usize,
    pub inconsistent: usize,
}
