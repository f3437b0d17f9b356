mod equilibrium;

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use std::sync::Once;

use crate::types::HweResult;

static FONT_INIT: Once = Once::new();

/// Register an embedded font for the ab_glyph backend (no-op after first call).
fn ensure_fonts() {
    FONT_INIT.call_once(|| {
        let font_data: &'static [u8] =
            include_bytes!("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
        plotters::style::register_font("sans-serif", FontStyle::Normal, font_data)
            .unwrap_or_else(|_| panic!("failed to register sans-serif Normal font"));
        plotters::style::register_font("sans-serif", FontStyle::Bold, font_data)
            .unwrap_or_else(|_| panic!("failed to register sans-serif Bold font"));
    });
}

/// Output format for plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// Configuration for plot generation.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Width of a single region panel
    pub panel_width: u32,
    pub height: u32,
    pub format: PlotFormat,
    /// Maximum number of variants drawn per panel
    pub max_points: usize,
    /// Seed for the displayed subset; `None` draws a fresh subset each run
    pub seed: Option<u64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            panel_width: 800,
            height: 660,
            format: PlotFormat::Png,
            max_points: 1000,
            seed: None,
        }
    }
}

/// One genomic region shown as its own panel.
pub struct RegionPanel<'a> {
    pub label: &'a str,
    pub results: &'a [HweResult],
}

// One colour per genotype class, shared by the curve and its observed points
pub const COLOR_REF_REF: RGBColor = RGBColor(31, 119, 180);
pub const COLOR_REF_ALT: RGBColor = RGBColor(44, 160, 44);
pub const COLOR_ALT_ALT: RGBColor = RGBColor(214, 39, 40);
pub const COLOR_GRID: RGBColor = RGBColor(200, 200, 200);

/// Points per theoretical curve
const CURVE_RESOLUTION: usize = 100;

/// Draw observed vs expected genotype frequencies, one panel per region, side by side.
pub fn plot_hwe(panels: &[RegionPanel], path: &Path, config: &PlotConfig) -> Result<()> {
    ensure_fonts();
    if panels.is_empty() || panels.iter().all(|p| p.results.is_empty()) {
        anyhow::bail!("No data to plot");
    }

    let width = config.panel_width * panels.len() as u32;

    match config.format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, (width, config.height)).into_drawing_area();
            equilibrium::draw_hwe_panels(&root, panels, config)?;
            root.present()?;
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, (width, config.height)).into_drawing_area();
            equilibrium::draw_hwe_panels(&root, panels, config)?;
            root.present()?;
        }
    }

    log::info!("Plot saved to: {}", path.display());
    Ok(())
}
