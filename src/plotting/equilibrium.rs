use anyhow::Result;
use plotters::prelude::*;

use super::{PlotConfig, RegionPanel, COLOR_ALT_ALT, COLOR_GRID, COLOR_REF_ALT, COLOR_REF_REF, CURVE_RESOLUTION};
use crate::sampling;
use crate::statistics::hwe_curve;

/// Genotype classes in `GenotypeFrequencies::as_array` order
const CLASSES: [(&str, RGBColor); 3] = [
    ("ref.ref", COLOR_REF_REF),
    ("ref.alt", COLOR_REF_ALT),
    ("alt.alt", COLOR_ALT_ALT),
];

/// Draw every region panel into `root`, split evenly left to right.
pub fn draw_hwe_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    panels: &[RegionPanel],
    config: &PlotConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (title_area, chart_area) = root.split_vertically(60);
    title_area.titled(
        "Hardy-Weinberg - observed vs expected genotype frequencies",
        ("sans-serif", 22).into_font().color(&BLACK),
    )?;

    let panel_areas = chart_area.split_evenly((1, panels.len()));
    let curve = hwe_curve(CURVE_RESOLUTION);

    for (idx, panel) in panels.iter().enumerate() {
        let shown = sampling::sample_indices(panel.results.len(), config.max_points, config.seed);

        let caption = format!("{} ({} of {} SNPs)", panel.label, shown.len(), panel.results.len());
        let mut chart = ChartBuilder::on(&panel_areas[idx])
            .caption(caption, ("sans-serif", 16).into_font().color(&BLACK))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.05f64)?;

        chart
            .configure_mesh()
            .x_desc("Allele frequency (alt)")
            .y_desc(if idx == 0 { "Genotype frequency" } else { "" })
            .x_label_style(("sans-serif", 12))
            .y_label_style(("sans-serif", 12))
            .light_line_style(COLOR_GRID.mix(0.3))
            .draw()?;

        for (k, (name, color)) in CLASSES.into_iter().enumerate() {
            chart
                .draw_series(LineSeries::new(
                    curve.iter().map(|(q, f)| (*q, f.as_array()[k])),
                    color.stroke_width(2),
                ))?
                .label(format!("{} expected", name))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        for (k, (_, color)) in CLASSES.into_iter().enumerate() {
            chart.draw_series(
                shown
                    .iter()
                    .map(|&i| panel.results[i].scatter_point())
                    .filter(|(q, _)| (0.0..=1.0).contains(q))
                    .map(|(q, obs)| Circle::new((q, obs.as_array()[k]), 2, color.mix(0.5).filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperMiddle)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 12))
            .draw()?;
    }

    Ok(())
}
