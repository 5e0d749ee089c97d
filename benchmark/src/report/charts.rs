//! @ai:module:intent Chart generation for benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::metrics::BenchmarkResults;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts from results
    fn generate_all(&self, results: &BenchmarkResults, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates charts from benchmark results
pub struct ChartGenerator;

/// Colours per variant, in run order.
const VARIANT_COLORS: [RGBColor; 2] = [BLUE, GREEN];

/// x-axis units per bar, so whiskers can sit at the bar centre.
const BAR_SLOT: i32 = 10;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Upper bound of a seconds axis with headroom
    /// @ai:effects pure
    fn axis_limit<I: Iterator<Item = f64>>(values: I) -> f64 {
        let max = values.fold(0.0f64, f64::max);

        if max > 0.0 {
            max * 1.2
        } else {
            1.0
        }
    }

    /// @ai:intent Centre x and clamped y range of the error bar over bar `index`
    /// @ai:example (1, 2.0, 0.5) -> (15, 1.5, 2.5)
    /// @ai:effects pure
    fn whisker(index: usize, mean: f64, stdev: f64) -> (i32, f64, f64) {
        let centre = index as i32 * BAR_SLOT + BAR_SLOT / 2;
        (centre, (mean - stdev).max(0.0), mean + stdev)
    }

    /// @ai:intent Generate import time bar chart, one bar per variant
    /// @ai:effects fs:write
    fn generate_import_time_chart(
        &self,
        results: &BenchmarkResults,
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let data: Vec<_> = results
            .variants
            .iter()
            .map(|v| {
                (
                    v.variant.as_str(),
                    v.timing.geometric_mean_secs,
                    v.timing.stdev_secs,
                )
            })
            .collect();

        let y_max = Self::axis_limit(data.iter().map(|(_, mean, stdev)| mean + stdev));

        let mut chart = ChartBuilder::on(&root)
            .caption("Import Time by Variant", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..data.len() as i32 * BAR_SLOT, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_labels(data.len())
            .y_desc("Geometric mean (s)")
            .x_label_formatter(&|x| {
                data.get((*x / BAR_SLOT) as usize)
                    .map(|(name, _, _)| name.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, mean, _))| {
            let color = VARIANT_COLORS[i % VARIANT_COLORS.len()];
            let left = i as i32 * BAR_SLOT;
            Rectangle::new(
                [(left + 1, 0.0), (left + BAR_SLOT - 1, *mean)],
                color.mix(0.7).filled(),
            )
        }))?;

        // mean ± stdev whisker with caps
        chart.draw_series(data.iter().enumerate().flat_map(|(i, (_, mean, stdev))| {
            let (centre, low, high) = Self::whisker(i, *mean, *stdev);
            [
                PathElement::new(vec![(centre, low), (centre, high)], BLACK.stroke_width(2)),
                PathElement::new(vec![(centre - 1, low), (centre + 1, low)], BLACK.stroke_width(2)),
                PathElement::new(vec![(centre - 1, high), (centre + 1, high)], BLACK.stroke_width(2)),
            ]
        }))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Generate per-trial timing line chart, one line per variant
    /// @ai:effects fs:write
    fn generate_trials_chart(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let trials = results
            .variants
            .iter()
            .map(|v| v.trials_secs.len())
            .max()
            .unwrap_or(0)
            .max(1);
        let y_max = Self::axis_limit(
            results
                .variants
                .iter()
                .flat_map(|v| v.trials_secs.iter().copied()),
        );

        let mut chart = ChartBuilder::on(&root)
            .caption("Import Time per Trial", ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..trials as i32, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Trial")
            .y_desc("Elapsed (s)")
            .draw()?;

        for (i, variant) in results.variants.iter().enumerate() {
            let color = VARIANT_COLORS[i % VARIANT_COLORS.len()];
            let points = variant
                .trials_secs
                .iter()
                .enumerate()
                .map(|(trial, secs)| (trial as i32, *secs));

            chart
                .draw_series(LineSeries::new(points, color))?
                .label(variant.variant.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts
    /// @ai:effects fs:write
    fn generate_all(&self, results: &BenchmarkResults, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        let import_path = output_dir.join("import_times.png");
        self.generate_import_time_chart(results, &import_path)?;
        generated.push("import_times.png".to_string());

        let trials_path = output_dir.join("trials.png");
        self.generate_trials_chart(results, &trials_path)?;
        generated.push("trials.png".to_string());

        Ok(generated)
    }
}
