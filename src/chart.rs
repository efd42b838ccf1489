//! PNG equity chart: strategy vs. buy-and-hold of each leg.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::prelude::*;

use crate::backtest::report::BacktestReport;

const STRATEGY_COLOR: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
const GOLD: RGBColor = RGBColor(0xff, 0xd7, 0x00);
const SILVER: RGBColor = RGBColor(0xc0, 0xc0, 0xc0);

pub fn render_equity_chart(report: &BacktestReport, path: &Path) -> Result<()> {
    let (Some(first), Some(last)) = (report.rows.first(), report.rows.last()) else {
        return Ok(());
    };

    let (y_min, y_max) = report.rows.iter().fold(
        (report.initial_capital, report.initial_capital),
        |(lo, hi), r| {
            let row_lo = r.equity.min(r.benchmark_a).min(r.benchmark_b);
            let row_hi = r.equity.max(r.benchmark_a).max(r.benchmark_b);
            (lo.min(row_lo), hi.max(row_hi))
        },
    );
    let pad = (y_max - y_min).abs().max(1.0) * 0.05;
    let x_end = if last.date > first.date {
        last.date
    } else {
        first.date.succ_opt().unwrap_or(first.date)
    };

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "{} / {} switcher, {} to {}",
                report.label_a, report.label_b, first.date, last.date
            ),
            ("sans-serif", 22),
        )
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(72)
        .build_cartesian_2d(first.date..x_end, (y_min - pad)..(y_max + pad))
        .map_err(|e| anyhow!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Account Balance")
        .draw()
        .map_err(|e| anyhow!("{e}"))?;

    chart
        .draw_series(LineSeries::new(
            report.rows.iter().map(|r| (r.date, r.equity)),
            STRATEGY_COLOR.stroke_width(2),
        ))
        .map_err(|e| anyhow!("{e}"))?
        .label("Switcher Strategy")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], STRATEGY_COLOR));

    chart
        .draw_series(LineSeries::new(
            report.rows.iter().map(|r| (r.date, r.benchmark_a)),
            GOLD,
        ))
        .map_err(|e| anyhow!("{e}"))?
        .label(format!("Buy & Hold {}", report.label_a))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GOLD));

    chart
        .draw_series(LineSeries::new(
            report.rows.iter().map(|r| (r.date, r.benchmark_b)),
            SILVER,
        ))
        .map_err(|e| anyhow!("{e}"))?
        .label(format!("Buy & Hold {}", report.label_b))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SILVER));

    chart
        .draw_series(LineSeries::new(
            [
                (first.date, report.initial_capital),
                (x_end, report.initial_capital),
            ],
            BLACK.mix(0.3),
        ))
        .map_err(|e| anyhow!("{e}"))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("{e}"))?;

    root.present()
        .map_err(|e| anyhow!("failed to write chart to {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "Equity chart written");
    Ok(())
}
