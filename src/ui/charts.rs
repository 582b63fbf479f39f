use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::view::{BarChartData, PieChartData};
use crate::state::DerivedViews;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart row (central panel)
// ---------------------------------------------------------------------------

/// Range bars on the left, eligibility split on the right.
pub fn chart_row(ui: &mut Ui, views: &DerivedViews) {
    ui.columns(2, |cols| {
        cols[0].strong("Electric range");
        range_plot(&mut cols[0], &views.range_chart);
        cols[1].strong("CAFV eligibility");
        eligibility_plot(&mut cols[1], &views.eligibility_chart);
    });
}

fn range_plot(ui: &mut Ui, data: &BarChartData) {
    Plot::new("range_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Miles")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for dataset in &data.datasets {
                let bars: Vec<Bar> = dataset
                    .values
                    .iter()
                    .zip(&data.labels)
                    .enumerate()
                    .map(|(i, (&value, label))| Bar::new(i as f64, value).name(label).width(0.8))
                    .collect();

                let chart = BarChart::new(bars)
                    .color(Color32::from(dataset.styling.color))
                    .name(&dataset.label);
                plot_ui.bar_chart(chart);
            }
        });
}

fn eligibility_plot(ui: &mut Ui, data: &PieChartData) {
    let total: usize = data.values.iter().sum();

    Plot::new("eligibility_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Vehicles")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, ((label, &value), &color)) in data
                .labels
                .iter()
                .zip(&data.values)
                .zip(&data.colors)
                .enumerate()
            {
                let share = if total == 0 {
                    0.0
                } else {
                    value as f64 * 100.0 / total as f64
                };
                let bar = Bar::new(i as f64, value as f64)
                    .name(format!("{label}: {value} ({share:.1}%)"))
                    .width(0.6);
                let chart = BarChart::new(vec![bar])
                    .color(Color32::from(color))
                    .name(label);
                plot_ui.bar_chart(chart);
            }
        });
}
