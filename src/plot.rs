use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Text};

use crate::{
    render::{Figure, Rgb},
    RenderError, Renderer,
};

fn color32(rgb: Rgb) -> Color32 {
    let [r, g, b] = rgb.to_u8();
    Color32::from_rgb(r, g, b)
}

/// Shows figures stacked in a native window
pub struct PlotWindow {
    title: String,
    size: [f32; 2],
    plot_height: f32,
}

impl Default for PlotWindow {
    fn default() -> Self {
        PlotWindow {
            title: "Sound of You".into(),
            size: [1000.0, 1200.0],
            plot_height: 520.0,
        }
    }
}

impl Renderer for PlotWindow {
    fn render(&mut self, figures: Vec<Figure>) -> Result<(), RenderError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(self.size),
            ..Default::default()
        };
        let app = FigureApp {
            figures,
            plot_height: self.plot_height,
        };
        log::info!("opening plot window");
        eframe::run_native(&self.title, options, Box::new(|_cc| Ok(Box::new(app))))
            .map_err(|e| RenderError::Window(e.to_string()))
    }
}

struct FigureApp {
    figures: Vec<Figure>,
    plot_height: f32,
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (i, figure) in self.figures.iter().enumerate() {
                    show_figure(ui, figure, i, self.plot_height);
                    ui.add_space(12.0);
                }
            });
        });
    }
}

fn show_figure(ui: &mut Ui, figure: &Figure, id: usize, height: f32) {
    ui.heading(&figure.title);
    let mut plot = Plot::new(("figure", id))
        .height(height)
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str());
    if let Some((lo, hi)) = figure.x_limits {
        plot = plot.include_x(lo).include_x(hi);
    }
    plot.show(ui, |plot_ui| {
        for series in &figure.series {
            let line = Line::new(PlotPoints::from(series.points.clone()))
                .color(color32(series.color))
                .name(&series.label);
            plot_ui.line(line);
        }
        for annotation in &figure.annotations {
            let [x, y] = annotation.position;
            let text = RichText::new(&annotation.text).color(color32(annotation.color));
            plot_ui.text(Text::new(PlotPoint::new(x, y), text));
        }
    });
}
