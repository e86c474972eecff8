//! SVG rendering of laid-out towers.
//!
//! The plot area is the 0–100% square of the layout engine, drawn with
//! the limit axis growing upwards. Margins around it hold the axis labels
//! and the summary lines.

use std::io::Write;

use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use mudmap_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    format::{format_axis_label, format_number_with_commas},
    geometry::{Bounds, Insets, Point, Size},
    layer::LayerElement,
};

use crate::{
    config::{LayoutConfig, StyleConfig},
    export,
    tower::Tower,
};

const DEFAULT_FONT_SIZE: f32 = 12.0;
const MAX_GRID_DIVISIONS: u32 = 100;
const FONT_FAMILY: &str = "sans-serif";

/// Space around the plot area for axis labels and the summary.
fn plot_margins() -> Insets {
    Insets::new(20.0, 30.0, 80.0, 90.0)
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Builder for [`Svg`] renderers.
///
/// # Examples
///
/// ```
/// # use mudmap::{config::AppConfig, export::svg::SvgBuilder};
/// let config = AppConfig::default();
/// let svg = SvgBuilder::new()
///     .with_style(config.style())
///     .with_layout(config.layout())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    layout: Option<&'a LayoutConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the plot size and grid configuration.
    pub fn with_layout(mut self, layout: &'a LayoutConfig) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Resolves the configuration into a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid,
    /// the plot size or font size is not a positive number, or the grid has
    /// more than 100 divisions.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let default_layout = LayoutConfig::default();
        let style = self.style.unwrap_or(&default_style);
        let layout = self.layout.unwrap_or(&default_layout);

        if !(is_positive(layout.width()) && is_positive(layout.height())) {
            return Err(export::Error::Render(format!(
                "plot size must be positive, got {}x{}",
                layout.width(),
                layout.height()
            )));
        }

        if layout.grid_divisions() > MAX_GRID_DIVISIONS {
            return Err(export::Error::Render(format!(
                "grid divisions must be at most {MAX_GRID_DIVISIONS}, got {}",
                layout.grid_divisions()
            )));
        }

        let font_size = style.font_size().unwrap_or(DEFAULT_FONT_SIZE);
        if !is_positive(font_size) {
            return Err(export::Error::Render(format!(
                "font size must be positive, got {font_size}"
            )));
        }

        let background_color = style
            .background_color()
            .map_err(export::Error::Render)?
            .unwrap_or_else(|| Color::new("white").unwrap_or_default());
        let grid_color = style
            .grid_color()
            .map_err(export::Error::Render)?
            .unwrap_or_else(|| Color::new("#d1d5db").unwrap_or_default());
        let text_color = style
            .text_color()
            .map_err(export::Error::Render)?
            .unwrap_or_default();

        let margins = plot_margins();
        let plot = Bounds::new_from_top_left(
            Point::new(margins.left(), margins.top()),
            Size::new(layout.width(), layout.height()),
        );

        Ok(Svg {
            background_color,
            grid_color,
            text_color,
            font_size,
            grid_divisions: layout.grid_divisions(),
            plot,
            canvas: plot.to_size().add_padding(margins),
        })
    }
}

/// Renders towers to SVG documents.
#[derive(Debug, Clone)]
pub struct Svg {
    background_color: Color,
    grid_color: Color,
    text_color: Color,
    font_size: f32,
    grid_divisions: u32,
    plot: Bounds,
    canvas: Size,
}

impl Svg {
    /// The plot area in document pixels.
    pub fn plot(&self) -> Bounds {
        self.plot
    }

    /// Renders the tower into a complete SVG document.
    pub fn render(&self, tower: &Tower, elements: &[LayerElement]) -> Document {
        let mut output = LayeredOutput::new();

        output.merge(self.render_background());
        output.merge(self.render_grid(tower.total_limit()));
        for element in elements {
            output.merge(self.render_element(element));
        }
        output.merge(self.render_summary(tower));

        debug!(
            elements = elements.len(),
            width = self.canvas.width(),
            height = self.canvas.height();
            "SVG document rendered"
        );

        let doc = Document::new()
            .set("width", self.canvas.width())
            .set("height", self.canvas.height())
            .set(
                "viewBox",
                (0.0, 0.0, self.canvas.width(), self.canvas.height()),
            );

        output
            .render()
            .into_iter()
            .fold(doc, |doc, node| doc.add(node))
    }

    fn render_background(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.canvas.width())
            .set("height", self.canvas.height())
            .set("fill", &self.background_color);
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        let min_point = self.plot.min_point();
        let frame = svg_element::Rectangle::new()
            .set("x", min_point.x())
            .set("y", min_point.y())
            .set("width", self.plot.width())
            .set("height", self.plot.height())
            .set("fill", "none")
            .set("stroke", &self.grid_color)
            .set("stroke-width", 1);
        output.add_to_layer(RenderLayer::Background, Box::new(frame));

        output
    }

    fn render_grid(&self, total_limit: f64) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for step in 0..=self.grid_divisions {
            let fraction = step as f32 / self.grid_divisions as f32;

            // Share axis: vertical lines, labeled below the plot
            let bottom = self.plot.point_at(fraction, 1.0);
            let top = self.plot.point_at(fraction, 0.0);
            output.add_to_layer(RenderLayer::Grid, Box::new(self.grid_line(top, bottom)));
            output.add_to_layer(
                RenderLayer::Annotation,
                Box::new(self.text(
                    Point::new(bottom.x(), bottom.y() + self.font_size * 1.5),
                    "middle",
                    &format!("{:.0}%", fraction * 100.0),
                )),
            );

            // Limit axis: horizontal lines, labeled left of the plot
            let left = self.plot.point_at(0.0, 1.0 - fraction);
            let right = self.plot.point_at(1.0, 1.0 - fraction);
            output.add_to_layer(RenderLayer::Grid, Box::new(self.grid_line(left, right)));
            output.add_to_layer(
                RenderLayer::Annotation,
                Box::new(self.text(
                    Point::new(left.x() - self.font_size * 0.75, left.y()),
                    "end",
                    &format_axis_label(total_limit * f64::from(fraction)),
                )),
            );
        }

        output
    }

    fn render_element(&self, element: &LayerElement) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let bounds = element.rect().to_bounds(self.plot);
        let min_point = bounds.min_point();
        let rect = svg_element::Rectangle::new()
            .set("x", min_point.x())
            .set("y", min_point.y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", &element.color())
            .set("stroke", &element.border_color())
            .set("stroke-width", 2)
            .set("data-key", element.key());

        let layer = if element.z_index().is_some() {
            RenderLayer::Excess
        } else {
            RenderLayer::Coverage
        };
        output.add_to_layer(layer, Box::new(rect));

        let lines = [
            element.insurer().to_string(),
            format_axis_label(element.label_amount()),
            format!("{}%", element.share()),
        ];
        output.add_to_layer(
            RenderLayer::Label,
            Box::new(self.text_block(bounds.center(), &lines)),
        );

        output
    }

    fn render_summary(&self, tower: &Tower) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let baseline = self.plot.max_y() + self.font_size * 3.5;
        let total_limit = format_number_with_commas(tower.total_limit_text());
        let summary = format!(
            "Total Policy Limit: ${} | Total Share: {:.2}%",
            if total_limit.is_empty() { "0" } else { &total_limit },
            tower.total_share()
        );
        output.add_to_layer(
            RenderLayer::Annotation,
            Box::new(self.text(
                Point::new(self.plot.min_x(), baseline),
                "start",
                &summary,
            )),
        );

        if tower.share_exceeded() {
            let warning = self
                .text(
                    Point::new(self.plot.min_x(), baseline + self.font_size * 1.5),
                    "start",
                    "Warning: Total share exceeds 100%",
                )
                .set("fill", "#dc2626")
                .set("font-weight", "bold");
            output.add_to_layer(RenderLayer::Annotation, Box::new(warning));
        }

        output
    }

    fn grid_line(&self, from: Point, to: Point) -> svg_element::Line {
        svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", &self.grid_color)
            .set("stroke-width", 1)
    }

    fn text(&self, position: Point, anchor: &str, content: &str) -> svg_element::Text {
        svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", anchor)
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", self.font_size)
            .set("fill", &self.text_color)
            .add(SvgText::new(content))
    }

    /// Centered multi-line text, one `tspan` per line.
    fn text_block(&self, center: Point, lines: &[String]) -> svg_element::Text {
        let line_height = self.font_size * 1.2;
        let y_offset = -(line_height * lines.len() as f32 + line_height) / 2.0;

        let mut text = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", center.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", self.font_size)
            .set("fill", &self.text_color);

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", center.x())
                .set("dy", line_height)
                .add(SvgText::new(line.as_str()));
            text = text.add(tspan);
        }

        text
    }
}

/// Writes rendered towers to any [`Write`] sink.
pub struct SvgExporter<W> {
    svg: Svg,
    writer: W,
}

impl<W: Write> SvgExporter<W> {
    pub fn new(svg: Svg, writer: W) -> Self {
        Self { svg, writer }
    }

    /// Consumes the exporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> export::Exporter for SvgExporter<W> {
    fn export_tower(
        &mut self,
        tower: &Tower,
        elements: &[LayerElement],
    ) -> Result<(), export::Error> {
        let doc = self.svg.render(tower, elements);

        info!(elements = elements.len(); "Writing SVG document");
        if let Err(err) = write!(self.writer, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }
        self.writer.flush()?;

        Ok(())
    }
}
