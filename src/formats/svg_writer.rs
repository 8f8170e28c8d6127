//! Streaming SVG writer for alignment drawings
//!
//! Writes directly to any `std::io::Write` implementation, one element at a
//! time. The star sits at the left of the canvas and each body is placed on
//! its own orbit, spread evenly around the star.

use std::f64::consts::PI;
use std::io::{self, Write};

use thiserror::Error;

use crate::core::models::{Body, ClassificationResult};
use crate::core::physics::orbit_radius;

/// Fill used for bodies without a colour
pub const DEFAULT_BODY_FILL: &str = "#8ecae6";
/// Fill used for the star
pub const STAR_FILL: &str = "gold";
/// Radius of the star disc
pub const STAR_RADIUS: f64 = 30.0;
/// Body size units per SVG unit of radius
pub const SIZE_SCALE: f64 = 1000.0;

/// Error type for SVG writing operations
#[derive(Error, Debug)]
pub enum SvgError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, SvgError>;

/// Canvas settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
        }
    }
}

impl SvgConfig {
    /// Centre of the star on the canvas.
    pub fn star_center(&self) -> (f64, f64) {
        (f64::from(self.width) / 8.0, f64::from(self.height) / 2.0)
    }
}

/// Streaming SVG writer
pub struct SvgWriter<W: Write> {
    writer: W,
    config: SvgConfig,
    open: bool,
}

impl<W: Write> SvgWriter<W> {
    /// Create a new SvgWriter with the given configuration
    pub fn new(writer: W, config: SvgConfig) -> Self {
        Self {
            writer,
            config,
            open: false,
        }
    }

    /// Write the opening <svg> tag
    pub fn write_start(&mut self) -> Result<()> {
        if self.open {
            return Err(SvgError::InvalidState("document already started".to_string()));
        }
        writeln!(
            self.writer,
            "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.config.width, self.config.height
        )?;
        self.open = true;
        Ok(())
    }

    /// Draw the star at the canvas anchor point
    pub fn write_star(&mut self, name: &str) -> Result<()> {
        self.require_open("write_star")?;
        let (cx, cy) = self.config.star_center();
        writeln!(
            self.writer,
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"><title>{}</title></circle>",
            cx,
            cy,
            STAR_RADIUS,
            STAR_FILL,
            escape_xml_text(name)
        )?;
        Ok(())
    }

    /// Draw one body at slot `index` of `count`, labelled with its light
    pub fn write_body(
        &mut self,
        body: &Body,
        result: &ClassificationResult,
        index: usize,
        count: usize,
    ) -> Result<()> {
        self.require_open("write_body")?;
        let (sx, sy) = self.config.star_center();
        let angle = index as f64 / count.max(1) as f64 * 2.0 * PI;
        let radius = orbit_radius(index);
        let px = sx + angle.cos() * radius;
        let py = sy + angle.sin() * radius;
        let fill = body.color.as_deref().unwrap_or(DEFAULT_BODY_FILL);

        writeln!(
            self.writer,
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.3}\" fill=\"{}\" data-light=\"{}\" />",
            px,
            py,
            body.size / SIZE_SCALE,
            escape_xml_attr(fill),
            escape_xml_attr(result.light.label())
        )?;
        writeln!(
            self.writer,
            "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"14\">{}</text>",
            px + 10.0,
            py,
            escape_xml_text(&body.name)
        )?;
        Ok(())
    }

    /// Write the closing </svg> tag
    pub fn write_end(&mut self) -> Result<()> {
        self.require_open("write_end")?;
        writeln!(self.writer, "</svg>")?;
        self.open = false;
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the writer and return the inner Write handle
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn require_open(&self, op: &str) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(SvgError::InvalidState(format!(
                "{} called before write_start",
                op
            )))
        }
    }
}

/// Write a complete alignment drawing.
///
/// `bodies` and `results` are paired by index and should come from
/// [`crate::core::alignment::classify_system`].
pub fn write_alignment<W: Write>(
    writer: W,
    config: SvgConfig,
    star_name: &str,
    bodies: &[Body],
    results: &[ClassificationResult],
) -> Result<W> {
    let mut svg = SvgWriter::new(writer, config);
    svg.write_start()?;
    svg.write_star(star_name)?;
    for (i, (body, result)) in bodies.iter().zip(results).enumerate() {
        svg.write_body(body, result, i, bodies.len())?;
    }
    svg.write_end()?;
    svg.flush()?;
    Ok(svg.into_inner())
}

/// Render an alignment drawing to a string.
pub fn render_alignment(
    config: SvgConfig,
    star_name: &str,
    bodies: &[Body],
    results: &[ClassificationResult],
) -> Result<String> {
    let buf = write_alignment(Vec::new(), config, star_name, bodies, results)?;
    String::from_utf8(buf).map_err(|e| SvgError::InvalidState(e.to_string()))
}

/// Escape XML attribute values
fn escape_xml_attr(s: &str) -> String {
    escape_xml_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape XML text content
fn escape_xml_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
