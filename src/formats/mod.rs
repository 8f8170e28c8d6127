//! Output format modules for orrery
//!
//! Renderers only reflect computed labels and differences; they never
//! reclassify anything. The SVG writer streams to any `std::io::Write`.

pub mod svg_writer;
pub mod text;

pub use svg_writer::{render_alignment, write_alignment, SvgConfig, SvgError, SvgWriter};
pub use text::{alignment_table, ascii_clock, ascii_report, celestial_report, clock_line, frames_text, sync_report};
