//! Per-element table for terminals.

use super::types::{build_sections, sort_sections};
use super::{ansi_color, score_color, ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::compliance::Score;
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = ["ELEMENT ID", "SECTION ID", "NTIA MINIMUM ELEMENTS", "RESULT", "SCORE"];

/// Table reporter listing every element with its result and score
pub struct DetailedReporter {
    colored: bool,
}

impl DetailedReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for DetailedReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Left-align `text` in `width` terminal columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

impl ReportGenerator for DetailedReporter {
    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, ReportError> {
        let mut sections = build_sections(ctx)?;
        sort_sections(&mut sections);

        // Entity id is printed only on the first row of its group.
        let mut previous_entity: Option<&str> = None;
        let rows: Vec<[String; 5]> = sections
            .iter()
            .map(|s| {
                let entity = if previous_entity == Some(s.entity_id) {
                    String::new()
                } else {
                    s.entity_id.to_string()
                };
                previous_entity = Some(s.entity_id);
                let section_id = if s.required {
                    s.section_id.to_string()
                } else {
                    format!("{}*", s.section_id)
                };
                [
                    entity,
                    section_id,
                    s.data_field.to_string(),
                    s.result.to_string(),
                    format!("{:.1}", s.score),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.width());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let score = Score::for_document(ctx.store, ctx.standard);
        let mut out = String::new();
        writeln!(out, "{}", self.color(&format!("{} Report", ctx.standard.name()), "bold"))?;
        writeln!(
            out,
            "Compliance score by {} Score:{:.1} RequiredScore:{:.1} OptionalScore:{:.1} for {}",
            env!("CARGO_PKG_NAME"),
            score.total,
            score.required,
            score.optional,
            ctx.file_name
        )?;
        writeln!(out, "{}", self.color("* indicates optional fields", "dim"))?;

        let header: Vec<String> = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| self.color(&pad(h, w), "bold"))
            .collect();
        writeln!(out, "{}", header.join(" | ").trim_end())?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "{}", rule.join("-+-"))?;

        for (row, section) in rows.iter().zip(&sections) {
            let mut cells: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, w)| pad(cell, w))
                .collect();
            cells[4] = self.color(&row[4], score_color(section.score));
            writeln!(out, "{}", cells.join(" | "))?;
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Detailed
    }
}
