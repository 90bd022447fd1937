//! One-line score summary for shell output.

use super::{ansi_color, score_color, ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::compliance::Score;

/// Prints `<STANDARD> Report Score:x RequiredScore:y OptionalScore:z for <file>`
pub struct BasicReporter {
    colored: bool,
}

impl BasicReporter {
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
}

impl Default for BasicReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for BasicReporter {
    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, ReportError> {
        let score = Score::for_document(ctx.store, ctx.standard);
        let total = ansi_color(
            &format!("{:.1}", score.total),
            score_color(score.total),
            self.colored,
        );
        Ok(format!(
            "{} Report Score:{} RequiredScore:{:.1} OptionalScore:{:.1} for {}\n",
            ctx.standard.name(),
            total,
            score.required,
            score.optional,
            ctx.file_name
        ))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Basic
    }
}
