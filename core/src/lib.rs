pub mod analysis;
pub mod combat_log;
pub mod config;
pub mod encounter;
pub mod error;
pub mod game_data;
pub mod state;
pub mod warnings;

// Re-exports for convenience
pub use analysis::{Analysis, ItemReport, MonsterReport, analyze};
pub use combat_log::{LineClassifier, LineEvent};
pub use encounter::{Encounter, EncounterParser, ParseOutput};
pub use error::{Error, Result};
pub use kolstat_types::AnalysisConfig;
pub use state::MetadataContext;
pub use warnings::Warnings;

/// Parse a transcript and aggregate it in one go. Parser warnings come
/// first in the result.
pub fn analyze_lines<I, S>(lines: I, config: &AnalysisConfig) -> (Vec<Encounter>, Analysis)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = EncounterParser::new(config).parse(lines);
    let mut analysis = analyze(&parsed.encounters, config);
    let mut warnings = parsed.warnings;
    warnings.extend(std::mem::take(&mut analysis.warnings));
    analysis.warnings = warnings;
    (parsed.encounters, analysis)
}
