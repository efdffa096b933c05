use kolstat_types::AnalysisConfig;

use super::{Encounter, EncounterBuilder, Step, synthesize_alias};
use crate::combat_log::LineClassifier;
use crate::warnings::Warnings;

/// Result of folding a transcript into encounters.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Encounters in log order; alias copies follow their original.
    pub encounters: Vec<Encounter>,
    pub warnings: Warnings,
    /// Lines read, including the ones that matched nothing.
    pub lines: usize,
}

/// Drives [`EncounterBuilder`] over a line stream.
pub struct EncounterParser<'a> {
    config: &'a AnalysisConfig,
    classifier: LineClassifier,
}

impl<'a> EncounterParser<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::new(config.metadata_marker.clone()),
        }
    }

    pub fn parse<I, S>(&self, lines: I) -> ParseOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = ParseOutput::default();
        let mut builder = EncounterBuilder::new(self.config);

        for line in lines {
            let line = line.as_ref();
            output.lines += 1;
            let classified = self.classifier.classify(line);

            // An unconsumed closing line opens the next segment. A fresh
            // builder always consumes, so this runs at most twice.
            loop {
                match builder.step(line, &classified, &mut output.warnings) {
                    Step::Consumed => break,
                    Step::Closed { consumed } => {
                        let done =
                            std::mem::replace(&mut builder, EncounterBuilder::new(self.config));
                        self.emit(done, &mut output.encounters);
                        if consumed {
                            break;
                        }
                    }
                }
            }
        }
        self.emit(builder, &mut output.encounters);

        tracing::info!(
            lines = output.lines,
            encounters = output.encounters.len(),
            warnings = output.warnings.len(),
            "Parsed transcript"
        );
        output
    }

    fn emit(&self, builder: EncounterBuilder<'_>, encounters: &mut Vec<Encounter>) {
        let Some(mut encounter) = builder.finish() else {
            return;
        };
        tracing::debug!("Closed segment: {}", encounter);
        tracing::trace!("{}", encounter.overview());
        let alias = synthesize_alias(&mut encounter);
        encounters.push(encounter);
        encounters.extend(alias);
    }
}
