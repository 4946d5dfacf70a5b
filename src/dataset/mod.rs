pub mod finalize;
pub mod writer;

use std::thread;
use std::time::Duration;

use crate::catalog::Scenario;
use crate::clean;
use crate::llm::{self, provider::TextGenerator};
use crate::prompt;
use writer::{DatasetWriter, DialogRecord};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub start_from_id: u64,
    pub per_scenario: u32,
    pub delay: Duration,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: u64,
    pub written: u64,
    pub failed: u64,
}

/// Generates `per_scenario` dialogues for every scenario, appending
/// successful ones to the writer.
///
/// The id counter advances once per scenario-iteration pair whether or
/// not generation succeeds, so ids are stable across resumed runs and
/// gaps mark failed generations. Iterations below `start_from_id` are
/// skipped without touching the API.
pub fn run_batch(
    backend: &dyn TextGenerator,
    writer: &mut DatasetWriter,
    scenarios: &[Scenario],
    opts: &BatchOptions,
) -> anyhow::Result<BatchReport> {
    let mut report = BatchReport::default();
    let mut counter: u64 = 0;

    for scenario in scenarios {
        for iteration in 1..=opts.per_scenario {
            counter += 1;
            if counter < opts.start_from_id {
                continue;
            }

            tracing::info!(
                id = counter,
                iteration,
                per_scenario = opts.per_scenario,
                label = scenario.label.name(),
                detail = scenario.detail,
                "generating dialogue"
            );

            let prompt = prompt::build(scenario);
            let raw = llm::generate_dialog(backend, &prompt);
            report.attempted += 1;

            match clean::dialogue(raw.as_deref()) {
                Some(dialog) => {
                    writer.append(&DialogRecord {
                        id: counter,
                        category: scenario.category.to_string(),
                        detail: scenario.detail.to_string(),
                        label: scenario.label.as_u8(),
                        dialog,
                    })?;
                    report.written += 1;
                }
                None => {
                    tracing::warn!(
                        id = counter,
                        detail = scenario.detail,
                        "no usable dialogue produced; id consumed without a row"
                    );
                    report.failed += 1;
                }
            }

            if !opts.delay.is_zero() {
                thread::sleep(opts.delay);
            }
        }
    }

    Ok(report)
}
