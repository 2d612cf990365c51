//! Step planning and the driver loop

use super::{Policy, Step};
use crate::config::Flags;
use crate::error::{is_cancelled, ScaffoldError};
use std::future::Future;
use tracing::{debug, info, warn};

/// Name and failure policy of a step
pub trait StepInfo {
    fn name(&self) -> &'static str;
    fn policy(&self) -> Policy;
}

/// How a step ended when the run went on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// An auxiliary step failed; the message is what was reported
    Warned(String),
}

/// Per-step outcomes of a run that reached the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<(&'static str, StepOutcome)>,
}

impl RunSummary {
    /// Steps that failed without stopping the run
    pub fn warnings(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            StepOutcome::Warned(message) => Some((*name, message.as_str())),
            StepOutcome::Completed => None,
        })
    }
}

/// Steps to run for the given flags, in order
pub fn plan(flags: &Flags) -> Vec<Step> {
    let mut steps = vec![
        Step::CreateApp,
        Step::UiInit,
        Step::ComponentInstall,
        Step::ClientSetup,
    ];
    if flags.admin {
        steps.push(Step::AdminSetup);
    }
    steps.push(Step::InfraSetup);
    if flags.tests {
        steps.push(Step::UnitTestSetup);
        steps.push(Step::E2eTestSetup);
    }
    steps
}

/// Run `steps` in order through `exec`.
///
/// A failing [`Policy::Fatal`] step stops the run with
/// [`ScaffoldError::StepFailed`]; a failing [`Policy::Auxiliary`] step is
/// reported and recorded as [`StepOutcome::Warned`]. Cancellation stops the
/// run whatever the policy.
pub async fn drive<S, F, Fut>(steps: &[S], mut exec: F) -> Result<RunSummary, ScaffoldError>
where
    S: StepInfo + Copy,
    F: FnMut(S) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut summary = RunSummary::default();

    for &step in steps {
        let name = step.name();
        debug!(step = name, "starting step");

        match exec(step).await {
            Ok(()) => {
                info!(step = name, "step completed");
                summary.outcomes.push((name, StepOutcome::Completed));
            }
            Err(err) if is_cancelled(&err) => return Err(ScaffoldError::Cancelled),
            Err(err) => match step.policy() {
                Policy::Fatal => {
                    return Err(ScaffoldError::StepFailed {
                        step: name,
                        cause: err,
                    })
                }
                Policy::Auxiliary => {
                    let message = format!("{err:#}");
                    warn!(step = name, error = %message, "auxiliary step failed");
                    if let Err(e) =
                        cliclack::log::warning(format!("{name} did not complete: {message}"))
                    {
                        warn!(step = name, error = %e, "could not print step warning");
                    }
                    summary.outcomes.push((name, StepOutcome::Warned(message)));
                }
            },
        }
    }

    Ok(summary)
}
