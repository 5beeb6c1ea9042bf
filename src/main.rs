use anyhow::Context;
use storyspoil_suite::configuration::get_configuration;
use storyspoil_suite::scenario::{CaseOutcome, run_scenario};
use storyspoil_suite::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("storyspoil-suite".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let report = run_scenario(&configuration)
        .await
        .context("Failed to set up the scenario run.")?;

    for case_report in &report.cases {
        match &case_report.outcome {
            CaseOutcome::Passed => {
                tracing::info!(case = case_report.case.name(), "PASS");
            }
            CaseOutcome::Failed(error) => {
                tracing::error!(case = case_report.case.name(), %error, "FAIL");
            }
        }
    }
    let elapsed = report.finished_at - report.started_at;
    tracing::info!(
        passed = report.passed_count(),
        total = report.cases.len(),
        elapsed_ms = elapsed.num_milliseconds(),
        "run finished"
    );

    if report.all_passed() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} cases failed",
            report.cases.len() - report.passed_count(),
            report.cases.len()
        )
    }
}
