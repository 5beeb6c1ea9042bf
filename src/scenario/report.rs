use super::CaseError;
use super::cases::Case;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub enum CaseOutcome {
    Passed,
    Failed(CaseError),
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

#[derive(Debug)]
pub struct CaseReport {
    pub case: Case,
    pub outcome: CaseOutcome,
}

/// One pass/fail entry per case, in execution order, plus the wall-clock
/// bounds of the run. The overall status is the conjunction of all case
/// outcomes.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|report| report.outcome.is_passed())
    }

    pub fn passed_count(&self) -> usize {
        self.cases
            .iter()
            .filter(|report| report.outcome.is_passed())
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases
            .iter()
            .filter(|report| !report.outcome.is_passed())
    }
}
