//! Diagnostic steps and test-case metadata for reporting.
//!
//! # Design
//! A step is a named unit of work inside a test case: one network action or
//! one block of assertions. Steps run inside a `tracing` span and are recorded
//! into a per-thread journal along with any request/response logs attached
//! while they were open. Test runners give every test its own thread, so
//! journals never mix between concurrently running cases.

use std::cell::RefCell;
use std::fmt;

use crate::error::HarnessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Blocker,
    Critical,
    Normal,
    Minor,
    Trivial,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Blocker => "blocker",
            Severity::Critical => "critical",
            Severity::Normal => "normal",
            Severity::Minor => "minor",
            Severity::Trivial => "trivial",
        };
        f.write_str(name)
    }
}

/// Static metadata describing a test case. Not used for execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase {
    pub name: &'static str,
    pub display_name: &'static str,
    pub severity: Severity,
    pub owner: &'static str,
    pub feature: &'static str,
    pub story: &'static str,
    pub description: Option<&'static str>,
    pub tags: &'static [&'static str],
}

impl TestCase {
    /// Defaults for a suite; individual cases override name, display name and severity.
    pub const fn suite(owner: &'static str, feature: &'static str, story: &'static str) -> Self {
        Self {
            name: "",
            display_name: "",
            severity: Severity::Normal,
            owner,
            feature,
            story,
            description: None,
            tags: &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub outcome: Outcome,
    pub attachments: Vec<Attachment>,
}

#[derive(Default)]
struct Journal {
    open: Vec<StepRecord>,
    done: Vec<StepRecord>,
}

thread_local! {
    static JOURNAL: RefCell<Journal> = RefCell::new(Journal::default());
}

/// Closes the step on drop; a step dropped without `finish` was unwound by a panic.
struct OpenStep {
    finished: bool,
}

impl OpenStep {
    fn begin(name: String) -> Self {
        JOURNAL.with(|j| {
            j.borrow_mut().open.push(StepRecord {
                name,
                outcome: Outcome::Passed,
                attachments: Vec::new(),
            })
        });
        Self { finished: false }
    }

    fn finish(mut self, outcome: Outcome) {
        self.finished = true;
        close(outcome);
    }
}

impl Drop for OpenStep {
    fn drop(&mut self) {
        if !self.finished {
            close(Outcome::Failed("panicked".to_string()));
        }
    }
}

fn close(outcome: Outcome) {
    let _ = JOURNAL.try_with(|j| {
        let mut journal = j.borrow_mut();
        if let Some(mut record) = journal.open.pop() {
            record.outcome = outcome;
            journal.done.push(record);
        }
    });
}

/// Run `action` as a named step and return its result unchanged.
pub fn step<T>(
    name: impl Into<String>,
    action: impl FnOnce() -> Result<T, HarnessError>,
) -> Result<T, HarnessError> {
    let name = name.into();
    let span = tracing::info_span!("step", name = %name);
    let _entered = span.enter();

    let open = OpenStep::begin(name);
    let result = action();
    match &result {
        Ok(_) => {
            tracing::debug!("step passed");
            open.finish(Outcome::Passed);
        }
        Err(e) => {
            tracing::warn!(error = %e, "step failed");
            open.finish(Outcome::Failed(e.to_string()));
        }
    }
    result
}

/// Attach a log to the innermost open step. Outside a step this is a no-op.
pub fn attach(name: impl Into<String>, content: impl Into<String>) {
    JOURNAL.with(|j| {
        if let Some(step) = j.borrow_mut().open.last_mut() {
            step.attachments.push(Attachment {
                name: name.into(),
                content: content.into(),
            });
        }
    });
}

/// Drain the steps finished on this thread, in completion order.
pub fn take_steps() -> Vec<StepRecord> {
    JOURNAL.with(|j| std::mem::take(&mut j.borrow_mut().done))
}

fn reset() {
    JOURNAL.with(|j| {
        let mut journal = j.borrow_mut();
        journal.open.clear();
        journal.done.clear();
    });
}

/// Run one test case body: log its metadata, run it, log the step summary.
pub fn run_case(
    case: &TestCase,
    body: impl FnOnce() -> Result<(), HarnessError>,
) -> Result<(), HarnessError> {
    reset();
    let span = tracing::info_span!("case", name = case.name);
    let _entered = span.enter();
    tracing::info!(
        display_name = case.display_name,
        severity = %case.severity,
        owner = case.owner,
        feature = case.feature,
        story = case.story,
        tags = ?case.tags,
        "case started"
    );

    let result = body();
    let steps = take_steps();
    let summary = summarize(&steps);
    match &result {
        Ok(()) => tracing::info!(steps = steps.len(), "case passed\n{summary}"),
        Err(e) => tracing::error!(error = %e, "case failed\n{summary}"),
    }
    result
}

fn summarize(steps: &[StepRecord]) -> String {
    steps
        .iter()
        .map(|s| match &s.outcome {
            Outcome::Passed => format!("  [pass] {}", s.name),
            Outcome::Failed(msg) => format!("  [FAIL] {}: {msg}", s.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE: TestCase = TestCase {
        name: "journal_case",
        display_name: "Journal case",
        severity: Severity::Minor,
        ..TestCase::suite("API Testing Team", "Reporting", "Steps")
    };

    fn failure() -> HarnessError {
        HarnessError::Assertion {
            expression: "false".to_string(),
            detail: None,
        }
    }

    #[test]
    fn steps_record_outcome_and_attachments() {
        let _ = take_steps();
        let value = step("fetch", || {
            attach("Request", "GET /posts");
            Ok(7)
        })
        .unwrap();
        assert_eq!(value, 7);

        let err = step("check", || -> Result<(), HarnessError> { Err(failure()) }).unwrap_err();
        assert!(matches!(err, HarnessError::Assertion { .. }));

        let steps = take_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, "fetch");
        assert_eq!(steps[0].outcome, Outcome::Passed);
        assert_eq!(
            steps[0].attachments,
            vec![Attachment {
                name: "Request".to_string(),
                content: "GET /posts".to_string()
            }]
        );
        assert_eq!(steps[1].outcome, Outcome::Failed("check failed: false".to_string()));
        assert!(take_steps().is_empty());
    }

    #[test]
    fn nested_step_attachments_go_to_innermost() {
        let _ = take_steps();
        step("outer", || {
            step("inner", || {
                attach("Response", "200");
                Ok(())
            })?;
            attach("Note", "after inner");
            Ok(())
        })
        .unwrap();

        let steps = take_steps();
        assert_eq!(steps[0].name, "inner");
        assert_eq!(steps[0].attachments[0].name, "Response");
        assert_eq!(steps[1].name, "outer");
        assert_eq!(steps[1].attachments[0].name, "Note");
    }

    #[test]
    fn attach_outside_step_is_dropped() {
        let _ = take_steps();
        attach("Request", "GET /");
        assert!(take_steps().is_empty());
    }

    #[test]
    fn panicking_step_is_recorded_as_failed() {
        let _ = take_steps();
        let result = std::panic::catch_unwind(|| {
            let _: Result<(), HarnessError> = step("boom", || panic!("assertion"));
        });
        assert!(result.is_err());
        let steps = take_steps();
        assert_eq!(steps[0].outcome, Outcome::Failed("panicked".to_string()));
    }

    #[test]
    fn run_case_passes_body_result_through() {
        assert!(run_case(&CASE, || step("ok", || Ok(()))).is_ok());
        let err = run_case(&CASE, || step("bad", || Err(failure()))).unwrap_err();
        assert!(matches!(err, HarnessError::Assertion { .. }));
    }

    #[test]
    fn summary_marks_failures() {
        let steps = vec![
            StepRecord {
                name: "a".to_string(),
                outcome: Outcome::Passed,
                attachments: Vec::new(),
            },
            StepRecord {
                name: "b".to_string(),
                outcome: Outcome::Failed("nope".to_string()),
                attachments: Vec::new(),
            },
        ];
        assert_eq!(summarize(&steps), "  [pass] a\n  [FAIL] b: nope");
    }

    #[test]
    fn severity_orders_by_importance() {
        assert!(Severity::Blocker < Severity::Critical);
        assert!(Severity::Minor < Severity::Trivial);
        assert_eq!(Severity::Critical.to_string(), "critical");
    }
}
