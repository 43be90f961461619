// src/runtime/mod.rs

pub mod timer;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::api::QueryBenchApi;
use crate::error::ApiError;
use crate::models::assessment::{AssessmentFull, Question};
use crate::models::attempt::Attempt;
use crate::models::query::{FinalizeResult, QueryResult, ValidationResult};
use crate::models::schema::SchemaMetadata;
use crate::runtime::timer::Countdown;

/// Error synthesized locally when the participant runs a blank editor.
pub const EMPTY_QUERY_ERROR: &str = "Cannot execute an empty query.";

/// Aggregate warning shown when finalize hit submission failures but the
/// attempt was still closed.
pub const SUBMIT_WARNING: &str =
    "An error occurred while submitting your answers, but your attempt has been recorded.";

/// Where one question stands within a ready attempt.
#[derive(Debug, Clone)]
pub enum QuestionState {
    Untouched,
    Drafted,
    Executed(QueryResult),
    Validated(QueryResult, ValidationResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Finished,
}

/// Tags one execute+validate cycle with the question it was started for,
/// so a response landing after navigation or a re-run can be matched
/// against the question's current run sequence.
#[derive(Debug, Clone, Copy)]
pub struct RunTicket {
    question_id: i64,
    index: usize,
    seq: u64,
}

/// Outcome of one finalize call.
#[derive(Debug)]
pub struct FinalizeSummary {
    /// Scored summary from the finalize endpoint; `None` when that call
    /// itself failed (the attempt is still closed).
    pub result: Option<FinalizeResult>,

    /// One entry per failed submission or finalize call.
    pub warnings: Vec<String>,
}

impl FinalizeSummary {
    /// The single non-blocking warning to surface, if anything failed.
    pub fn warning(&self) -> Option<&'static str> {
        (!self.warnings.is_empty()).then_some(SUBMIT_WARNING)
    }
}

#[derive(Debug)]
struct QuestionSlot {
    question: Question,
    draft: String,
    state: QuestionState,

    /// Bumped on every run started for this question. A completed run
    /// only lands if its ticket still carries the current value.
    run_seq: u64,
}

/// Owns one timed attempt from start until finalize/timeout.
///
/// The loading phase is the pending `start` future and a load failure is
/// its error return, so a constructed runtime is always `Ready` (or
/// `Finished` after finalize) and invalid flag combinations such as
/// "finished but still executing" are unrepresentable.
pub struct AttemptRuntime<A: QueryBenchApi> {
    api: Arc<A>,
    attempt: Attempt,
    assessment: AssessmentFull,
    schema: SchemaMetadata,
    slots: Vec<QuestionSlot>,
    active: usize,
    displayed: Option<(QueryResult, Option<ValidationResult>)>,
    countdown: Countdown,
    phase: Phase,
}

impl<A: QueryBenchApi + 'static> AttemptRuntime<A> {
    /// Loads everything an attempt needs: the attempt record, the
    /// assignment (to resolve the assessment id), the full assessment
    /// and the target schema. Any failure here is fatal to the session;
    /// the caller exits and may start a fresh session to retry.
    pub async fn start(api: Arc<A>, assignment_id: i64) -> Result<Self, ApiError> {
        let attempt = api.start_attempt(assignment_id).await.map_err(|e| {
            tracing::error!("failed to start attempt for assignment {}: {}", assignment_id, e);
            e
        })?;

        let assignment = api.get_assignment(assignment_id).await?;
        let assessment = api.get_assessment_full(assignment.assessment).await.map_err(|e| {
            tracing::error!("failed to load assessment {}: {}", assignment.assessment, e);
            e
        })?;

        // An assessment without a db target still runs; the explorer and
        // autocomplete just see an empty catalog.
        let schema = match assessment.db_config {
            Some(config_id) => api.get_schema(config_id).await?,
            None => SchemaMetadata::default(),
        };

        let slots = assessment
            .questions_data
            .iter()
            .cloned()
            .map(|question| QuestionSlot {
                question,
                draft: String::new(),
                state: QuestionState::Untouched,
                run_seq: 0,
            })
            .collect();

        let countdown = Countdown::new(assessment.duration_minutes * 60);
        tracing::info!(
            "attempt {} ready: {} questions, {} minutes",
            attempt.id,
            assessment.questions_data.len(),
            assessment.duration_minutes
        );

        Ok(Self {
            api,
            attempt,
            assessment,
            schema,
            slots,
            active: 0,
            displayed: None,
            countdown,
            phase: Phase::Ready,
        })
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn assessment(&self) -> &AssessmentFull {
        &self.assessment
    }

    pub fn schema(&self) -> &SchemaMetadata {
        &self.schema
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining()
    }

    pub fn question_count(&self) -> usize {
        self.slots.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_question(&self) -> &Question {
        &self.slots[self.active].question
    }

    pub fn question_state(&self, index: usize) -> Option<&QuestionState> {
        self.slots.get(index).map(|slot| &slot.state)
    }

    pub fn active_draft(&self) -> &str {
        &self.slots[self.active].draft
    }

    /// The draft for a question by id, empty if never edited.
    pub fn draft(&self, question_id: i64) -> &str {
        self.slots
            .iter()
            .find(|slot| slot.question.id == question_id)
            .map(|slot| slot.draft.as_str())
            .unwrap_or("")
    }

    /// The execution/validation pair currently on screen. Cleared by
    /// navigation, repopulated only by a completed run.
    pub fn displayed_result(&self) -> Option<&QueryResult> {
        self.displayed.as_ref().map(|(result, _)| result)
    }

    pub fn displayed_validation(&self) -> Option<&ValidationResult> {
        self.displayed
            .as_ref()
            .and_then(|(_, validation)| validation.as_ref())
    }

    /// Switches the active question. Drafts and stored per-question
    /// states survive; only the on-screen result is cleared. Returns
    /// `false` for an out-of-range index.
    pub fn select_question(&mut self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        self.active = index;
        self.displayed = None;
        true
    }

    /// Replaces the active question's draft.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.is_finished() {
            return;
        }
        let slot = &mut self.slots[self.active];
        slot.draft = text.into();
        if matches!(slot.state, QuestionState::Untouched) && !slot.draft.trim().is_empty() {
            slot.state = QuestionState::Drafted;
        }
    }

    /// Starts a run for the active question: bumps its run sequence and
    /// hands out the ticket the eventual response must present. `None`
    /// once the attempt is finished (the Run control is disabled).
    pub fn begin_run(&mut self) -> Option<RunTicket> {
        if self.is_finished() {
            return None;
        }
        let index = self.active;
        let slot = &mut self.slots[index];
        slot.run_seq += 1;
        Some(RunTicket {
            question_id: slot.question.id,
            index,
            seq: slot.run_seq,
        })
    }

    /// Lands a completed run. A response whose ticket no longer matches
    /// the question's current run sequence is dropped (the question was
    /// re-executed in the meantime); a response for a question that is
    /// no longer active is stored on its slot but not displayed.
    pub fn apply_run(
        &mut self,
        ticket: RunTicket,
        result: QueryResult,
        validation: Option<ValidationResult>,
    ) {
        if self.is_finished() {
            return;
        }
        let slot = &mut self.slots[ticket.index];
        if slot.run_seq != ticket.seq {
            tracing::debug!(
                "discarding stale run result for question {} (seq {} != {})",
                ticket.question_id,
                ticket.seq,
                slot.run_seq
            );
            return;
        }

        slot.state = match &validation {
            Some(validation) => QuestionState::Validated(result.clone(), validation.clone()),
            None => QuestionState::Executed(result.clone()),
        };

        if self.active == ticket.index {
            self.displayed = Some((result, validation));
        }
    }

    /// The full "Run" action for the active question, per the execution
    /// flow contract: empty-draft guard, execute, then validate only on
    /// success. Holding `&mut self` across the awaits is what enforces
    /// "at most one cycle in flight per question".
    pub async fn run_active(&mut self) {
        let Some(ticket) = self.begin_run() else {
            return;
        };
        let query = self.slots[ticket.index].draft.clone();
        let config_id = self.assessment.db_config;
        let api = Arc::clone(&self.api);

        let (result, validation) =
            run_cycle(api.as_ref(), &query, ticket.question_id, config_id).await;
        self.apply_run(ticket, result, validation);
    }

    /// Advances the countdown by one second. Runs only while the attempt
    /// is ready; returns `true` on the tick that expires the clock, at
    /// which point the caller must invoke [`finalize`](Self::finalize).
    pub fn tick_second(&mut self) -> bool {
        match self.phase {
            Phase::Ready => self.countdown.tick(),
            Phase::Finished => false,
        }
    }

    /// Owns the clock until expiry: ticks once per second and routes
    /// expiry into the finalize path. Returns `None` if the attempt was
    /// finished by other means before the clock ran out.
    pub async fn run_clock(&mut self) -> Option<FinalizeSummary> {
        let mut clock = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick completes immediately.
        clock.tick().await;
        loop {
            clock.tick().await;
            if self.is_finished() {
                return None;
            }
            if self.tick_second() {
                tracing::info!("time expired, auto-submitting attempt {}", self.attempt.id);
                return self.finalize().await;
            }
        }
    }

    /// Closes the attempt: submits every question's current draft
    /// (including empty ones) in parallel, then calls the finalize
    /// endpoint. Individual submission failures are aggregated into
    /// warnings and never leave the attempt stuck; the backend is the
    /// authority on what was actually recorded.
    ///
    /// Idempotent: the second entry (user confirmation racing clock
    /// expiry, for instance) returns `None` without re-submitting.
    pub async fn finalize(&mut self) -> Option<FinalizeSummary> {
        if self.is_finished() {
            return None;
        }
        // Entering Finished first cancels the countdown and disables
        // every other mutation path.
        self.phase = Phase::Finished;

        let mut submissions = JoinSet::new();
        for slot in &self.slots {
            let api = Arc::clone(&self.api);
            let attempt_id = self.attempt.id;
            let question_id = slot.question.id;
            let query = slot.draft.clone();
            submissions.spawn(async move {
                let outcome = api.submit_answer(attempt_id, question_id, &query).await;
                (question_id, outcome)
            });
        }

        let mut warnings = Vec::new();
        while let Some(joined) = submissions.join_next().await {
            match joined {
                Ok((_, Ok(_))) => {}
                Ok((question_id, Err(e))) => {
                    tracing::warn!("failed to submit answer for question {}: {}", question_id, e);
                    warnings.push(format!("question {}: {}", question_id, e));
                }
                Err(e) => {
                    tracing::warn!("submission task failed: {}", e);
                    warnings.push(format!("submission task failed: {}", e));
                }
            }
        }
        warnings.sort();

        let result = match self.api.finalize_attempt(self.attempt.id).await {
            Ok(result) => {
                self.attempt.submitted_at = Some(result.submitted_at);
                self.attempt.score = Some(result.score);
                tracing::info!(
                    "attempt {} finalized: {}/{} correct",
                    self.attempt.id,
                    result.correct,
                    result.total
                );
                Some(result)
            }
            Err(e) => {
                tracing::warn!("finalize call failed for attempt {}: {}", self.attempt.id, e);
                warnings.push(format!("finalize: {}", e));
                None
            }
        };

        Some(FinalizeSummary { result, warnings })
    }
}

/// One execute+validate cycle against the backend, independent of the
/// runtime's state so it can run while a ticket is outstanding.
///
/// Execution failures come back as an error `QueryResult`; a validation
/// transport failure degrades to the fixed "unavailable" verdict instead
/// of masking the successful execution.
async fn run_cycle<A: QueryBenchApi>(
    api: &A,
    query: &str,
    question_id: i64,
    config_id: Option<i64>,
) -> (QueryResult, Option<ValidationResult>) {
    if query.trim().is_empty() {
        return (QueryResult::from_error(EMPTY_QUERY_ERROR), None);
    }

    let result = match api.run_query(query, config_id).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("query execution failed: {}", e);
            return (QueryResult::from_error(e.message()), None);
        }
    };

    if result.is_error() {
        return (result, None);
    }

    let validation = match api.validate_query(query, question_id, config_id).await {
        Ok(validation) => validation,
        Err(e) => {
            tracing::warn!("query validation failed (non-critical): {}", e);
            ValidationResult::unavailable()
        }
    };

    (result, Some(validation))
}
