//! Submission handling: validation gate, simulated persistence, snapshot
//!
//! Submission is all-or-nothing: the snapshot is only replaced after the
//! persistence step succeeds, and a failed or invalid submission leaves the
//! previous snapshot untouched.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use crate::form::errors::FormError;
use crate::form::validation::Validator;
use crate::models::{FieldPair, SubmittedSnapshot};

/// Persistence seam behind the submission handler
#[async_trait]
pub trait Persist: Send + Sync {
    async fn persist(&self, pairs: &[FieldPair]) -> Result<(), String>;
}

/// Default backend: waits a fixed delay and succeeds
#[derive(Debug, Clone)]
pub struct SimulatedStore {
    delay: Duration,
}

impl SimulatedStore {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Persist for SimulatedStore {
    async fn persist(&self, pairs: &[FieldPair]) -> Result<(), String> {
        debug!("Simulating persistence of {} pairs", pairs.len());
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Submission lifecycle: `Idle -> Submitting -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Gates submissions through the validator and owns the submitted snapshot
pub struct SubmissionHandler {
    validator: Validator,
    backend: Box<dyn Persist>,
    state: SubmitState,
    snapshot: Option<SubmittedSnapshot>,
}

impl SubmissionHandler {
    pub fn new(validator: Validator, backend: Box<dyn Persist>) -> Self {
        Self {
            validator,
            backend,
            state: SubmitState::Idle,
            snapshot: None,
        }
    }

    /// Handler backed by the simulated persistence step
    pub fn simulated(validator: Validator, delay: Duration) -> Self {
        Self::new(validator, Box::new(SimulatedStore::new(delay)))
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// The last successfully submitted snapshot, if any
    pub fn snapshot(&self) -> Option<&SubmittedSnapshot> {
        self.snapshot.as_ref()
    }

    /// Validate and persist the collection, replacing the snapshot on
    /// success. Returns the number of pairs submitted.
    ///
    /// A second call while a submission is in flight is rejected without
    /// touching the collection or the snapshot.
    pub async fn submit(&mut self, pairs: &[FieldPair]) -> Result<usize, FormError> {
        if self.state == SubmitState::Submitting {
            return Err(FormError::SubmissionInFlight);
        }

        let report = self.validator.validate(pairs);
        if !report.is_valid() {
            debug!("Submission blocked by validation: {}", report);
            return Err(FormError::ValidationFailed(report));
        }

        self.state = SubmitState::Submitting;
        let result = self.backend.persist(pairs).await;
        self.state = SubmitState::Idle;

        match result {
            Ok(()) => {
                let snapshot = SubmittedSnapshot::capture(pairs);
                let count = snapshot.len();
                self.snapshot = Some(snapshot);
                info!("Submitted {} field pairs", count);
                Ok(count)
            }
            Err(message) => Err(FormError::SubmissionFailed(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PairField;
    use crate::form::validation::MSG_SELECTION_REQUIRED;

    /// Backend that always rejects, for failure-path tests
    struct FailingStore;

    #[async_trait]
    impl Persist for FailingStore {
        async fn persist(&self, _pairs: &[FieldPair]) -> Result<(), String> {
            Err("backend unavailable".to_string())
        }
    }

    fn handler() -> SubmissionHandler {
        SubmissionHandler::simulated(Validator::new(), Duration::from_millis(0))
    }

    fn valid_pairs() -> Vec<FieldPair> {
        vec![
            FieldPair::new("alpha", "option1"),
            FieldPair::new("beta", "option2"),
        ]
    }

    #[tokio::test]
    async fn test_submit_valid_collection_replaces_snapshot() {
        let mut handler = handler();
        assert!(handler.snapshot().is_none());

        let pairs = valid_pairs();
        let count = handler.submit(&pairs).await.unwrap();
        assert_eq!(count, 2);

        let snapshot = handler.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        // Round-trip: order and field values preserved
        assert_eq!(snapshot.pairs(), &pairs[..]);
        assert_eq!(handler.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_submit_invalid_collection_keeps_snapshot() {
        let mut handler = handler();
        handler.submit(&valid_pairs()).await.unwrap();
        let before = handler.snapshot().unwrap().clone();

        let invalid = vec![FieldPair::new("", "option1")];
        let err = handler.submit(&invalid).await.unwrap_err();
        match err {
            FormError::ValidationFailed(report) => {
                assert_eq!(report.field_errors.len(), 1);
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
        assert_eq!(handler.snapshot(), Some(&before));
    }

    #[tokio::test]
    async fn test_submit_empty_collection_fails() {
        let mut handler = handler();
        let err = handler.submit(&[]).await.unwrap_err();
        match err {
            FormError::ValidationFailed(report) => {
                assert!(report.collection_error.is_some());
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
        assert!(handler.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_persistence_failure_preserves_previous_snapshot() {
        let mut handler = handler();
        handler.submit(&valid_pairs()).await.unwrap();
        let before = handler.snapshot().unwrap().clone();

        let mut handler = SubmissionHandler {
            validator: Validator::new(),
            backend: Box::new(FailingStore),
            state: SubmitState::Idle,
            snapshot: Some(before.clone()),
        };
        let err = handler.submit(&valid_pairs()).await.unwrap_err();
        assert!(matches!(err, FormError::SubmissionFailed(_)));
        assert_eq!(handler.snapshot(), Some(&before));
        assert_eq!(handler.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_in_flight_is_rejected() {
        let mut handler = handler();
        handler.state = SubmitState::Submitting;
        let err = handler.submit(&valid_pairs()).await.unwrap_err();
        assert!(matches!(err, FormError::SubmissionInFlight));
        assert!(handler.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_scenario_missing_selection_then_success() {
        // Start with one pair, input filled, selection left empty
        let mut handler = handler();
        let mut pairs = vec![FieldPair::new("alpha", "")];

        let err = handler.submit(&pairs).await.unwrap_err();
        match err {
            FormError::ValidationFailed(report) => {
                assert_eq!(
                    report.error_for(0, PairField::Select),
                    Some(MSG_SELECTION_REQUIRED)
                );
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
        assert!(handler.snapshot().is_none());

        // Add a second pair and fill everything in
        pairs[0].select_value = "option1".to_string();
        pairs.push(FieldPair::new("beta", "option2"));

        let count = handler.submit(&pairs).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(handler.snapshot().unwrap().len(), 2);
    }
}
