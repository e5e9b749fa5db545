//! Per-node reporting for [`Validator::trace`](crate::Validator::trace).
use crate::{
    error::Error,
    paths::{LazyLocation, Location},
};

/// One evaluated schema node.
///
/// Contexts are emitted in post-order: children before the node that contains them, so the
/// document root comes last.
#[derive(Debug, Clone)]
pub struct TracingContext<'a, 'b, 'c> {
    /// Where the evaluated value sits in the document
    pub instance_location: &'c LazyLocation<'a, 'b>,
    /// The schema node, as a pointer into the schema document
    pub schema_location: &'c Location,
    pub result: NodeEvaluationResult,
}

impl TracingContext<'_, '_, '_> {
    /// Materialize the instance location as a JSON pointer.
    #[must_use]
    pub fn instance_path(&self) -> Location {
        self.instance_location.into()
    }
}

/// Outcome of one schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvaluationResult {
    Valid,
    /// The node or one of its children rejected the value
    Invalid,
    /// The node was skipped, e.g. a declared property absent from the object
    Ignored,
}

impl NodeEvaluationResult {
    /// Schema errors abort the walk and have no outcome to report.
    fn from_outcome(outcome: &Result<(), Error>) -> Option<Self> {
        match outcome {
            Ok(()) => Some(Self::Valid),
            Err(Error::Validation(_)) => Some(Self::Invalid),
            Err(_) => None,
        }
    }
}

/// Receives a [`TracingContext`] for every evaluated node.
pub type TracingCallback<'a> = &'a mut dyn FnMut(TracingContext);

/// Optional callback held by a validation call.
pub(crate) struct Tracer<'c>(Option<TracingCallback<'c>>);

impl<'c> Tracer<'c> {
    pub(crate) fn new(callback: Option<TracingCallback<'c>>) -> Self {
        Tracer(callback)
    }

    /// Report the outcome of evaluating the node at `location`.
    pub(crate) fn evaluated(
        &mut self,
        path: &LazyLocation,
        location: &Location,
        outcome: &Result<(), Error>,
    ) {
        if let Some(callback) = self.0.as_deref_mut() {
            if let Some(result) = NodeEvaluationResult::from_outcome(outcome) {
                callback(TracingContext {
                    instance_location: path,
                    schema_location: location,
                    result,
                });
            }
        }
    }

    /// Report a node that did not apply to the document.
    pub(crate) fn ignored(&mut self, path: &LazyLocation, location: &Location) {
        if let Some(callback) = self.0.as_deref_mut() {
            callback(TracingContext {
                instance_location: path,
                schema_location: location,
                result: NodeEvaluationResult::Ignored,
            });
        }
    }
}
