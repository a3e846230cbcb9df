//! Settings shared by every schema: absence/null handling and post-processing.
//!
//! [`Modifiers`] holds the optional, nullable and default settings consumed before
//! the type check, and the ordered refine/transform steps run after it.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::Value;

/// Predicate stored by a refine step.
pub(crate) type RefineFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Mapping stored by a transform step. `Err` carries a user-facing reason.
pub(crate) type TransformFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// One post-processing step.
#[derive(Clone)]
pub(crate) enum Step {
    Refine { check: RefineFn, message: String },
    Transform(TransformFn),
}

/// Absence/null settings and post-processing steps of a schema.
#[derive(Clone, Default)]
pub struct Modifiers {
    optional: bool,
    nullable: bool,
    default: Option<Value>,
    steps: Vec<Step>,
}

impl Modifiers {
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Number of refine/transform steps attached so far.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// True when an explicit null resolves to null without a type check.
    pub(crate) fn accepts_null(&self) -> bool {
        self.nullable || self.optional
    }

    pub(crate) fn set_optional(&mut self) {
        self.optional = true;
    }

    pub(crate) fn set_nullable(&mut self) {
        self.nullable = true;
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    pub(crate) fn push_refine(&mut self, check: RefineFn, message: String) {
        self.steps.push(Step::Refine { check, message });
    }

    pub(crate) fn push_transform(&mut self, transform: TransformFn) {
        self.steps.push(Step::Transform(transform));
    }

    /// Runs the steps in declaration order, stopping at the first failure.
    pub(crate) fn apply_steps(&self, value: Value, path: &Path) -> Validation<Value, ZodError> {
        let mut current = value;
        for step in &self.steps {
            match step {
                Step::Refine { check, message } => {
                    match panic::catch_unwind(AssertUnwindSafe(|| check(&current))) {
                        Ok(true) => {}
                        Ok(false) => {
                            return Validation::Failure(ZodError::single(
                                Issue::new(path.clone(), IssueCode::Custom, message.clone())
                                    .with_received(current),
                            ));
                        }
                        Err(payload) => {
                            let reason = panic_reason(payload.as_ref());
                            tracing::warn!(%path, %reason, "refinement panicked");
                            return Validation::Failure(ZodError::single(unexpected(
                                path, &reason, current,
                            )));
                        }
                    }
                }
                Step::Transform(transform) => {
                    let input = current.clone();
                    match panic::catch_unwind(AssertUnwindSafe(|| transform(current))) {
                        Ok(Ok(next)) => current = next,
                        Ok(Err(reason)) => {
                            return Validation::Failure(ZodError::single(unexpected(
                                path, &reason, input,
                            )));
                        }
                        Err(payload) => {
                            let reason = panic_reason(payload.as_ref());
                            tracing::warn!(%path, %reason, "transform panicked");
                            return Validation::Failure(ZodError::single(unexpected(
                                path, &reason, input,
                            )));
                        }
                    }
                }
            }
        }
        Validation::Success(current)
    }
}

/// Wraps an infallible user mapping.
pub(crate) fn infallible<F>(f: F) -> TransformFn
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Arc::new(move |value| Ok(f(value)))
}

/// Wraps a fallible user mapping, rendering its error with `Display`.
pub(crate) fn fallible<F, E>(f: F) -> TransformFn
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Display,
{
    Arc::new(move |value| f(value).map_err(|e| e.to_string()))
}

fn unexpected(path: &Path, reason: &str, received: Value) -> Issue {
    Issue::new(
        path.clone(),
        IssueCode::Custom,
        format!("Unexpected error: {}", reason),
    )
    .with_received(received)
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "callback panicked".to_string()
    }
}
