use std::any::{type_name, Any};
use std::fmt::{Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::value::{TypeInfo, Value};
use crate::Matcher;

use super::same_with;

/// An expression that could not be reduced to a constant when the setup was
/// declared, like a captured variable.
pub trait Expression: Send + Sync + 'static {
    /// Evaluate the expression. `None` means it does not reduce to a constant.
    fn partial_eval(&self) -> Option<Value>;
}

impl<F> Expression for F
where
    F: Fn() -> Option<Value> + Send + Sync + 'static,
{
    fn partial_eval(&self) -> Option<Value> {
        self()
    }
}

/// Create a [`LazyEval`] matcher for `expression`.
pub fn lazy<E: Expression>(expression: E) -> LazyEval {
    LazyEval {
        expression: Arc::new(expression),
        expression_name: type_name::<E>(),
    }
}

/// Evaluates its expression each time an argument is matched and compares the
/// result with the argument.
///
/// Two lazy matchers are only the same if one is a clone of the other, the
/// values an expression evaluates to may change between calls.
#[must_use]
#[derive(Clone)]
pub struct LazyEval {
    expression: Arc<dyn Expression>,
    expression_name: &'static str,
}

impl Matcher for LazyEval {
    fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
        self.expression
            .partial_eval()
            .map_or(false, |evaluated| evaluated == *value)
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |a, b| {
            Arc::as_ptr(&a.expression).cast::<()>() == Arc::as_ptr(&b.expression).cast::<()>()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.expression.partial_eval() {
            Some(value) => write!(f, "{value:?}"),
            None => write!(f, "lazy({})", self.expression_name),
        }
    }
}
