use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::error::Error;
use crate::invocation::Invocation;
use crate::matcher::FixedArray;
use crate::method::MethodInfo;
use crate::Matcher;

/// The calls a setup applies to: a method and one argument matcher per
/// parameter.
pub struct InvocationShape {
    method: Arc<MethodInfo>,
    matchers: Vec<Box<dyn Matcher>>,
}

impl InvocationShape {
    /// Create a new shape for `method`.
    ///
    /// For a variadic method the matchers for the parameter array are passed
    /// one by one and combined into a [`FixedArray`] matcher. A single
    /// trailing matcher that accepts whole arrays (like [`any`](crate::matcher::any)
    /// or [`array`](crate::matcher::array)) is used for the parameter array as is.
    ///
    /// # Errors
    /// Returns [`Error::MatcherCountMismatch`] if the number of matchers does
    /// not fit the parameters of the method.
    pub fn new<M>(method: M, mut matchers: Vec<Box<dyn Matcher>>) -> Result<Self, Error>
    where
        M: Into<Arc<MethodInfo>>,
    {
        let method = method.into();
        let expected = method.params().len();
        let actual = matchers.len();

        if !method.is_variadic() {
            if actual != expected {
                return Err(Error::MatcherCountMismatch {
                    method: method.to_string(),
                    expected,
                    actual,
                });
            }
        } else if actual + 1 < expected {
            return Err(Error::MatcherCountMismatch {
                method: method.to_string(),
                expected,
                actual,
            });
        } else if actual != expected || !matchers[actual - 1].accepts_array() {
            let elements = matchers.split_off(expected - 1);
            matchers.push(Box::new(FixedArray(elements)));
        }

        Ok(Self { method, matchers })
    }

    #[must_use]
    pub fn method(&self) -> &Arc<MethodInfo> {
        &self.method
    }

    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn Matcher>] {
        &self.matchers
    }

    /// Returns `true` if `invocation` is a call of the method with arguments
    /// accepted by all matchers.
    #[must_use]
    pub fn matches(&self, invocation: &Invocation) -> bool {
        let method = invocation.method();
        if !Arc::ptr_eq(&self.method, method) && *self.method != **method {
            return false;
        }

        let arguments = invocation.arguments();
        arguments.len() == self.matchers.len()
            && self
                .matchers
                .iter()
                .zip(arguments)
                .zip(self.method.params())
                .all(|((matcher, value), param)| matcher.matches(value, param.ty()))
    }

    /// Returns `true` if `other` describes exactly the same calls.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.method == other.method
            && self.matchers.len() == other.matchers.len()
            && self
                .matchers
                .iter()
                .zip(&other.matchers)
                .all(|(a, b)| a.same_as(&**b))
    }
}

impl Display for InvocationShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} m => m.{}(",
            self.method.declaring_type(),
            self.method.name()
        )?;

        for (index, matcher) in self.matchers.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{matcher}")?;
        }

        write!(f, ")")
    }
}

impl Debug for InvocationShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "InvocationShape({self})")
    }
}
