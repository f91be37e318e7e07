//! The [`method`](self) module describes the identity of a mocked method.

use std::any::Any;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::value::{Data, TypeInfo};

/// How an argument is passed to a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassBy {
    Value,
    Ref,

    /// The argument slot is written by the callee.
    Out,
}

/// A declared parameter of a [`MethodInfo`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    name: String,
    ty: TypeInfo,
    pass_by: PassBy,
}

impl ParamInfo {
    pub fn new<S: Into<String>>(name: S, ty: TypeInfo, pass_by: PassBy) -> Self {
        Self {
            name: name.into(),
            ty,
            pass_by,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ty(&self) -> &TypeInfo {
        &self.ty
    }

    #[must_use]
    pub fn pass_by(&self) -> PassBy {
        self.pass_by
    }
}

/// Distinguishes ordinary methods from event subscription accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    Regular,

    /// Adds the handler passed as first argument to the named event.
    EventAdd(String),

    /// Removes the handler passed as first argument from the named event.
    EventRemove(String),
}

/// Identity of a method of a mocked type.
///
/// ```
/// use dynmock::MethodInfo;
///
/// let method = MethodInfo::new("Calculator", "add")
///     .param::<i32>("a")
///     .param::<i32>("b")
///     .returns::<i32>();
///
/// assert_eq!("Calculator.add(i32 a, i32 b) -> i32", method.to_string());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    declaring_type: String,
    name: String,
    params: Vec<ParamInfo>,
    return_type: TypeInfo,
    is_variadic: bool,
    kind: MethodKind,
}

impl MethodInfo {
    /// Create a method without parameters that returns nothing.
    pub fn new<T, N>(declaring_type: T, name: N) -> Self
    where
        T: Into<String>,
        N: Into<String>,
    {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            params: Vec::new(),
            return_type: TypeInfo::void(),
            is_variadic: false,
            kind: MethodKind::Regular,
        }
    }

    /// Add a parameter of type `T` that is passed by value.
    #[must_use]
    pub fn param<T: Any>(self, name: &str) -> Self {
        self.param_with(ParamInfo::new(name, TypeInfo::of::<T>(), PassBy::Value))
    }

    /// Add a parameter of type `T` that is passed by reference.
    #[must_use]
    pub fn ref_param<T: Any>(self, name: &str) -> Self {
        self.param_with(ParamInfo::new(name, TypeInfo::of::<T>(), PassBy::Ref))
    }

    /// Add an out parameter of type `T`.
    #[must_use]
    pub fn out_param<T: Any>(self, name: &str) -> Self {
        self.param_with(ParamInfo::new(name, TypeInfo::of::<T>(), PassBy::Out))
    }

    /// Add a trailing parameter array with elements of type `element`. This
    /// makes the method variadic.
    #[must_use]
    pub fn params_array(mut self, name: &str, element: TypeInfo) -> Self {
        self.is_variadic = true;
        self.param_with(ParamInfo::new(
            name,
            TypeInfo::array_of(element),
            PassBy::Value,
        ))
    }

    #[must_use]
    pub fn param_with(mut self, param: ParamInfo) -> Self {
        self.params.push(param);

        self
    }

    /// Let the method return a `T`, with [`Default::default`] as the default
    /// value.
    #[must_use]
    pub fn returns<T: Data + Default>(self) -> Self {
        self.returns_type(TypeInfo::with_default::<T>())
    }

    #[must_use]
    pub fn returns_type(mut self, ty: TypeInfo) -> Self {
        self.return_type = ty;

        self
    }

    /// Turn this method into the accessor that subscribes to `event`.
    #[must_use]
    pub fn event_add<S: Into<String>>(mut self, event: S) -> Self {
        self.kind = MethodKind::EventAdd(event.into());

        self
    }

    /// Turn this method into the accessor that unsubscribes from `event`.
    #[must_use]
    pub fn event_remove<S: Into<String>>(mut self, event: S) -> Self {
        self.kind = MethodKind::EventRemove(event.into());

        self
    }

    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    #[must_use]
    pub fn return_type(&self) -> &TypeInfo {
        &self.return_type
    }

    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    #[must_use]
    pub fn kind(&self) -> &MethodKind {
        &self.kind
    }

    #[must_use]
    pub fn is_event_accessor(&self) -> bool {
        !matches!(self.kind, MethodKind::Regular)
    }

    /// Comma separated list of the parameter types.
    #[must_use]
    pub fn parameter_type_list(&self) -> String {
        type_list(self.params.iter().map(ParamInfo::ty))
    }
}

impl Display for MethodInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}(", self.declaring_type, self.name)?;

        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            match param.pass_by {
                PassBy::Value => (),
                PassBy::Ref => write!(f, "ref ")?,
                PassBy::Out => write!(f, "out ")?,
            }

            write!(f, "{} {}", param.ty.name(), param.name)?;
        }

        write!(f, ")")?;

        if !self.return_type.is_void() {
            write!(f, " -> {}", self.return_type.name())?;
        }

        Ok(())
    }
}

pub(crate) fn type_list<'a, I>(types: I) -> String
where
    I: IntoIterator<Item = &'a TypeInfo>,
{
    types
        .into_iter()
        .map(TypeInfo::name)
        .collect::<Vec<_>>()
        .join(", ")
}
