//! Type erased closures that remember the parameter and return types they
//! were declared with, so their shape can be checked against a method once,
//! when they are attached to a setup.

use std::any::{Any, TypeId};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::error::Error;
use crate::invocation::Invocation;
use crate::method::{type_list, ParamInfo};
use crate::value::{Data, TypeInfo, TypeKind, Value};

/// Arguments a [`Delegate`] is called with.
#[derive(Clone, Copy)]
pub(crate) enum Args<'a> {
    /// The whole invocation is the only argument.
    Invocation(&'a Invocation),

    /// Positional argument values.
    Values(&'a [Value]),
}

impl<'a> Args<'a> {
    fn get<A: Any>(self, index: usize) -> Option<&'a A> {
        match self {
            Self::Invocation(invocation) if index == 0 => {
                (invocation as &dyn Any).downcast_ref::<A>()
            }
            Self::Invocation(_) => None,
            Self::Values(values) => values.get(index)?.view::<A>(),
        }
    }
}

/// How the arguments of an invocation are passed to a [`Delegate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallMode {
    /// The delegate takes no arguments.
    Nothing,

    /// The delegate takes the whole invocation.
    Invocation,

    /// The delegate takes the actual arguments of the call.
    Positional,
}

type Thunk = Arc<dyn Fn(Args<'_>) -> Option<Value> + Send + Sync>;

/// A closure together with its declared parameter and return types.
///
/// Delegates are created from closures taking their arguments by reference,
/// see [`IntoDelegate`].
#[derive(Clone)]
pub struct Delegate {
    params: Vec<TypeInfo>,
    return_type: TypeInfo,
    thunk: Thunk,
}

impl Delegate {
    pub(crate) fn new<F>(params: Vec<TypeInfo>, return_type: TypeInfo, thunk: F) -> Self
    where
        F: Fn(Args<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            params,
            return_type,
            thunk: Arc::new(thunk),
        }
    }

    #[must_use]
    pub fn params(&self) -> &[TypeInfo] {
        &self.params
    }

    #[must_use]
    pub fn return_type(&self) -> &TypeInfo {
        &self.return_type
    }

    /// Returns `true` if the only parameter of the delegate is an [`Invocation`].
    #[must_use]
    pub fn takes_invocation(&self) -> bool {
        matches!(&*self.params, [param] if param.id() == TypeId::of::<Invocation>())
    }

    /// Comma separated list of the parameter types.
    #[must_use]
    pub fn parameter_type_list(&self) -> String {
        type_list(&self.params)
    }

    /// Call the delegate with positional arguments. Returns `None` if the
    /// arguments do not fit the parameters.
    #[must_use]
    pub fn invoke(&self, args: &[Value]) -> Option<Value> {
        (self.thunk)(Args::Values(args))
    }

    /// Returns `true` if the parameter types of the delegate are exactly the
    /// passed parameter types. A `&Value` parameter stands in for any type.
    pub(crate) fn has_params(&self, params: &[ParamInfo]) -> bool {
        self.params.len() == params.len()
            && self.params.iter().zip(params).all(|(actual, expected)| {
                matches!(actual.kind(), TypeKind::Any) || actual.id() == expected.ty().id()
            })
    }

    pub(crate) fn call(&self, invocation: &Invocation, mode: CallMode) -> Result<Value, Error> {
        let args = match mode {
            CallMode::Nothing => Args::Values(&[]),
            CallMode::Invocation => Args::Invocation(invocation),
            CallMode::Positional => Args::Values(invocation.arguments()),
        };

        (self.thunk)(args).ok_or_else(|| Error::ArgumentTypeMismatch {
            invocation: invocation.to_string(),
            expected: self.parameter_type_list(),
        })
    }
}

impl Debug for Delegate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Delegate(fn({}) -> {})",
            self.parameter_type_list(),
            self.return_type.name()
        )
    }
}

/// Conversion of closures into [`Delegate`]s.
///
/// Implemented for closures with up to eight parameters that take their
/// arguments by reference, like `|a: &i32, b: &String| ...`. A closure that
/// takes a single `&Invocation` receives the whole invocation.
///
/// A `&Value` parameter accepts the argument of any parameter type as is.
/// Use it for arguments that may be `null`, which a typed parameter like
/// `&String` cannot receive.
pub trait IntoDelegate<Marker> {
    fn into_delegate(self) -> Delegate;
}

impl IntoDelegate<Delegate> for Delegate {
    fn into_delegate(self) -> Delegate {
        self
    }
}

macro_rules! impl_into_delegate {
    ($( $index:tt => $arg_name:ident: $arg_type:ident ),*) => {
        impl<F, R $( , $arg_type )*> IntoDelegate<(R, ($( $arg_type, )*))> for F
        where
            F: Fn($( &$arg_type ),*) -> R + Send + Sync + 'static,
            R: Data,
            $( $arg_type: Any, )*
        {
            fn into_delegate(self) -> Delegate {
                Delegate::new(
                    vec![$( TypeInfo::of::<$arg_type>() ),*],
                    TypeInfo::of::<R>(),
                    move |args: Args<'_>| {
                        $(
                            let $arg_name = args.get::<$arg_type>($index)?;
                        )*

                        Some(Value::new(self($( $arg_name ),*)))
                    },
                )
            }
        }
    };
}

impl_into_delegate!();
impl_into_delegate!(0 => a0: A0);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1, 2 => a2: A2);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1, 2 => a2: A2, 3 => a3: A3);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1, 2 => a2: A2, 3 => a3: A3, 4 => a4: A4);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1, 2 => a2: A2, 3 => a3: A3, 4 => a4: A4, 5 => a5: A5);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1, 2 => a2: A2, 3 => a3: A3, 4 => a4: A4, 5 => a5: A5, 6 => a6: A6);
impl_into_delegate!(0 => a0: A0, 1 => a1: A1, 2 => a2: A2, 3 => a3: A3, 4 => a4: A4, 5 => a5: A5, 6 => a6: A6, 7 => a7: A7);
