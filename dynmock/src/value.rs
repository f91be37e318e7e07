//! The [`value`](self) module contains the dynamic value model that is passed
//! between a proxy and its [`Mock`](crate::Mock).

use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Values that can still be compared and printed after they were type erased.
///
/// Implemented for every type that is [`Debug`], [`PartialEq`], [`Send`] and
/// [`Sync`].
pub trait Data: Any + Debug + PartialEq + Send + Sync {}

impl<T> Data for T where T: Any + Debug + PartialEq + Send + Sync {}

type EqFn = fn(&dyn Any, &dyn Any) -> bool;
type FmtFn = fn(&dyn Any, &mut Formatter<'_>) -> FmtResult;

/// Type erased argument or return value of a mocked call.
///
/// Cloning a value is cheap, the payload is shared. A value may also be `null`,
/// which is what the framework produces when it needs a value of a type that
/// has no default.
#[derive(Clone)]
pub struct Value {
    inner: Option<Arc<dyn Any + Send + Sync>>,
    type_name: &'static str,
    eq: Option<EqFn>,
    fmt: Option<FmtFn>,
}

impl Value {
    /// Wrap `value`. Passing a [`Value`] returns it unchanged.
    pub fn new<T: Data>(value: T) -> Self {
        if let Some(value) = (&value as &dyn Any).downcast_ref::<Value>() {
            return value.clone();
        }

        Self {
            inner: Some(Arc::new(value)),
            type_name: type_name::<T>(),
            eq: Some(eq_erased::<T>),
            fmt: Some(fmt_erased::<T>),
        }
    }

    /// Wrap a value that can neither be compared nor printed, like a closure.
    ///
    /// Opaque values are only equal to clones of themselves.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
            type_name: type_name::<T>(),
            eq: None,
            fmt: None,
        }
    }

    /// The `null` value.
    #[must_use]
    pub fn null() -> Self {
        Self {
            inner: None,
            type_name: "null",
            eq: None,
            fmt: None,
        }
    }

    /// The value returned by methods without a return value.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Create an array value (a `Vec<Value>`) from the passed `items`.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::new(items.into_iter().collect::<Vec<_>>())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_deref().map_or(false, |inner| inner.is::<T>())
    }

    /// Type id of the wrapped value, `None` for `null`.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        self.inner.as_deref().map(|inner| (*inner).type_id())
    }

    /// Name of the wrapped type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_deref()?.downcast_ref()
    }

    /// Clone the wrapped value out, if it is a `T`.
    #[must_use]
    pub fn cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Elements of the value if it is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        self.downcast_ref::<Vec<Value>>().map(Vec::as_slice)
    }

    /// Access an argument as `A`. A parameter declared as [`Value`] receives
    /// the value itself.
    pub(crate) fn view<A: Any>(&self) -> Option<&A> {
        (self as &dyn Any)
            .downcast_ref::<A>()
            .or_else(|| self.downcast_ref::<A>())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                if Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>() {
                    return true;
                }

                match self.eq {
                    Some(eq) => eq(&**a, &**b),
                    None => false,
                }
            }
            _ => false,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (&self.inner, self.fmt) {
            (None, _) => write!(f, "null"),
            (Some(inner), Some(fmt)) => fmt(&**inner, f),
            (Some(_), None) => write!(f, "<{}>", self.type_name),
        }
    }
}

fn eq_erased<T: Data>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn fmt_erased<T: Data>(value: &dyn Any, f: &mut Formatter<'_>) -> FmtResult {
    match value.downcast_ref::<T>() {
        Some(value) => value.fmt(f),
        None => write!(f, "<{}>", type_name::<T>()),
    }
}

fn default_erased<T: Data + Default>() -> Value {
    Value::new(T::default())
}

fn empty_array() -> Value {
    Value::array([])
}

/// Describes what kind of type a [`TypeInfo`] stands for.
#[derive(Clone)]
pub enum TypeKind {
    /// The unit type of methods that return nothing.
    Void,

    /// Any value is accepted (the [`Value`] type itself).
    Any,

    /// An ordinary type.
    Plain,

    /// An array (`Vec<Value>`) with the given element type.
    Array(Box<TypeInfo>),

    /// A callable type. Mocks of delegates have no base implementation.
    Delegate,

    /// Stands for every type the predicate accepts.
    Matcher(fn(TypeId) -> bool),
}

/// Declared type of a parameter, a return value or a mocked entity.
#[derive(Clone)]
pub struct TypeInfo {
    id: TypeId,
    name: Cow<'static, str>,
    kind: TypeKind,
    default: Option<fn() -> Value>,
}

impl TypeInfo {
    /// Describe `T`. The described type has no default value, use
    /// [`with_default`](Self::with_default) for that.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        let id = TypeId::of::<T>();
        if id == TypeId::of::<Value>() {
            return Self::any();
        }
        if id == TypeId::of::<()>() {
            return Self::void();
        }

        Self {
            id,
            name: Cow::Borrowed(type_name::<T>()),
            kind: TypeKind::Plain,
            default: None,
        }
    }

    /// Describe `T` and use [`Default::default`] as its default value.
    #[must_use]
    pub fn with_default<T: Data + Default>() -> Self {
        Self {
            default: Some(default_erased::<T>),
            ..Self::of::<T>()
        }
    }

    #[must_use]
    pub fn void() -> Self {
        Self {
            id: TypeId::of::<()>(),
            name: Cow::Borrowed("()"),
            kind: TypeKind::Void,
            default: Some(Value::unit),
        }
    }

    /// The type of a parameter or return value that accepts any [`Value`].
    #[must_use]
    pub fn any() -> Self {
        Self {
            id: TypeId::of::<Value>(),
            name: Cow::Borrowed("Value"),
            kind: TypeKind::Any,
            default: Some(Value::null),
        }
    }

    /// An array of `element`. Its default is the empty array.
    #[must_use]
    pub fn array_of(element: TypeInfo) -> Self {
        Self {
            id: TypeId::of::<Vec<Value>>(),
            name: Cow::Owned(format!("[{}]", element.name)),
            kind: TypeKind::Array(Box::new(element)),
            default: Some(empty_array),
        }
    }

    /// Describe a callable type `F`.
    #[must_use]
    pub fn delegate<F: Any>() -> Self {
        Self {
            kind: TypeKind::Delegate,
            ..Self::of::<F>()
        }
    }

    /// A type matcher: stands for every type accepted by `predicate`.
    #[must_use]
    pub fn matching(name: &'static str, predicate: fn(TypeId) -> bool) -> Self {
        Self {
            id: TypeId::of::<TypeKind>(),
            name: Cow::Borrowed(name),
            kind: TypeKind::Matcher(predicate),
            default: Some(Value::null),
        }
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    #[must_use]
    pub fn is_delegate(&self) -> bool {
        matches!(self.kind, TypeKind::Delegate)
    }

    #[must_use]
    pub fn is_type_matcher(&self) -> bool {
        matches!(self.kind, TypeKind::Matcher(_))
    }

    /// Element type if this is an array type.
    #[must_use]
    pub fn element_type(&self) -> Option<&TypeInfo> {
        match &self.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Default value of this type, if it has one.
    #[must_use]
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|default| default())
    }

    /// Returns `true` if a value of type `other` may be used where `self` is
    /// expected.
    #[must_use]
    pub fn is_assignable_from(&self, other: &TypeInfo) -> bool {
        match (&self.kind, &other.kind) {
            (TypeKind::Any, _) => true,
            (TypeKind::Matcher(predicate), _) => predicate(other.id),
            (TypeKind::Array(expected), TypeKind::Array(actual)) => {
                expected.is_assignable_from(actual)
            }
            _ => self.id == other.id,
        }
    }

    /// Returns `true` if `value` is an instance of this type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            TypeKind::Any => true,
            TypeKind::Matcher(predicate) => value.type_id().map_or(false, predicate),
            _ => value.type_id() == Some(self.id),
        }
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Debug for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}
