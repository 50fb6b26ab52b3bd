//! # Dependency values
//!
//! An effect is re-run when its dependency list changes. Lists are compared
//! shallowly: two lists are equal when they are the same allocation, or when
//! they have the same length and every element is the *same* value.
//!
//! "Same" follows identity rules rather than structural equality:
//!
//! - primitives (`Bool`, `Int`, `Float`, `Str`, `Null`, `Undefined`) compare
//!   by value, floats with IEEE `==` (so `NaN` never matches itself);
//! - `Ref` compares by pointer, two distinct `Rc`s holding equal data are
//!   different dependencies;
//! - `List` compares by allocation, a rebuilt list is a new dependency.
//!
//! ```rust
//! use retrofx_core::*;
//! use std::rc::Rc;
//!
//! let user = Rc::new(String::from("ada"));
//! let a = deps![1, "x", user.clone()];
//! let b = deps![1, "x", user];
//! assert!(shallow_equal(&a.resolve(), &b.resolve()));
//! ```

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// An ordered dependency sequence. Identity is the allocation.
pub type DepList = Rc<[Dep]>;

/// A single comparison value inside a dependency list.
#[derive(Clone, Default)]
pub enum Dep {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Ref(Rc<dyn Any>),
    List(DepList),
}

impl Dep {
    /// Wraps an arbitrary value as an identity-compared dependency.
    pub fn object<T: 'static>(value: T) -> Self {
        Dep::Ref(Rc::new(value))
    }

    /// Builds a fresh list; each call yields a distinct allocation.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Dep>,
    {
        Dep::List(items.into_iter().map(Into::into).collect())
    }

    /// Strict identity between two values.
    pub fn same(&self, other: &Dep) -> bool {
        match (self, other) {
            (Dep::Undefined, Dep::Undefined) | (Dep::Null, Dep::Null) => true,
            (Dep::Bool(a), Dep::Bool(b)) => a == b,
            (Dep::Int(a), Dep::Int(b)) => a == b,
            (Dep::Float(a), Dep::Float(b)) => a == b,
            (Dep::Int(a), Dep::Float(b)) | (Dep::Float(b), Dep::Int(a)) => (*a as f64) == *b,
            (Dep::Str(a), Dep::Str(b)) => a == b,
            (Dep::Ref(a), Dep::Ref(b)) => Rc::ptr_eq(a, b),
            (Dep::List(a), Dep::List(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Falsy values force an effect to re-run on every update.
    ///
    /// `Undefined`, `Null`, `false`, `0`, `0.0`, `NaN` and `""` are falsy.
    /// Every list is truthy, including an empty one.
    pub fn is_truthy(&self) -> bool {
        match self {
            Dep::Undefined | Dep::Null => false,
            Dep::Bool(b) => *b,
            Dep::Int(i) => *i != 0,
            Dep::Float(f) => *f != 0.0 && !f.is_nan(),
            Dep::Str(s) => !s.is_empty(),
            Dep::Ref(_) | Dep::List(_) => true,
        }
    }

    pub fn as_list(&self) -> Option<&DepList> {
        match self {
            Dep::List(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dep::Undefined => f.write_str("Undefined"),
            Dep::Null => f.write_str("Null"),
            Dep::Bool(b) => write!(f, "Bool({b})"),
            Dep::Int(i) => write!(f, "Int({i})"),
            Dep::Float(x) => write!(f, "Float({x})"),
            Dep::Str(s) => write!(f, "Str({s:?})"),
            Dep::Ref(r) => write!(f, "Ref({:p})", Rc::as_ptr(r)),
            Dep::List(l) => f.debug_list().entries(l.iter()).finish(),
        }
    }
}

impl From<()> for Dep {
    fn from(_: ()) -> Self {
        Dep::Undefined
    }
}

impl From<bool> for Dep {
    fn from(v: bool) -> Self {
        Dep::Bool(v)
    }
}

macro_rules! int_dep {
    ($($t:ty),*) => {
        $(impl From<$t> for Dep {
            fn from(v: $t) -> Self {
                Dep::Int(v as i64)
            }
        })*
    };
}

int_dep!(i8, i16, i32, i64, u8, u16, u32, usize, isize);

impl From<f32> for Dep {
    fn from(v: f32) -> Self {
        Dep::Float(v as f64)
    }
}

impl From<f64> for Dep {
    fn from(v: f64) -> Self {
        Dep::Float(v)
    }
}

impl From<&str> for Dep {
    fn from(v: &str) -> Self {
        Dep::Str(Rc::from(v))
    }
}

impl From<String> for Dep {
    fn from(v: String) -> Self {
        Dep::Str(Rc::from(v))
    }
}

impl From<Rc<str>> for Dep {
    fn from(v: Rc<str>) -> Self {
        Dep::Str(v)
    }
}

impl<T: 'static> From<Rc<T>> for Dep {
    fn from(v: Rc<T>) -> Self {
        Dep::Ref(v)
    }
}

impl From<DepList> for Dep {
    fn from(v: DepList) -> Self {
        Dep::List(v)
    }
}

impl<T: Into<Dep>> From<Option<T>> for Dep {
    fn from(v: Option<T>) -> Self {
        v.map_or(Dep::Null, Into::into)
    }
}

/// How an effect declares its dependencies.
#[derive(Clone, Default)]
pub enum Deps {
    /// No dependencies: the effect re-runs on every update.
    #[default]
    Absent,
    /// A fixed list, captured at declaration. Only valid during render.
    Array(DepList),
    /// Evaluated again on every mount/update pass.
    Fn(Rc<dyn Fn() -> Dep>),
}

impl Deps {
    pub fn from_fn(f: impl Fn() -> Dep + 'static) -> Self {
        Deps::Fn(Rc::new(f))
    }

    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Dep>,
    {
        Deps::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Deps::Array(_))
    }

    /// Resolves the declared form into the value compared this cycle.
    pub fn resolve(&self) -> Dep {
        match self {
            Deps::Absent => Dep::Undefined,
            Deps::Array(list) => Dep::List(list.clone()),
            Deps::Fn(f) => f(),
        }
    }
}

impl fmt::Debug for Deps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deps::Absent => f.write_str("Absent"),
            Deps::Array(l) => f.debug_tuple("Array").field(l).finish(),
            Deps::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

impl From<DepList> for Deps {
    fn from(v: DepList) -> Self {
        Deps::Array(v)
    }
}

impl From<Vec<Dep>> for Deps {
    fn from(v: Vec<Dep>) -> Self {
        Deps::Array(v.into())
    }
}

/// Builds an array-form [`Deps`] from values convertible into [`Dep`].
///
/// `deps![]` is an empty list, which never triggers a re-run after mount.
#[macro_export]
macro_rules! deps {
    () => {
        $crate::deps::Deps::Array(::std::rc::Rc::from(::std::vec::Vec::<$crate::deps::Dep>::new()))
    };
    ($($dep:expr),+ $(,)?) => {
        $crate::deps::Deps::Array(::std::rc::Rc::from(::std::vec![
            $($crate::deps::Dep::from($dep)),+
        ]))
    };
}
