//! Registered conversion functions.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::CastError;
use crate::type_key::TypeKey;
use crate::value::DynValue;

/// Signature of a type-erased conversion function.
pub type ErasedFn = dyn Fn(DynValue) -> Result<DynValue, CastError> + Send + Sync;

/// A conversion function together with the ordered pair of types it was
/// registered for.
#[derive(Clone)]
pub struct Conversion {
    from: TypeKey,
    to: TypeKey,
    func: Arc<ErasedFn>,
}

impl Conversion {
    /// Wrap an infallible `A -> B` function.
    pub fn new<A, B, F>(f: F) -> Self
    where
        A: Any + Send,
        B: Any + Send,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Self {
            from: TypeKey::of::<A>(),
            to: TypeKey::of::<B>(),
            func: Arc::new(move |value: DynValue| {
                let input = value.downcast::<A>()?;
                Ok(DynValue::new(f(input)))
            }),
        }
    }

    /// Wrap a fallible `A -> Result<B, E>` function. An `Err` surfaces as
    /// [`CastError::ConversionFailed`].
    pub fn fallible<A, B, E, F>(f: F) -> Self
    where
        A: Any + Send,
        B: Any + Send,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
    {
        let from = TypeKey::of::<A>();
        let to = TypeKey::of::<B>();
        Self {
            from,
            to,
            func: Arc::new(move |value: DynValue| {
                let input = value.downcast::<A>()?;
                f(input)
                    .map(DynValue::new)
                    .map_err(|e| CastError::ConversionFailed {
                        from,
                        to,
                        source: Box::new(e),
                    })
            }),
        }
    }

    /// Wrap a function that already works on [`DynValue`]s.
    ///
    /// Nothing checks that `f` actually returns a `to` value; the caster
    /// reports [`CastError::TypeMismatch`] when it does not.
    pub fn erased<F>(from: TypeKey, to: TypeKey, f: F) -> Self
    where
        F: Fn(DynValue) -> Result<DynValue, CastError> + Send + Sync + 'static,
    {
        Self {
            from,
            to,
            func: Arc::new(f),
        }
    }

    pub fn from(&self) -> TypeKey {
        self.from
    }

    pub fn to(&self) -> TypeKey {
        self.to
    }

    pub fn apply(&self, value: DynValue) -> Result<DynValue, CastError> {
        (self.func)(value)
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}
