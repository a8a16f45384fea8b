//! Type-erased values passed through conversion functions.

use std::any::Any;
use std::fmt;

use crate::error::CastError;
use crate::type_key::TypeKey;

/// A boxed value together with the [`TypeKey`] of its concrete type.
///
/// The key is taken from the generic parameter at construction, so it always
/// describes the boxed value.
pub struct DynValue {
    inner: Box<dyn Any + Send>,
    key: TypeKey,
}

impl DynValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            key: TypeKey::of::<T>(),
        }
    }

    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Unwrap into `T`, failing with [`CastError::TypeMismatch`] when the
    /// value holds another type.
    pub fn downcast<T: Any>(self) -> Result<T, CastError> {
        let actual = self.key;
        self.inner
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| CastError::TypeMismatch {
                expected: TypeKey::of::<T>(),
                actual,
            })
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynValue")
            .field("type", &self.key)
            .finish_non_exhaustive()
    }
}
