//! Closed sets of error types and the operations on results over them.
//!
//! A fallible operation returns `Result<T, E>` where `E` is either a single
//! error type or an *error set*: an enum declared with [`error_set!`] whose
//! variants each wrap one distinct error type. The macro generates:
//!
//! - `From<Member>` for every member, so `?` lifts a single error into any set
//!   that declares it;
//! - [`Member`] impls, so callers can ask for the error of one concrete type;
//! - a [`SubsetOf`] impl that holds for every set containing all the members;
//! - optional `From<Subset>` impls (`widen from { .. }`) so `?` propagates a
//!   smaller set into a larger one.
//!
//! [`narrow_error_set!`] declares what is left of a set once one member is
//! removed. [`ErrorOrExt::map_error`] uses it to fold that member into another
//! one and return a strictly smaller set.
//!
//! # Invariants
//!
//! - A set is closed. Every member type appears at most once, otherwise the
//!   generated `From` impls conflict.
//! - Propagating into a set that does not contain the error type does not
//!   compile.
//! - `Member<S>` holds reflexively, so a result over a single error type
//!   answers the same accessors as one over a set.
//!
//! ```rust
//! use streamcore::{ErrorOrExt, OsError, error_set};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("quota of {0} exceeded")]
//! struct QuotaExceeded(u32);
//!
//! error_set! {
//!     #[derive(Debug, thiserror::Error)]
//!     enum JobError {
//!         #[error(transparent)]
//!         Os(OsError),
//!         #[error(transparent)]
//!         Quota(QuotaExceeded),
//!     }
//! }
//!
//! fn open() -> Result<u32, OsError> {
//!     Err(OsError::new("open", 2))
//! }
//!
//! fn run() -> Result<u32, JobError> {
//!     let handle = open()?;
//!     if handle > 10 {
//!         return Err(QuotaExceeded(10).into());
//!     }
//!     Ok(handle)
//! }
//!
//! let result = run();
//! assert!(result.is_error_of_type::<OsError>());
//! assert_eq!(result.error_of_type::<OsError>().map(|e| e.code), Some(2));
//! ```

use core::{fmt, panic::Location};

/// A value that is either a success `T` or one error out of `E`.
pub type ErrorOr<T, E> = Result<T, E>;

/// A closed set of error types declared with [`error_set!`].
pub trait ErrorSet: Sized {
    /// Number of member types in the set.
    const ARITY: usize;
}

/// `Self` is one of the alternatives of the error set `S`.
pub trait Member<S>: Sized {
    /// Wraps `self` into the set.
    fn inject(self) -> S;

    /// Borrows the held error if it is of type `Self`.
    fn project(set: &S) -> Option<&Self>;

    /// Moves the held error out if it is of type `Self`, handing the set back
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns the untouched set when another member is active.
    fn extract(set: S) -> Result<Self, S>;
}

impl<S> Member<S> for S {
    #[inline]
    fn inject(self) -> S {
        self
    }

    #[inline]
    fn project(set: &S) -> Option<&Self> {
        Some(set)
    }

    #[inline]
    fn extract(set: S) -> Result<Self, S> {
        Ok(set)
    }
}

/// Every member of `Self` is also a member of `Sup`.
///
/// Implemented by [`error_set!`] for every `Sup` that satisfies the member
/// bounds, so the relation is checked at compile time.
pub trait SubsetOf<Sup>: Sized {
    /// Re-packages the active error into the superset.
    fn widen(self) -> Sup;
}

/// Removing the member `X` from `Self` leaves [`Remove::Rest`].
pub trait Remove<X>: Sized {
    /// The set without `X`.
    type Rest;

    /// Splits off `X`.
    ///
    /// # Errors
    ///
    /// Returns the active error re-packaged into [`Remove::Rest`] when it is
    /// not an `X`.
    fn split(self) -> Result<X, Self::Rest>;
}

/// Accessors and combinators for results over error sets.
pub trait ErrorOrExt<T, E>: Sized {
    /// Whether an error is held.
    fn is_error(&self) -> bool;

    /// Borrows the held error.
    fn error(&self) -> Option<&E>;

    /// Borrows the success value.
    fn value(&self) -> Option<&T>;

    /// Whether the held error is of type `X`.
    fn is_error_of_type<X: Member<E>>(&self) -> bool;

    /// Borrows the held error if it is of type `X`.
    fn error_of_type<X: Member<E>>(&self) -> Option<&X>;

    /// Moves the held error out if it is of type `X`.
    fn release_error_of_type<X: Member<E>>(self) -> Option<X>;

    /// Returns the success value, treating any error as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the error and the caller's location when an error is held.
    fn must(self) -> T
    where
        E: fmt::Display;

    /// Folds the member `X` into another member `Y` of the remaining set.
    ///
    /// # Errors
    ///
    /// Returns the error re-packaged into the smaller set.
    fn map_error<X, Y, F>(self, mapper: F) -> Result<T, E::Rest>
    where
        E: Remove<X>,
        F: FnOnce(X) -> Y,
        Y: Member<E::Rest>;

    /// Re-packages the error into a superset.
    ///
    /// # Errors
    ///
    /// Returns the error inside `Sup`.
    fn widen_error<Sup>(self) -> Result<T, Sup>
    where
        E: SubsetOf<Sup>;
}

impl<T, E> ErrorOrExt<T, E> for Result<T, E> {
    #[inline]
    fn is_error(&self) -> bool {
        self.is_err()
    }

    #[inline]
    fn error(&self) -> Option<&E> {
        self.as_ref().err()
    }

    #[inline]
    fn value(&self) -> Option<&T> {
        self.as_ref().ok()
    }

    #[inline]
    fn is_error_of_type<X: Member<E>>(&self) -> bool {
        self.error_of_type::<X>().is_some()
    }

    #[inline]
    fn error_of_type<X: Member<E>>(&self) -> Option<&X> {
        self.as_ref().err().and_then(<X as Member<E>>::project)
    }

    #[inline]
    fn release_error_of_type<X: Member<E>>(self) -> Option<X> {
        self.err().and_then(|error| <X as Member<E>>::extract(error).ok())
    }

    #[track_caller]
    fn must(self) -> T
    where
        E: fmt::Display,
    {
        match self {
            Ok(value) => value,
            Err(error) => {
                let location = Location::caller();
                tracing::error!(%location, %error, "unhandled error");
                panic!("unhandled error at {location}: {error}");
            }
        }
    }

    fn map_error<X, Y, F>(self, mapper: F) -> Result<T, E::Rest>
    where
        E: Remove<X>,
        F: FnOnce(X) -> Y,
        Y: Member<E::Rest>,
    {
        self.map_err(|error| match error.split() {
            Ok(removed) => <Y as Member<E::Rest>>::inject(mapper(removed)),
            Err(rest) => rest,
        })
    }

    #[inline]
    fn widen_error<Sup>(self) -> Result<T, Sup>
    where
        E: SubsetOf<Sup>,
    {
        self.map_err(SubsetOf::<Sup>::widen)
    }
}

/// Declares a closed error set.
///
/// Each variant wraps exactly one error type. Attributes on the enum and on
/// the variants are kept, so `thiserror::Error` can be derived with
/// `#[error(transparent)]` variants.
///
/// A trailing `widen from { A, B }` clause adds `From<A>` and `From<B>` for
/// sets `A` and `B` whose members all belong to the declared set.
///
/// ```rust
/// use streamcore::{OsError, ParseError, TextError, error_set};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("unsupported version {0}")]
/// struct Unsupported(u8);
///
/// error_set! {
///     #[derive(Debug, thiserror::Error)]
///     pub enum LoadError {
///         #[error(transparent)]
///         Os(OsError),
///         #[error(transparent)]
///         Parse(ParseError),
///         #[error(transparent)]
///         Version(Unsupported),
///     }
///     widen from { TextError }
/// }
///
/// fn header() -> Result<(), TextError> {
///     Err(OsError::new("read", 5).into())
/// }
///
/// fn load() -> Result<(), LoadError> {
///     header()?;
///     Err(Unsupported(9).into())
/// }
///
/// assert!(matches!(load(), Err(LoadError::Os(_))));
/// ```
#[macro_export]
macro_rules! error_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
        $( widen from { $($sub:ident),+ $(,)? } )?
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $crate::ErrorSet for $name {
            const ARITY: usize = [$(stringify!($variant)),+].len();
        }

        $(
            impl ::core::convert::From<$ty> for $name {
                #[inline]
                fn from(error: $ty) -> Self {
                    Self::$variant(error)
                }
            }

            impl $crate::Member<$name> for $ty {
                #[inline]
                fn inject(self) -> $name {
                    $name::$variant(self)
                }

                #[inline]
                fn project(set: &$name) -> ::core::option::Option<&Self> {
                    match set {
                        $name::$variant(error) => ::core::option::Option::Some(error),
                        #[allow(unreachable_patterns)]
                        _ => ::core::option::Option::None,
                    }
                }

                #[inline]
                fn extract(set: $name) -> ::core::result::Result<Self, $name> {
                    match set {
                        $name::$variant(error) => ::core::result::Result::Ok(error),
                        #[allow(unreachable_patterns)]
                        other => ::core::result::Result::Err(other),
                    }
                }
            }
        )+

        impl<Sup> $crate::SubsetOf<Sup> for $name
        where
            $($ty: $crate::Member<Sup>,)+
        {
            #[inline]
            fn widen(self) -> Sup {
                match self {
                    $($name::$variant(error) => $crate::Member::<Sup>::inject(error),)+
                }
            }
        }

        $($(
            impl ::core::convert::From<$sub> for $name {
                #[inline]
                fn from(error: $sub) -> Self {
                    $crate::SubsetOf::<$name>::widen(error)
                }
            }
        )+)?
    };
}

/// Declares what remains of an error set once one member is removed.
///
/// The kept variants must be listed exhaustively and each one must be a
/// member of the remaining type, both checked by the compiler.
///
/// ```rust
/// use streamcore::{ErrorOrExt, OsError, ParseError, SourceRange, TextError};
///
/// let failed: Result<(), TextError> = Err(OsError::new("read", 5).into());
/// let narrowed: Result<(), ParseError> =
///     failed.map_error(|os: OsError| ParseError::new(os.function, SourceRange::default()));
/// assert_eq!(narrowed.unwrap_err().message, "read");
/// ```
#[macro_export]
macro_rules! narrow_error_set {
    ($set:ident: $removed:ident($removed_ty:ty) => $rest:ty { $($kept:ident),+ $(,)? }) => {
        impl $crate::Remove<$removed_ty> for $set {
            type Rest = $rest;

            #[inline]
            fn split(self) -> ::core::result::Result<$removed_ty, $rest> {
                match self {
                    $set::$removed(error) => ::core::result::Result::Ok(error),
                    $(
                        $set::$kept(error) => {
                            ::core::result::Result::Err($crate::Member::<$rest>::inject(error))
                        }
                    )+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::{OsError, ParseError, SourceRange, TextError};

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("budget {0} exhausted")]
    struct Budget(u32);

    crate::error_set! {
        #[derive(Debug, thiserror::Error)]
        enum TaskError {
            #[error(transparent)]
            Os(OsError),
            #[error(transparent)]
            Parse(ParseError),
            #[error(transparent)]
            Budget(Budget),
        }
        widen from { TextError }
    }

    crate::narrow_error_set!(TaskError: Budget(Budget) => TextError { Os, Parse });

    fn parse(text: &str) -> Result<u32, ParseError> {
        text.parse()
            .map_err(|_| ParseError::new(String::from("not a number"), SourceRange::default()))
    }

    fn budgeted(text: &str) -> Result<u32, TaskError> {
        let value = parse(text)?;
        if value > 100 {
            return Err(Budget(100).into());
        }
        Ok(value)
    }

    #[test]
    fn arity_counts_members() {
        assert_eq!(TaskError::ARITY, 3);
        assert_eq!(TextError::ARITY, 2);
    }

    #[test]
    fn single_error_answers_reflexively() {
        let result: Result<(), OsError> = Err(OsError::new("close", 9));
        assert!(result.is_error());
        assert!(result.is_error_of_type::<OsError>());
        assert_eq!(result.error().map(|e| e.code), Some(9));
        assert_eq!(result.release_error_of_type::<OsError>().map(|e| e.function), Some("close"));
    }

    #[test]
    fn accessors_select_the_active_member() {
        let result = budgeted("500");
        assert!(result.is_error_of_type::<Budget>());
        assert!(!result.is_error_of_type::<ParseError>());
        assert_eq!(result.error_of_type::<Budget>(), Some(&Budget(100)));
        assert_eq!(result.release_error_of_type::<OsError>(), None);

        let ok = budgeted("7");
        assert_eq!(ok.value(), Some(&7));
        assert!(ok.error().is_none());
    }

    #[test]
    fn widening_keeps_the_concrete_error() {
        let text: Result<(), TextError> = Err(OsError::new("read", 4).into());
        let task = text.widen_error::<TaskError>();
        assert_eq!(task.error_of_type::<OsError>(), Some(&OsError::new("read", 4)));
    }

    #[test]
    fn narrowing_folds_the_removed_member() {
        let narrowed = budgeted("500").map_error(|budget: Budget| {
            ParseError::new(alloc::format!("over budget {}", budget.0), SourceRange::default())
        });
        let error = narrowed.release_error_of_type::<ParseError>();
        assert_eq!(error.map(|e| e.message), Some(String::from("over budget 100")));

        let untouched = budgeted("x").map_error(|_: Budget| OsError::new("unused", 0));
        assert!(untouched.is_error_of_type::<ParseError>());
    }

    #[test]
    fn must_returns_the_value() {
        assert_eq!(budgeted("42").must(), 42);
    }

    #[test]
    #[should_panic(expected = "unhandled error")]
    fn must_panics_on_error() {
        budgeted("nope").must();
    }
}
