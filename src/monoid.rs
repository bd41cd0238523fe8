//! Associative combining operators paired with a two-sided identity.

use num_traits::{Bounded, Zero};

/// An associative binary operator `f` together with its identity.
///
/// The library assumes, but cannot check, that `f` is associative and
/// that `identity` is a true two-sided unit for it. Reductions fold
/// blocks from their first element and splice the identity in only where
/// the identity law makes it harmless, so a semigroup with a fake
/// identity will produce wrong answers.
pub struct Monoid<T, F> {
    /// The combining operator.
    pub f: F,
    /// Its two-sided identity.
    pub identity: T,
}

impl<T, F> Monoid<T, F>
where
    F: Fn(T, T) -> T,
{
    /// Pair an operator with its identity.
    pub fn new(f: F, identity: T) -> Self {
        Monoid { f, identity }
    }
}

impl<T: Clone, F: Clone> Clone for Monoid<T, F> {
    fn clone(&self) -> Self {
        Monoid {
            f: self.f.clone(),
            identity: self.identity.clone(),
        }
    }
}

/// Addition with zero.
pub fn addm<T: Zero>() -> Monoid<T, impl Fn(T, T) -> T> {
    Monoid::new(|a: T, b: T| a + b, T::zero())
}

/// Maximum, with the type's minimum value as identity.
pub fn maxm<T: Ord + Bounded>() -> Monoid<T, impl Fn(T, T) -> T> {
    Monoid::new(|a: T, b: T| a.max(b), T::min_value())
}

/// Minimum, with the type's maximum value as identity.
pub fn minm<T: Ord + Bounded>() -> Monoid<T, impl Fn(T, T) -> T> {
    Monoid::new(|a: T, b: T| a.min(b), T::max_value())
}
