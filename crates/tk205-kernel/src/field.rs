//! Presence-tracking field values.

/// A bound field: either supplied by the document or absent.
///
/// The absent arm carries the declared default, so a field always has a
/// readable value while the document's silence stays distinguishable from
/// an explicit zero.
///
/// Presence is decided when the owning object is bound. The variants are
/// public, so nothing stops a caller from reassigning one afterwards; the
/// binding entry points ([`BindingContext::bind`](crate::BindingContext::bind)
/// and the envelope) only ever initialize a fresh default value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Present(T),
    Absent(T),
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The supplied value, or the default when absent.
    pub fn value(&self) -> &T {
        match self {
            Self::Present(value) | Self::Absent(value) => value,
        }
    }

    /// The supplied value only.
    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent(_) => None,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Present(value) | Self::Absent(value) => value,
        }
    }

    /// Transform the value, keeping presence.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Present(value) => Field::Present(f(value)),
            Self::Absent(value) => Field::Absent(f(value)),
        }
    }
}

impl<T: Default> Field<T> {
    pub fn absent() -> Self {
        Self::Absent(T::default())
    }
}

impl<T: Default> Default for Field<T> {
    fn default() -> Self {
        Self::absent()
    }
}
