use serde::{Deserialize, Serialize};

/// Where a piece of reference data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Loaded from the backend API
    Remote,
    /// Built-in sample data used while the backend is unreachable
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Remote => "remote",
            Source::Fallback => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Source::Fallback)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data tagged with its [`Source`], so callers never mix sample and live data silently
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn remote(data: T) -> Self {
        Self {
            data,
            source: Source::Remote,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: Source::Fallback,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            source: self.source,
        }
    }
}

impl<T: Default> Default for Sourced<T> {
    fn default() -> Self {
        Self::remote(T::default())
    }
}
