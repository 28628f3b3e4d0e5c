//! Result of a complete retry sequence.

use std::fmt;

use super::error::RetryExhausted;

/// Either the accepted value or the exhaustion that ended the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation returned a value the predicate accepted.
    Success(T),
    /// The attempt budget ran out.
    Failure(RetryExhausted),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The value, or the exhaustion error.
    pub fn get(self) -> Result<T, RetryExhausted> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(e) => Err(e),
        }
    }

    /// The value, or `default` on failure.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Outcome::Success(v) => v,
            Outcome::Failure(_) => default,
        }
    }

    /// The value, or one computed from the exhaustion error.
    pub fn get_or_else_with<F>(self, f: F) -> T
    where
        F: FnOnce(RetryExhausted) -> T,
    {
        match self {
            Outcome::Success(v) => v,
            Outcome::Failure(e) => f(e),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RetryExhausted> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<T, RetryExhausted> {
        self.get()
    }
}

impl<T> From<Outcome<T>> for Result<T, RetryExhausted> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.get()
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(v) => write!(f, "Success({})", v),
            Outcome::Failure(e) => write!(f, "Failure({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> Outcome<String> {
        Outcome::Failure(RetryExhausted::new(10, Some("boom".into())))
    }

    #[test]
    fn success_accessors() {
        let o = Outcome::Success("hello".to_string());
        assert!(o.is_success());
        assert_eq!(o.value().map(String::as_str), Some("hello"));
        assert!(o.error().is_none());
        assert_eq!(o.to_string(), "Success(hello)");
        assert_eq!(o.clone().get_or_else("foo".into()), "hello");
        assert_eq!(o.get().unwrap(), "hello");
    }

    #[test]
    fn failure_accessors() {
        let o = failure();
        assert!(o.is_failure());
        assert!(o.value().is_none());
        assert_eq!(o.error().map(|e| e.attempts), Some(10));
        assert_eq!(o.to_string(), "Failure(Retry, max attempts reached: 10.)");
        assert_eq!(o.clone().get_or_else("foo".into()), "foo");
        assert_eq!(
            o.clone().get_or_else_with(|e| format!("gave up after {}", e.attempts)),
            "gave up after 10"
        );
        let err = o.get().unwrap_err();
        assert_eq!(err.to_string(), "Retry, max attempts reached: 10.");
    }

    #[test]
    fn converts_into_result() {
        let r: Result<String, RetryExhausted> = failure().into();
        assert!(r.is_err());
        let r: Result<i32, RetryExhausted> = Outcome::Success(7).into_result();
        assert_eq!(r, Ok(7));
    }
}
