//! Error context captured by a log call.

use std::error::Error;

/// The error side of a log call.
///
/// `Clear` records that the call explicitly had no error; `Raised` carries a
/// captured error. Passing no `ExcInfo` at all leaves the record without
/// error details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcInfo {
    Clear,
    Raised { type_name: String, value: String, traceback: String },
}

impl ExcInfo {
    /// Captures a typed error along with its chain of sources.
    pub fn capture<E>(err: &E) -> Self
    where
        E: Error + 'static,
    {
        let type_name = short_type_name(std::any::type_name::<E>());
        let mut traceback = format!("{type_name}: {err}");

        let mut causes = std::iter::successors(err.source(), |e| (*e).source()).peekable();
        if causes.peek().is_some() {
            traceback.push_str("\n\nCaused by:");
            for (i, cause) in causes.enumerate() {
                traceback.push_str(&format!("\n    {i}: {cause}"));
            }
        }

        ExcInfo::Raised {
            type_name,
            value: err.to_string(),
            traceback,
        }
    }

    /// Captures an `anyhow` error; the trace is its debug rendering, which
    /// includes the context chain and, when enabled, the backtrace.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        ExcInfo::Raised {
            type_name: "anyhow::Error".to_string(),
            value: err.to_string(),
            traceback: format!("{err:?}"),
        }
    }
}

/// `core::num::error::ParseIntError` -> `ParseIntError`; generics are dropped.
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("could not load state")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn captures_type_value_and_sources() {
        let err = Outer(std::io::Error::other("disk on fire"));

        let ExcInfo::Raised { type_name, value, traceback } = ExcInfo::capture(&err) else {
            panic!("expected a raised error");
        };

        assert_eq!(type_name, "Outer");
        assert_eq!(value, "could not load state");
        assert!(traceback.starts_with("Outer: could not load state"));
        assert!(traceback.contains("0: disk on fire"));
    }

    #[derive(Debug)]
    struct Wrapper(Outer);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("startup failed")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn walks_the_whole_source_chain() {
        let err = Wrapper(Outer(std::io::Error::other("disk on fire")));

        let ExcInfo::Raised { type_name, traceback, .. } = ExcInfo::capture(&err) else {
            panic!("expected a raised error");
        };

        assert_eq!(type_name, "Wrapper");
        assert!(traceback.contains("0: could not load state"));
        assert!(traceback.contains("1: disk on fire"));
    }

    #[test]
    fn captures_std_errors_without_sources() {
        let err = "x".parse::<i32>().unwrap_err();

        let ExcInfo::Raised { type_name, traceback, .. } = ExcInfo::capture(&err) else {
            panic!("expected a raised error");
        };

        assert_eq!(type_name, "ParseIntError");
        assert!(!traceback.contains("Caused by"));
    }

    #[test]
    fn captures_anyhow_context() {
        let err = anyhow::anyhow!("socket closed").context("sending report");

        let ExcInfo::Raised { value, traceback, .. } = ExcInfo::from_anyhow(&err) else {
            panic!("expected a raised error");
        };

        assert_eq!(value, "sending report");
        assert!(traceback.contains("socket closed"));
    }

    #[test]
    fn short_names_drop_paths_and_generics() {
        assert_eq!(short_type_name("alloc::boxed::Box<dyn core::error::Error>"), "Box");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
