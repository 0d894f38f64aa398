use thiserror::Error;

pub(crate) mod result;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("{0}")]
    Default(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parsing error: {0}")]
    Parsing(String),

    #[error("Invalid details: {0}")]
    InvalidDetails(String),
}

impl From<serde_json::Error> for FacadeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parsing(e.to_string())
    }
}

impl From<toml::de::Error> for FacadeError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parsing(e.to_string())
    }
}

/// Construct a facade error from a string.
#[macro_export]
macro_rules! facade_error {
    ($msg:literal) => {
        $crate::FacadeError::Default(::core::format_args!($msg).to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::FacadeError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! facade_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::facade_error!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::facade_error!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::result::{FacadeResult, FacadeResultHelper};

    fn check_capacity(capacity: usize) -> FacadeResult<usize> {
        if capacity > 1_000_000 {
            facade_bail!("capacity {} exceeds {}", capacity, 1_000_000);
        }
        Ok(capacity)
    }

    #[test]
    fn test_error_macros() {
        let e = facade_error!("no backend");
        assert_eq!(e.to_string(), "no backend");
        let name = "mxlog.toml";
        let e = facade_error!("missing {name}");
        assert_eq!(e.to_string(), "missing mxlog.toml");

        assert_eq!(check_capacity(16).unwrap(), 16);
        let e = check_capacity(2_000_000).unwrap_err();
        assert_eq!(e.to_string(), "capacity 2000000 exceeds 1000000");
    }

    #[test]
    fn test_with_context() {
        let parsed: Result<u32, _> = "x".parse::<u32>();
        let e = parsed
            .with_context(|| "Unable to read capacity")
            .unwrap_err();
        assert!(e.to_string().starts_with("Unable to read capacity: "));
    }
}
