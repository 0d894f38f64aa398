use std::fmt::Display;

use super::FacadeError;

pub type FacadeResult<R> = Result<R, FacadeError>;

pub(crate) trait FacadeResultHelper<T> {
    fn with_context<D, O>(self, op: O) -> FacadeResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D;
}

impl<T, E> FacadeResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn with_context<D, O>(self, op: O) -> FacadeResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.map_err(|e| FacadeError::Default(format!("{}: {e}", op())))
    }
}
