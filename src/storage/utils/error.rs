// Error conversion helpers and wrapping macro for Snafu-based errors
use crate::error::Error;

/// Convert different error types into our unified Error type.
pub trait IntoCloudkeepError {
    fn into_error(self) -> Error;
}

impl IntoCloudkeepError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl IntoCloudkeepError for opendal::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl IntoCloudkeepError for std::io::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

/// Macro to wrap a Result-producing expression into a Snafu variant with `source: Box<Error>`.
/// Example:
/// wrap_err!(op.await, BackupFailed { local_path: lp, remote_key: rk })?
#[macro_export]
macro_rules! wrap_err {
    ($expr:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {{
        $expr.map_err(|e| {
            let src: $crate::error::Error = $crate::storage::utils::error::IntoCloudkeepError::into_error(e);
            $crate::error::Error::$variant { $($field: $value),*, source: Box::new(src) }
        })
    }};
}
