use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid date `{value}`: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Cannot read region file `{path}`: {source}")]
    RegionFile {
        path: String,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AppError> for ndvipro::Error {
    fn from(err: AppError) -> Self {
        ndvipro::Error::Config(err.to_string())
    }
}

/// Process exit code for a failed run: configuration problems, empty
/// results, and data-source failures are distinguishable for callers.
pub fn exit_code(err: &ndvipro::Error) -> u8 {
    use ndvipro::Error;
    match err {
        Error::Config(_) | Error::InvalidArgument { .. } | Error::Region(_) => 2,
        Error::EmptyInput => 3,
        Error::Catalog(_) => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_failure_classes() {
        assert_eq!(exit_code(&ndvipro::Error::Config("bad".into())), 2);
        assert_eq!(exit_code(&ndvipro::Error::EmptyInput), 3);
        assert_eq!(
            exit_code(&ndvipro::Error::Catalog(
                ndvipro::CatalogError::Parse("x".into())
            )),
            4
        );
        assert_eq!(exit_code(&ndvipro::Error::Cancelled), 1);
    }
}
