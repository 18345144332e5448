use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("No capture for placeholder {placeholder} at byte {offset}")]
    LookupMiss { placeholder: String, offset: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
