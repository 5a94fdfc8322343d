use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid shortName='{0}'")]
    InvalidShortName(String),

    #[error("Invalid dataCube='{0}'")]
    InvalidDataCube(String),
}
