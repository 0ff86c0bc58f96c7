use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("request to '{endpoint}' raised an exception: {source}"))]
    RequestError {
        endpoint: String,
        source: Box<ureq::Error>,
    },
    #[snafu(display("{message}"))]
    ResponseError { message: String },
    #[snafu(display("{message}: {source}"))]
    ProviderError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("{prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("failed to load configuration from {path}: {source}"))]
    LoadError {
        path: String,
        source: config::ConfigError,
    },
    #[snafu(display("invalid configuration: {message}"))]
    ValidationError { message: String },
    #[snafu(display("{message}: {source}"))]
    PromptError {
        message: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
