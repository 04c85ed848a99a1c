use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("infinite {axis}-range delta")]
    InfiniteRangeDelta { axis: &'static str },

    #[error("nan {axis}-range delta")]
    NanRangeDelta { axis: &'static str },

    #[error("zero {axis}-range delta; there needs to be at least (2) values")]
    ZeroRangeDelta { axis: &'static str },

    #[error("please provide at least one series")]
    NoSeries,

    #[error("must have (1) visible series; make sure series styles are not all hidden")]
    NoVisibleSeries,

    #[error("invalid series `{name}`: {reason}")]
    InvalidSeries { name: String, reason: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("font error: {0}")]
    Font(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
