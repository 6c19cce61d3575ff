use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} range is empty: {start}..{end}")]
    EmptyRange {
        name: &'static str,
        start: f32,
        end: f32,
    },

    #[error("radius range must start above zero, got {0}")]
    NonPositiveRadius(f32),
}

pub type ParamsResult<T> = Result<T, ParamsError>;
