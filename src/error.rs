pub type PixmorphResult<T> = Result<T, PixmorphError>;

#[derive(thiserror::Error, Debug)]
pub enum PixmorphError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("acquisition error: {0}")]
    Acquisition(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmorphError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}
