pub type StripFxResult<T> = Result<T, StripFxError>;

#[derive(thiserror::Error, Debug)]
pub enum StripFxError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("pipeline error: {0}")]
    Pipeline(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StripFxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StripFxError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            StripFxError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            StripFxError::pipeline("x")
                .to_string()
                .contains("pipeline error:")
        );
        assert!(StripFxError::asset("x").to_string().contains("asset error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StripFxError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
