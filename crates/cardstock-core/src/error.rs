pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("palette has no \"default\" entry")]
    MissingDefaultColor,

    #[error("invalid palette JSON: {0}")]
    PaletteJson(#[from] serde_json::Error),
}
