use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum QrCraftError {
    #[error("Code not found: {0}")]
    CodeNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("QR encoding error: {0:?}")]
    Encode(qrcode::types::QrError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No QR code found in image")]
    NoCodeFound,

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QrCraftError>;
