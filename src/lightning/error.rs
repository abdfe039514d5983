use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightningError {
    #[error("LightningError - Decode: {0}")]
    Decode(String),
    #[error("LightningError - CreateInvoice: {0}")]
    CreateInvoice(String),
}
