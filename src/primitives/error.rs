use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimitivesError {
    #[error("PrimitivesError - HexDecode: {0}")]
    HexDecode(#[from] hex::FromHexError),
    #[error("PrimitivesError - InvalidKeyLength: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),
}
