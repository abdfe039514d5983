use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("WalletError - NoAddress: no receive address available for {0}")]
    NoAddress(String),
}
