#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slashpay::cli::run().await
}
