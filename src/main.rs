#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = skillorbit::run().await {
        eprintln!("skillorbit fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
