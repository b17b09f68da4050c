#[tokio::main]
async fn main() -> anyhow::Result<()> {
    petcare_server::start_server().await
}
