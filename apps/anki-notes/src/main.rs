#[tokio::main]
async fn main() -> anyhow::Result<()> {
    anki_notes::run().await
}
