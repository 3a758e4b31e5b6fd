#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (cfg, _log) = leadform_server::bootstrap("server")?;

    leadform_server::Server::builder().config(cfg).build()?.run().await
}
