#[tokio::main]
async fn main() {
    if let Err(e) = clinicheck_lib::run().await {
        tracing::error!("{e}");
        eprintln!("clinicheck: {e}");
        std::process::exit(1);
    }
}
