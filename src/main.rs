#[tokio::main]
async fn main() {
    if let Err(e) = healthcard_lib::run().await {
        eprintln!("healthcard: {e}");
        std::process::exit(1);
    }
}
