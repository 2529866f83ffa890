use dugout_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("dugout error: {err}");
        std::process::exit(1);
    }
}
