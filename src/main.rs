use stockview::app;

/// Main entry point for the inventory viewer.
///
/// Binds the address from `STOCKVIEW_ADDR` (default `127.0.0.1:3000`) and
/// writes saves to `STOCKVIEW_SAVE_PATH` (default `result.json`).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::var("STOCKVIEW_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let save_path =
        std::env::var("STOCKVIEW_SAVE_PATH").unwrap_or_else(|_| "result.json".to_string());

    app::run(&addr, save_path.into()).await
}
