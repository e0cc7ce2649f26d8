use botscore::{BotScoreClient, BotScoreConfig, Credentials};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let handles: Vec<String> = std::env::args().skip(1).collect();
    if handles.is_empty() {
        eprintln!("usage: batch_scores <handle>...");
        std::process::exit(2);
    }

    let credentials = Credentials::from_env().unwrap();
    let config = BotScoreConfig {
        rate_limit_ms: 1000,
        ..Default::default()
    };
    let client = BotScoreClient::new(credentials, config);

    let records = client.get_batch_bot_scores(&handles).await;
    println!("Scored {} of {} accounts", records.len(), handles.len());
    serde_json::to_writer_pretty(std::io::stdout(), &records).unwrap();
}
