use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let defaults = MockConfig::default();
    let config = MockConfig {
        api_key: std::env::var("MOCK_API_KEY").unwrap_or(defaults.api_key),
        recaptcha_token: std::env::var("MOCK_RECAPTCHA_TOKEN").unwrap_or(defaults.recaptcha_token),
        code: std::env::var("MOCK_CODE").unwrap_or(defaults.code),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock identity service listening");
    mock_server::run(listener, config).await
}
