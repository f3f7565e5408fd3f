#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Failed to bind health server on port {0}: {1}")]
    Bind(u16, std::io::Error),
    #[error("Health server error: {0}")]
    Serve(std::io::Error),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
