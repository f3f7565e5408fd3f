mod error;
mod keep_alive;
mod server;

pub use error::RuntimeError;
pub use keep_alive::KeepAlive;

use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::AppConfig;

/// Background tasks that run beside the dispatcher.
pub struct RuntimeManager {
    server: JoinHandle<()>,
    keep_alive: Option<JoinHandle<()>>,
}

impl RuntimeManager {
    /// Binds the health endpoint before returning so a taken port fails start-up.
    pub async fn start(config: &AppConfig) -> Result<Self, RuntimeError> {
        let listener = server::bind(config.server.port).await?;
        info!("Health endpoint listening on port {}", config.server.port);

        let server = tokio::spawn(async move {
            if let Err(e) = server::serve(listener).await {
                error!("Health endpoint stopped: {}", e);
            }
        });

        let keep_alive = match &config.keep_alive {
            Some(keep_alive) => {
                let pinger = KeepAlive::new(keep_alive.url.clone(), Duration::from_secs(keep_alive.interval_secs))?;
                Some(pinger.spawn())
            }
            None => {
                info!("KEEP_ALIVE_URL not set, keep-alive disabled");
                None
            }
        };

        Ok(Self { server, keep_alive })
    }

    pub fn shutdown(self) {
        self.server.abort();
        if let Some(keep_alive) = self.keep_alive {
            keep_alive.abort();
        }
    }
}
