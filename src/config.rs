use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// IPL second-innings win predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// Address the web form listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8501")]
    pub listen_addr: String,

    /// Path to the trained model artifact (JSON)
    #[arg(long, env = "MODEL_PATH", default_value = "pipe.json")]
    pub model_path: PathBuf,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr must be a socket address, got {:?}", self.listen_addr);
        }
        if !self.model_path.is_file() {
            anyhow::bail!(
                "model artifact not found at {}. Set MODEL_PATH or --model-path.",
                self.model_path.display()
            );
        }
        Ok(())
    }
}
