use anyhow::Result;
use herald_game::{HeraldConfig, Session, SessionSummary};
use std::io;
use tracing::info;

/// The game process bound to this process' stdio
pub struct GameApp {
    config: HeraldConfig,
}

impl GameApp {
    pub fn new(config: HeraldConfig) -> Self {
        Self { config }
    }

    /// Serve the engine until it exits or closes our input
    pub fn run(&self) -> Result<SessionSummary> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let stderr = io::stderr();

        let mut session = Session::new(stdin.lock(), stdout.lock(), stderr.lock(), &self.config)?;
        info!(
            session_id = session.session_id(),
            room_width = self.config.room.width,
            room_height = self.config.room.height,
            "Herald demo game ready"
        );

        let summary = session.run()?;
        info!(stop_reason = ?summary.stop_reason, "Herald demo game finished");

        Ok(summary)
    }
}
