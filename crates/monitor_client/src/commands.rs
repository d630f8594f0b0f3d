use monitor_core::JobId;

use crate::wire::CommandPayload;

/// Control command for the crawl server's `/cmd/{token}` channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlCommand {
    /// Start a new crawl over the given seed URLs.
    Start { urls: Vec<String>, depth: i32 },
    Stop { id: JobId },
    Pause { id: JobId },
    Resume { id: JobId },
}

impl CrawlCommand {
    fn to_payload(&self) -> CommandPayload {
        // The server expects URLs and Depth on every command; only start
        // fills them in, everything else targets a job by ID.
        match self {
            CrawlCommand::Start { urls, depth } => CommandPayload {
                cmd: "start".to_string(),
                urls: urls.clone(),
                depth: *depth,
                id: None,
            },
            CrawlCommand::Stop { id } => targeted("stop", *id),
            CrawlCommand::Pause { id } => targeted("pause", *id),
            CrawlCommand::Resume { id } => targeted("resume", *id),
        }
    }

    /// Wire encoding of the command.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_payload())
    }
}

fn targeted(cmd: &str, id: JobId) -> CommandPayload {
    CommandPayload {
        cmd: cmd.to_string(),
        urls: Vec::new(),
        depth: -1,
        id: Some(id),
    }
}
