use anyhow::Result;
use filedock_host::{Host, picker_for, picker_from_env};
use log::info;

use crate::config::DaemonConfig;

pub struct DaemonState {
    pub config: DaemonConfig,
    pub host: Host,
}

impl DaemonState {
    pub fn new(config: DaemonConfig) -> Result<Self> {
        let picker = match config.dialog {
            Some(backend) => picker_for(backend),
            None => picker_from_env()?,
        };
        info!("using '{}' for file dialogs", picker.name());

        let host = Host::new(config.host.clone(), picker);
        Ok(Self { config, host })
    }
}
