use anyhow::Context;

use crate::ArcPath;

use super::{data::Data, message::Message};

/// The configuration actor core: owns the values in memory and the path of
/// the TOML file they are read from and written to.
pub struct Core {
    /// The path to the configuration file
    path: ArcPath,
    /// The current configuration data
    pub(super) data: Data,
}

impl Core {
    pub fn new(path: ArcPath) -> Self {
        Self {
            path,
            data: Data::default(),
        }
    }

    /// Spawns the configuration actor and returns a handle to it.
    pub fn spawn(mut self) -> (super::Config, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Load { tx } => {
                        let res = self.load().await;
                        let _ = tx.send(res);
                    }
                    Message::Save { tx } => {
                        let res = self.save().await;
                        let _ = tx.send(res);
                    }
                    Message::GetData { tx } => {
                        let _ = tx.send(self.data.clone());
                    }
                    Message::GetPath { opt, tx } => {
                        let _ = tx.send(self.data.path(opt));
                    }
                    Message::GetLogLevel { tx } => {
                        let _ = tx.send(self.data.log_level());
                    }
                    Message::GetUSize { opt, tx } => {
                        let _ = tx.send(self.data.usize(opt));
                    }
                    Message::GetBool { opt, tx } => {
                        let _ = tx.send(self.data.bool(opt));
                    }
                    Message::GetThreshold { tx } => {
                        let _ = tx.send(self.data.load_more_threshold());
                    }
                    Message::SetPath { opt, path } => {
                        self.data.set_path(opt, path);
                    }
                    Message::SetLogLevel { level } => {
                        self.data.set_log_level(level);
                    }
                    Message::SetUSize { opt, size } => {
                        self.data.set_usize(opt, size);
                    }
                    Message::SetBool { opt, value } => {
                        self.data.set_bool(opt, value);
                    }
                    Message::SetThreshold { threshold, tx } => {
                        let _ = tx.send(self.data.set_load_more_threshold(threshold));
                    }
                }
            }
        });
        (super::Config::Actual(tx), handle)
    }

    /// Loads the configuration from the file.
    ///
    /// Fails when the file does not exist or is not valid TOML; the values in
    /// memory are left untouched in that case.
    pub(super) async fn load(&mut self) -> anyhow::Result<()> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Reading config file {}", self.path.display()))?;
        let data: Data = toml::from_str(&contents)
            .with_context(|| format!("Parsing config file {}", self.path.display()))?;
        crate::trigger::validate_threshold(data.load_more_threshold())?;
        self.data = data;
        Ok(())
    }

    /// Saves the current configuration, creating parent directories as needed.
    pub(super) async fn save(&self) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Serializing config")?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Creating config directory {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Writing config file {}", self.path.display()))?;
        Ok(())
    }
}
