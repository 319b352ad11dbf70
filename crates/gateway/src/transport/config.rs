//! Connection parameters and the per-instance topic table

/// Broker connection parameters, resolved once at gateway construction.
///
/// Dialing, TLS, and reconnection are carried out by the bus client; the
/// gateway only holds the resolved values for its lifetime.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Whether the bus client should use TLS
    pub ssl: bool,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            username: String::new(),
            password: String::new(),
            ssl: false,
        }
    }
}

/// Topic table for one instance
///
/// Every topic embeds the instance uid and stays stable for the gateway's
/// lifetime. The suffixes are part of the remote contract.
#[derive(Debug, Clone)]
pub struct Topics {
    uid: String,
}

impl Topics {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Bus node name for this instance: `hbot.{uid}`
    pub fn node_name(&self) -> String {
        format!("hbot.{}", self.uid)
    }

    pub fn start(&self) -> String {
        self.join("start")
    }

    pub fn stop(&self) -> String {
        self.join("stop")
    }

    pub fn config(&self) -> String {
        self.join("config")
    }

    pub fn import(&self) -> String {
        self.join("import")
    }

    pub fn status(&self) -> String {
        self.join("status")
    }

    pub fn history(&self) -> String {
        self.join("history")
    }

    pub fn balance_limit(&self) -> String {
        self.join("balance/limit")
    }

    pub fn balance_paper(&self) -> String {
        self.join("balance/paper")
    }

    pub fn events(&self) -> String {
        self.join("events")
    }

    pub fn notify(&self) -> String {
        self.join("notify")
    }

    pub fn log(&self) -> String {
        self.join("log")
    }

    pub fn heartbeat(&self) -> String {
        self.join("hb")
    }

    fn join(&self, suffix: &str) -> String {
        format!("hbot/{}/{}", self.uid, suffix)
    }
}
