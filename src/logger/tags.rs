/// Log tags identify the subsystem a message comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Cache,
    Request,
    Table,
    Mock,
    Webserver,
    Test,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug <key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Cache => "cache".to_string(),
            LogTag::Request => "request".to_string(),
            LogTag::Table => "table".to_string(),
            LogTag::Mock => "mock".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uncolored label written in the tag column
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(name) => name.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
