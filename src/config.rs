use log::LevelFilter;

pub const META_API_BASE: &str = "activity-board:api-base";
pub const META_NOTICE_MS: &str = "activity-board:notice-ms";
pub const META_LOG_LEVEL: &str = "activity-board:log-level";

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Prefix for the API paths. Empty means same origin.
    pub api_base: String,
    /// How long a message stays up before it hides itself.
    pub notice_ttl_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            notice_ttl_ms: 5_000,
            log_level: LevelFilter::Info,
        }
    }
}

impl BoardConfig {
    /// Builds the config from a key lookup, keeping defaults for anything
    /// missing or unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(base) = lookup(META_API_BASE) {
            cfg.api_base = base.trim().to_string();
        }
        if let Some(ms) = lookup(META_NOTICE_MS).and_then(|v| v.trim().parse::<u32>().ok()) {
            cfg.notice_ttl_ms = ms;
        }
        if let Some(level) = lookup(META_LOG_LEVEL).and_then(|v| v.trim().parse().ok()) {
            cfg.log_level = level;
        }
        cfg
    }

    /// Reads `<meta name="activity-board:..." content="...">` tags from the page.
    pub fn from_document() -> Self {
        Self::from_lookup(meta_content)
    }
}

fn meta_content(name: &str) -> Option<String> {
    let doc = web_sys::window()?.document()?;
    let el = doc
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??;
    el.get_attribute("content")
}
