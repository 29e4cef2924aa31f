use url::Url;

use crate::urls;

/// Client configuration shared by the control session and the status poller.
#[derive(Clone, Debug)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,

    /// Origin served with every request and queried for the OAuth token.
    pub origin: Url,

    /// Overrides the randomized `*.spotilocal.com` host when set.
    /// Useful for tests or a control server bound somewhere nonstandard.
    pub base_url: Option<Url>,

    /// Port the local control server listens on.
    pub port: u16,

    /// Long-poll timeout in seconds (`returnafter`).
    pub wait: u64,

    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        let app_name = env!("CARGO_PKG_NAME").to_owned();
        let app_version = env!("CARGO_PKG_VERSION").to_owned();

        let os_name = match std::env::consts::OS {
            "macos" => "osx",
            other => other,
        };
        let os_version = sysinfo::System::os_version().unwrap_or_else(|| String::from("0"));

        // Served like a desktop client would present itself.
        let user_agent = format!("{app_name}/{app_version} (Rust; {os_name}/{os_version})");
        trace!("user agent: {user_agent}");

        Self {
            app_name,
            app_version,

            origin: Url::parse(urls::DEFAULT_ORIGIN).expect("default origin is valid"),
            base_url: None,
            port: urls::DEFAULT_PORT,
            wait: Config::DEFAULT_WAIT,

            user_agent,
        }
    }
}

impl Config {
    /// Default long-poll timeout in seconds.
    pub const DEFAULT_WAIT: u64 = 60;
}
