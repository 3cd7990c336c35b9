use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ANDROID_URL: &str =
    "https://interview-marketing-eng-dev.s3.eu-west-1.amazonaws.com/android.top100.json";
pub const DEFAULT_IOS_URL: &str =
    "https://interview-marketing-eng-dev.s3.eu-west-1.amazonaws.com/ios.top100.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Source URL for the android top-chart document.
    pub android_url: String,
    /// Source URL for the ios top-chart document.
    pub ios_url: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_path: PathBuf::from("./data/gamedex.db"),
            android_url: DEFAULT_ANDROID_URL.to_string(),
            ios_url: DEFAULT_IOS_URL.to_string(),
        }
    }
}
