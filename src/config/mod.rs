mod server;

pub use server::{DEFAULT_ANDROID_URL, DEFAULT_IOS_URL, ServerConfig};
