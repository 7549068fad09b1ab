//! Capabilities the embedding host injects into the API caller.
//!
//! # Design
//! The caller never reaches for global UI state. Whatever it needs from the
//! host (connectivity, localized strings, the loading indicator, transient
//! notices) comes in through these traits, bundled in `Host`. All of them are
//! `Send + Sync` so a `Host` can be shared with blocking workers.

use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Reports whether a network is reachable before a request is attempted.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Keys for every user-visible string the core produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKey {
    DeviceOffline,
    SomeError,
    /// Template with a `{count}` placeholder.
    ItemsFetched,
    NothingToShow,
    Name,
    Stars,
    Watchers,
    Score,
    CreatedAt,
    UpdatedAt,
    Description,
    Avatar,
    /// Shown in place of a missing owner avatar.
    NoAvatar,
}

/// Localized string table.
pub trait StringLookup: Send + Sync {
    fn lookup(&self, key: StringKey) -> String;
}

/// Receives loader on/off transitions.
pub trait LoadingSink: Send + Sync {
    fn set_loading(&self, loading: bool);
}

/// Shows a short-lived message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// The host's UI-facing capabilities.
#[derive(Clone)]
pub struct Host {
    pub connectivity: Arc<dyn Connectivity>,
    pub strings: Arc<dyn StringLookup>,
    pub loading: Arc<dyn LoadingSink>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Considers the network up when a TCP connection to the API host succeeds.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    /// Probe the host and port of `base_url`; `None` if it has no host.
    pub fn for_base_url(base_url: &str, timeout: Duration) -> Option<Self> {
        let parsed = url::Url::parse(base_url).ok()?;
        let host = parsed.host_str()?.to_string();
        let port = parsed.port_or_known_default()?;
        Some(Self {
            host,
            port,
            timeout,
        })
    }
}

impl Connectivity for TcpProbe {
    fn is_online(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!(host = %self.host, error = %e, "connectivity probe could not resolve host");
                return false;
            }
        };
        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                return true;
            }
        }
        debug!(host = %self.host, port = self.port, "connectivity probe failed");
        false
    }
}

/// Built-in English strings.
pub struct EnglishStrings;

impl StringLookup for EnglishStrings {
    fn lookup(&self, key: StringKey) -> String {
        match key {
            StringKey::DeviceOffline => "Your device is offline.",
            StringKey::SomeError => "Some error occurred.",
            StringKey::ItemsFetched => "{count} items has fetched.",
            StringKey::NothingToShow => "Nothing available to show.",
            StringKey::Name => "Name:",
            StringKey::Stars => "Stars:",
            StringKey::Watchers => "Watchers:",
            StringKey::Score => "Score:",
            StringKey::CreatedAt => "Created at:",
            StringKey::UpdatedAt => "Updated at:",
            StringKey::Description => "Description:",
            StringKey::Avatar => "Avatar:",
            StringKey::NoAvatar => "(no avatar)",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_parses_base_url() {
        let probe =
            TcpProbe::for_base_url("https://api.github.com", TcpProbe::DEFAULT_TIMEOUT).unwrap();
        assert_eq!(probe.host, "api.github.com");
        assert_eq!(probe.port, 443);

        let probe =
            TcpProbe::for_base_url("http://127.0.0.1:3000/", TcpProbe::DEFAULT_TIMEOUT).unwrap();
        assert_eq!(probe.port, 3000);
    }

    #[test]
    fn probe_rejects_urls_without_host() {
        assert!(TcpProbe::for_base_url("not a url", TcpProbe::DEFAULT_TIMEOUT).is_none());
    }

    #[test]
    fn probe_reaches_local_listener() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let probe =
            TcpProbe::for_base_url(&format!("http://{addr}"), Duration::from_secs(1)).unwrap();
        assert!(probe.is_online());
    }

    #[test]
    fn items_fetched_template_has_placeholder() {
        assert!(EnglishStrings.lookup(StringKey::ItemsFetched).contains("{count}"));
    }
}
