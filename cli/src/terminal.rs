//! Host capabilities backed by the terminal.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use colored::*;
use repo_search_core::{
    AlwaysOnline, Connectivity, EnglishStrings, Host, LoadingSink, Notifier, TcpProbe,
};

/// Shows a status line on stderr while a request is in flight.
pub struct StderrLoader {
    interactive: bool,
}

impl LoadingSink for StderrLoader {
    fn set_loading(&self, loading: bool) {
        if !self.interactive {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = if loading {
            write!(stderr, "{}", "Searching...".dimmed())
        } else {
            write!(stderr, "\r\x1b[2K")
        };
        let _ = stderr.flush();
    }
}

/// Prints notices on stderr so stdout stays clean for results.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

/// Assemble the terminal host. With `probe` set, connectivity is a TCP
/// probe of the API host; otherwise the network is assumed reachable.
pub fn host(base_url: &str, probe: bool) -> Host {
    let connectivity: Arc<dyn Connectivity> = if probe {
        match TcpProbe::for_base_url(base_url, TcpProbe::DEFAULT_TIMEOUT) {
            Some(probe) => Arc::new(probe),
            None => {
                tracing::warn!(base_url, "cannot probe base URL, assuming online");
                Arc::new(AlwaysOnline)
            }
        }
    } else {
        Arc::new(AlwaysOnline)
    };
    Host {
        connectivity,
        strings: Arc::new(EnglishStrings),
        loading: Arc::new(StderrLoader {
            interactive: io::stderr().is_terminal(),
        }),
        notifier: Arc::new(StderrNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_probe_is_always_online() {
        let host = host("http://192.0.2.1:9", false);
        assert!(host.connectivity.is_online());
    }

    #[test]
    fn probe_sees_local_listener() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let host = host(&format!("http://{addr}"), true);
        assert!(host.connectivity.is_online());
    }

    #[test]
    fn unprobeable_url_falls_back_to_online() {
        let host = host("not a url", true);
        assert!(host.connectivity.is_online());
    }
}
