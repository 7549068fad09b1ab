//! In-crate test doubles for the host capabilities and the transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::host::{Connectivity, EnglishStrings, Host, LoadingSink, Notifier};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Loading(bool),
    Notice(String),
}

/// Records loader transitions and notices in order.
pub struct Recorder {
    online: bool,
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn online() -> Arc<Self> {
        Arc::new(Self {
            online: true,
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            online: false,
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn host(self: &Arc<Self>) -> Host {
        Host {
            connectivity: self.clone(),
            strings: Arc::new(EnglishStrings),
            loading: self.clone(),
            notifier: self.clone(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notice(n) => Some(n),
                Event::Loading(_) => None,
            })
            .collect()
    }
}

impl Connectivity for Recorder {
    fn is_online(&self) -> bool {
        self.online
    }
}

impl LoadingSink for Recorder {
    fn set_loading(&self, loading: bool) {
        self.events.lock().unwrap().push(Event::Loading(loading));
    }
}

impl Notifier for Recorder {
    fn notify(&self, message: &str) {
        self.events.lock().unwrap().push(Event::Notice(message.to_string()));
    }
}

/// Answers every request with the same canned result.
pub struct Scripted {
    result: Result<HttpResponse, ApiError>,
    calls: AtomicUsize,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Scripted {
    pub fn respond(response: HttpResponse) -> Arc<Self> {
        Self::with(Ok(response))
    }

    pub fn fail(err: ApiError) -> Arc<Self> {
        Self::with(Err(err))
    }

    fn with(result: Result<HttpResponse, ApiError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for Scripted {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

pub struct Panicking;

impl Transport for Panicking {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        panic!("transport exploded")
    }
}
