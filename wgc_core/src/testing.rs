use std::{
    collections::VecDeque,
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{calendar_client::Transport, clock::Clock, error::TransportError};

pub fn datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::from_str(value).unwrap()
}

/// A clock the test moves by hand.
pub struct ManualClock(Mutex<NaiveDateTime>);

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Answers requests with the given bodies or errors, in order.
///
/// Once the script is exhausted every request fails.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: Calls,
}

impl ScriptedTransport {
    pub fn new<'a>(responses: impl IntoIterator<Item = Result<&'a str, &'a str>>) -> Self {
        let responses = responses
            .into_iter()
            .map(|response| response.map(String::from).map_err(String::from))
            .collect();
        Self {
            responses: Mutex::new(responses),
            calls: Calls::default(),
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, _url: &str) -> Result<String, TransportError> {
        self.calls.0.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Other(String::from("script exhausted"))),
        }
    }
}
