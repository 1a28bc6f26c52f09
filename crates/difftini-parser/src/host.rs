//! Worker thread owning the parser and its results.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use difftini_syntax::RawTree;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::client::ParserClient;
use crate::{ParseCodeResult, ParserError, ParserEvent, ParserResponse, TreeHandle};

/// Turns source text into raw syntax trees.
///
/// Implementations run on the worker thread only and may keep state between
/// calls.
pub trait CodeParser: Send + 'static {
    fn parse(&mut self, code: &str) -> RawTree;
}

impl<F> CodeParser for F
where
    F: FnMut(&str) -> RawTree + Send + 'static,
{
    fn parse(&mut self, code: &str) -> RawTree {
        self(code)
    }
}

#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// How long a client waits for each response.
    pub timeout: Duration,
    pub thread_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(5), thread_name: "difftini-parser".to_owned() }
    }
}

pub(crate) struct Request {
    pub(crate) event: ParserEvent,
    pub(crate) reply: Sender<ParserResponse>,
}

/// Owns the parser worker.
///
/// The worker keeps each parse result until it is taken or released, so
/// long-lived hosts should fetch trees with [`ParserClient::take_tree`] or
/// call [`ParserClient::release`] when done with a handle.
///
/// Dropping the host stops and joins the worker; outstanding clients then
/// fail with [`ParserError::Disconnected`].
pub struct ParserHost {
    client: ParserClient,
    shutdown: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ParserHost {
    pub fn spawn(parser: impl CodeParser, config: ParserConfig) -> Result<Self, ParserError> {
        let ParserConfig { timeout, thread_name } = config;
        let (sender, requests) = crossbeam_channel::unbounded();
        let (shutdown, shutdown_requested) = crossbeam_channel::bounded(0);

        debug!(thread = %thread_name, ?timeout, "spawning parser worker");
        let worker = thread::Builder::new().name(thread_name).spawn(move || {
            Worker { parser, results: FxHashMap::default() }.run(&requests, &shutdown_requested);
        })?;

        Ok(Self {
            client: ParserClient::new(sender, timeout),
            shutdown: Some(shutdown),
            worker: Some(worker),
        })
    }

    pub fn client(&self) -> ParserClient {
        self.client.clone()
    }
}

impl Drop for ParserHost {
    fn drop(&mut self) {
        drop(self.shutdown.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("parser worker panicked");
            }
        }
    }
}

struct Worker<P> {
    parser: P,
    results: FxHashMap<TreeHandle, RawTree>,
}

impl<P: CodeParser> Worker<P> {
    fn run(mut self, requests: &Receiver<Request>, shutdown: &Receiver<()>) {
        loop {
            let request = crossbeam_channel::select! {
                recv(requests) -> request => request.ok(),
                recv(shutdown) -> _ => None,
            };
            let Some(Request { event, reply }) = request else { break };

            let response = self.handle(event);
            if reply.send(response).is_err() {
                debug!("client stopped waiting for a parser response");
            }
        }
        debug!(trees = self.results.len(), "parser worker stopped");
    }

    fn handle(&mut self, event: ParserEvent) -> ParserResponse {
        match event {
            ParserEvent::ParseCode { code } => {
                let id = TreeHandle::new();
                let tree = self.parser.parse(&code);
                debug!(%id, bytes = code.len(), roots = tree.roots.len(), "parsed code");
                self.results.insert(id, tree);
                ParserResponse::Parsed(ParseCodeResult { id })
            }
            ParserEvent::GetParseString { id } | ParserEvent::GetTreeString { id } => {
                ParserResponse::TreeString(self.tree(id).map(ToString::to_string))
            }
            ParserEvent::GetTree { id } => ParserResponse::Tree(self.tree(id).cloned()),
            ParserEvent::TakeTree { id } => {
                let tree = self.results.remove(&id);
                if tree.is_none() {
                    warn!(%id, "no parse result for handle");
                }
                ParserResponse::Tree(tree)
            }
            ParserEvent::ReleaseTree { id } => {
                ParserResponse::Released(self.results.remove(&id).is_some())
            }
            ParserEvent::GetTreeCount => ParserResponse::TreeCount(self.results.len()),
        }
    }

    fn tree(&self, id: TreeHandle) -> Option<&RawTree> {
        let tree = self.results.get(&id);
        if tree.is_none() {
            warn!(%id, "no parse result for handle");
        }
        tree
    }
}
