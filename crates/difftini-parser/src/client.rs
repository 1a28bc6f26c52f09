use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use difftini_syntax::RawTree;

use crate::host::Request;
use crate::{ParseCodeResult, ParserError, ParserEvent, ParserResponse, TreeHandle};

/// Cheap, cloneable handle for sending requests to a [`ParserHost`].
///
/// [`ParserHost`]: crate::ParserHost
#[derive(Debug, Clone)]
pub struct ParserClient {
    sender: Sender<Request>,
    timeout: Duration,
}

impl ParserClient {
    pub(crate) fn new(sender: Sender<Request>, timeout: Duration) -> Self {
        Self { sender, timeout }
    }

    /// Queues `event` without waiting, so several requests can be in flight.
    pub fn send(&self, event: ParserEvent) -> Result<PendingResponse, ParserError> {
        let (reply, response) = crossbeam_channel::bounded(1);
        if self.sender.send(Request { event, reply }).is_err() {
            return Err(ParserError::Disconnected);
        }
        Ok(PendingResponse { response, timeout: self.timeout })
    }

    pub fn request(&self, event: ParserEvent) -> Result<ParserResponse, ParserError> {
        self.send(event)?.wait()
    }

    pub fn parse_code(&self, code: &str) -> Result<ParseCodeResult, ParserError> {
        self.request(ParserEvent::ParseCode { code: code.to_owned() })?.into_parsed()
    }

    pub fn parse_string(&self, id: TreeHandle) -> Result<Option<String>, ParserError> {
        self.request(ParserEvent::GetParseString { id })?.into_tree_string()
    }

    pub fn tree_string(&self, id: TreeHandle) -> Result<Option<String>, ParserError> {
        self.request(ParserEvent::GetTreeString { id })?.into_tree_string()
    }

    pub fn tree(&self, id: TreeHandle) -> Result<Option<RawTree>, ParserError> {
        self.request(ParserEvent::GetTree { id })?.into_tree()
    }

    /// Fetches the tree for `id` and drops it from the worker.
    pub fn take_tree(&self, id: TreeHandle) -> Result<Option<RawTree>, ParserError> {
        self.request(ParserEvent::TakeTree { id })?.into_tree()
    }

    /// Drops the tree for `id`; `false` if there was none.
    pub fn release(&self, id: TreeHandle) -> Result<bool, ParserError> {
        self.request(ParserEvent::ReleaseTree { id })?.into_released()
    }

    /// Number of parse results the worker is holding.
    pub fn tree_count(&self) -> Result<usize, ParserError> {
        self.request(ParserEvent::GetTreeCount)?.into_tree_count()
    }

    /// Fetches the tree for `id`, treating an unknown handle as an error.
    pub fn expect_tree(&self, id: TreeHandle) -> Result<RawTree, ParserError> {
        self.tree(id)?.ok_or(ParserError::UnknownHandle(id))
    }
}

/// A response that has been requested but not yet received.
#[derive(Debug)]
pub struct PendingResponse {
    response: Receiver<ParserResponse>,
    timeout: Duration,
}

impl PendingResponse {
    pub fn wait(self) -> Result<ParserResponse, ParserError> {
        match self.response.recv_timeout(self.timeout) {
            Ok(response) => Ok(response),
            Err(RecvTimeoutError::Timeout) => Err(ParserError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(ParserError::Disconnected),
        }
    }
}
