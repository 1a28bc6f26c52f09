//! Request/response transport to a parser running on its own thread.
//!
//! The parser is anything implementing [`CodeParser`]. Callers talk to it
//! through a [`ParserClient`]; every request gets exactly one response, and
//! parse results stay on the worker behind a [`TreeHandle`] until fetched.

mod client;
mod error;
mod host;
mod messages;

use difftini_syntax::{Builder, RawTree, SyntaxPair};

pub use client::{ParserClient, PendingResponse};
pub use error::ParserError;
pub use host::{CodeParser, ParserConfig, ParserHost};
pub use messages::{ParseCodeResult, ParserEvent, ParserResponse, TreeHandle};

/// Parses both versions of a file and indexes them as one pair.
///
/// Both parse requests are queued before waiting on either. Both trees are
/// taken, so the worker holds nothing for this pair afterwards.
pub fn build_pair(
    client: &ParserClient,
    before: &str,
    after: &str,
) -> Result<SyntaxPair, ParserError> {
    let before = client.send(ParserEvent::ParseCode { code: before.to_owned() })?;
    let after = client.send(ParserEvent::ParseCode { code: after.to_owned() })?;
    let before = take(client, before.wait()?.into_parsed()?.id)?;
    let after = take(client, after.wait()?.into_parsed()?.id)?;

    let mut builder = Builder::new();
    let lhs = builder.build_roots(&before.roots);
    let rhs = builder.build_roots(&after.roots);
    Ok(builder.finish().index(lhs, rhs))
}

fn take(client: &ParserClient, id: TreeHandle) -> Result<RawTree, ParserError> {
    client.take_tree(id)?.ok_or(ParserError::UnknownHandle(id))
}
