use futures_util::{SinkExt, StreamExt};
use log::{debug, trace, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

use crate::codec::{CodecError, ImapCodec, Request, ResponseData};
use crate::error::{Error, TransportError};
use imap_sort_proto::builders::command::{Command, CommandBuilder, SortRequest};
use imap_sort_proto::types::{Capabilities, RequestId, Status};

/// Sends a command and collects the server's responses to it.
#[allow(async_fn_in_trait)]
pub trait CommandTransport {
    async fn send(&mut self, command: Command) -> Result<ResponseCollection, TransportError>;
}

/// Responses received for one command, ending with its tagged completion.
#[derive(Debug)]
pub struct ResponseCollection {
    responses: Vec<ResponseData>,
}

impl ResponseCollection {
    fn new(responses: Vec<ResponseData>) -> Self {
        Self { responses }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseData> {
        self.responses.iter()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn completion(&self) -> Option<&ResponseData> {
        self.responses.last().filter(|rsp| rsp.request_id().is_some())
    }

    pub fn status(&self) -> Option<Status> {
        self.completion().and_then(ResponseData::status)
    }

    /// Untagged responses named `name`, for instance `SORT` or `ESEARCH`.
    pub fn untagged<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ResponseData> + 'a {
        self.responses
            .iter()
            .filter(move |rsp| rsp.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    fn information(&self) -> String {
        self.completion()
            .and_then(ResponseData::information)
            .unwrap_or_default()
            .to_string()
    }
}

impl IntoIterator for ResponseCollection {
    type Item = ResponseData;
    type IntoIter = std::vec::IntoIter<ResponseData>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResponseCollection {
    type Item = &'a ResponseData;
    type IntoIter = std::slice::Iter<'a, ResponseData>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}

/// A client on an established, authenticated connection.
pub struct Client<T> {
    transport: Framed<T, ImapCodec>,
    state: ClientState,
}

impl<T> Client<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: T) -> Self {
        Self::with_codec(stream, ImapCodec::default())
    }

    pub fn with_codec(stream: T, codec: ImapCodec) -> Self {
        Self {
            transport: Framed::new(stream, codec),
            state: ClientState::new(),
        }
    }

    /// The capabilities last advertised by the server.
    pub fn capabilities(&self) -> &Capabilities {
        &self.state.capabilities
    }

    /// Replaces the capability snapshot, e.g. with one taken from the greeting.
    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.state.capabilities = capabilities;
    }

    pub async fn refresh_capabilities(&mut self) -> Result<&Capabilities, TransportError> {
        self.call(CommandBuilder::capability()).await?;
        Ok(&self.state.capabilities)
    }

    /// Checks `request` against the current capabilities and sends it.
    ///
    /// Requests the server cannot handle are refused without any I/O.
    pub async fn sort(&mut self, request: SortRequest) -> Result<ResponseCollection, Error> {
        let command = match CommandBuilder::sort(&self.state.capabilities)
            .and_then(|builder| builder.build(request))
        {
            Ok(command) => command,
            Err(e) => {
                warn!("not sending SORT: {}", e);
                return Err(e.into());
            }
        };
        Ok(self.call(command).await?)
    }

    pub async fn call(&mut self, command: Command) -> Result<ResponseCollection, TransportError> {
        let request_id = self.state.request_ids.next_id();
        debug!("{} {}", request_id, command.verb());
        self.transport.send(Request(&request_id, &command)).await?;

        // A line the codec skipped fails the command, but only once the
        // completion is read, so the next command starts on a clean stream.
        let mut skipped = None;
        let mut responses = Vec::new();
        loop {
            let rsp = match self.transport.next().await {
                Some(Ok(Ok(rsp))) => rsp,
                Some(Ok(Err(e))) => {
                    warn!("{}: skipping response: {}", request_id, e);
                    if skipped.is_none() {
                        skipped = Some(e);
                    }
                    continue;
                }
                Some(Err(e)) => return Err(CodecError::from(e).into()),
                None => return Err(TransportError::ConnectionClosed),
            };
            trace!("{}: {:?}", request_id, String::from_utf8_lossy(rsp.raw()));
            self.state.observe(&rsp);
            let done = rsp.request_id() == Some(&request_id);
            responses.push(rsp);
            if done {
                break;
            }
        }

        if let Some(e) = skipped {
            return Err(e.into());
        }

        let responses = ResponseCollection::new(responses);
        match responses.status() {
            Some(Status::Ok) => Ok(responses),
            status => {
                let status = status.unwrap_or(Status::Bad);
                let information = responses.information();
                warn!("{} {} failed: {} {}", request_id, command.verb(), status, information);
                Err(TransportError::Rejected {
                    status,
                    information,
                })
            }
        }
    }
}

impl<T> CommandTransport for Client<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    async fn send(&mut self, command: Command) -> Result<ResponseCollection, TransportError> {
        self.call(command).await
    }
}

pub struct ClientState {
    capabilities: Capabilities,
    request_ids: IdGenerator,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::new(),
            request_ids: IdGenerator::new(),
        }
    }

    fn observe(&mut self, rsp: &ResponseData) {
        if let Some(capabilities) = rsp.capabilities() {
            debug!("server capabilities: {} atoms", capabilities.len());
            self.capabilities = capabilities.clone();
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(format!("A{:04}", self.next % 10_000))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for IdGenerator {
    type Item = RequestId;
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_id())
    }
}
