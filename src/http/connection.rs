use std::path::PathBuf;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, info, warn};

use crate::error::ParseError;
use crate::http::handler::handle_request;
use crate::http::parser::parse_http_request;
use crate::http::request::{Request, Version};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Upper bound on buffered bytes for a single request.
const MAX_REQUEST_SIZE: usize = 64 * 1024;

/// One accepted client connection, served until it stops asking for keep-alive.
pub struct Connection<S> {
    stream: S,
    root: PathBuf,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, root: PathBuf) -> Self {
        Self {
            stream,
            root,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(Ok(req)) => {
                        info!(request = %req.request_line(), "Request received");
                        self.state = ConnectionState::Processing(req);
                    }
                    Some(Err(e)) => {
                        // Answer once, then drop the connection
                        warn!(error = %e, "Rejecting malformed request");
                        let response = Response::bad_request(&Version::Http10);
                        self.state = ConnectionState::Writing(ResponseWriter::new(&response), false);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = handle_request(req).await;
                    let keep_alive = req.keep_alive();
                    info!(
                        method = ?req.method,
                        uri = %req.uri,
                        status = response.status.as_u16(),
                        keep_alive,
                        "Response ready"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    debug!("Closing connection");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until one full request is buffered.
    ///
    /// `Ok(None)` means the client closed cleanly between requests. A parse
    /// failure is returned inside `Some` so the caller can still answer it.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(Ok(request.with_root(self.root.clone()))));
                }
                Err(ParseError::Incomplete) => {}
                Err(e) => return Ok(Some(Err(e))),
            }

            if self.buffer.len() > MAX_REQUEST_SIZE {
                anyhow::bail!("request exceeds {} bytes", MAX_REQUEST_SIZE);
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }
                anyhow::bail!("connection closed mid-request");
            }
        }
    }
}
