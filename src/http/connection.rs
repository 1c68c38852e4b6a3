use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::config::ContentConfig;
use crate::http::handler;
use crate::http::parser;
use crate::http::writer::ResponseWriter;

/// Size of the receive buffer. One read is performed per connection; the
/// core parses whatever arrived and never asks for more bytes.
const RECV_BUFFER_SIZE: usize = 1024;

/// Drives a single client connection: one request, one response, close.
pub struct Connection {
    stream: TcpStream,
    content: ContentConfig,
}

impl Connection {
    pub fn new(stream: TcpStream, content: ContentConfig) -> Self {
        Self { stream, content }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut buffer = BytesMut::with_capacity(RECV_BUFFER_SIZE);

        let n = self.stream.read_buf(&mut buffer).await?;
        if n == 0 {
            // Client closed without sending anything.
            return Ok(());
        }

        let request = parser::parse(&buffer);

        if request.raw.is_empty() {
            // Nothing before the first NUL; close without answering.
            tracing::debug!("Empty request received");
            return Ok(());
        }

        if request.is_empty() {
            tracing::debug!("Request parsed empty (no usable request line)");
        }

        tracing::info!(
            method = request.method.as_str(),
            path = %request.path,
            "Handling request"
        );

        let response = handler::handle(&request, &self.content)
            .map_err(|e| anyhow::anyhow!("Response composition failed: {:?}", e))?;

        let mut writer = ResponseWriter::new(response.as_bytes());
        writer.write_to_stream(&mut self.stream).await?;

        tracing::info!(
            status = response.status().map(|s| s.as_u16()).unwrap_or_default(),
            details = response.details(),
            "Response sent"
        );

        Ok(())
    }
}
