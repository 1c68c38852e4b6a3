use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Writes a composed response buffer to the client, handling partial
/// writes. The buffer is sent verbatim; composition already finalized it.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(buffer: &[u8]) -> Self {
        Self {
            buffer: buffer.to_vec(),
            written: 0,
        }
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
