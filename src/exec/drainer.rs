// src/exec/drainer.rs

//! Background stream drainer.
//!
//! A child process writing to a full pipe blocks until somebody reads.
//! If the parent is simultaneously blocked in `wait()`, neither side can
//! make progress. `StreamDrainer` breaks that cycle: each redirected
//! stream is consumed to end-of-stream on its own Tokio task, started
//! before the parent ever blocks on exit, so the pipe can never fill up
//! behind a stalled reader.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::debug;

/// Drains one redirected stream (stdout or stderr) to completion.
///
/// Reading starts as soon as [`StreamDrainer::spawn`] returns. The
/// accumulated output becomes available through [`wait`](Self::wait),
/// which only resolves once the stream has hit end-of-stream, i.e. the
/// child has exited or been killed and the OS closed its end of the pipe.
pub struct StreamDrainer {
    handle: JoinHandle<String>,
}

impl StreamDrainer {
    /// Start draining `source` on a background task.
    ///
    /// `stream` names the stream in log output ("stdout"/"stderr").
    /// A `None` source drains to empty output.
    pub fn spawn<R>(stream: &'static str, source: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut captured: Vec<u8> = Vec::new();

            if let Some(mut source) = source {
                loop {
                    match source.read_buf(&mut captured).await {
                        Ok(0) => break,
                        Ok(_) => {}
                        Err(err) => {
                            // A killed child's pipe can error instead of
                            // returning a clean EOF; keep what we have.
                            debug!(stream, error = %err, "read error; treating as end-of-stream");
                            break;
                        }
                    }
                }
            }

            debug!(stream, bytes = captured.len(), "stream drained");
            String::from_utf8_lossy(&captured).into_owned()
        });

        Self { handle }
    }

    /// Block until the stream is fully drained and return its contents.
    ///
    /// Safe to call after the child is already known to have exited or
    /// been killed: pipe closure on process termination guarantees the
    /// drain task finishes.
    pub async fn wait(self) -> String {
        // A panicked or cancelled drain task yields empty output rather
        // than poisoning the whole execution attempt.
        self.handle.await.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use tokio::io::ReadBuf;

    #[tokio::test]
    async fn drains_everything_until_eof() {
        let source = Cursor::new(b"line one\nline two\n".to_vec());
        let drainer = StreamDrainer::spawn("stdout", Some(source));

        assert_eq!(drainer.wait().await, "line one\nline two\n");
    }

    #[tokio::test]
    async fn missing_source_drains_to_empty() {
        let drainer = StreamDrainer::spawn("stderr", None::<Cursor<Vec<u8>>>);
        assert_eq!(drainer.wait().await, "");
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let source = Cursor::new(vec![b'o', b'k', 0xff, 0xfe]);
        let drainer = StreamDrainer::spawn("stdout", Some(source));

        let output = drainer.wait().await;
        assert!(output.starts_with("ok"));
        assert_eq!(output.chars().filter(|c| *c == '\u{fffd}').count(), 2);
    }

    /// Reader that yields a prefix and then fails, like a pipe torn down
    /// by a kill.
    struct FailAfter {
        data: Vec<u8>,
        served: bool,
    }

    impl AsyncRead for FailAfter {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            if !self.served {
                self.served = true;
                let data = self.data.clone();
                buf.put_slice(&data);
                Poll::Ready(Ok(()))
            } else {
                Poll::Ready(Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe)))
            }
        }
    }

    #[tokio::test]
    async fn read_error_finishes_with_partial_output() {
        let source = FailAfter {
            data: b"partial".to_vec(),
            served: false,
        };
        let drainer = StreamDrainer::spawn("stdout", Some(source));

        assert_eq!(drainer.wait().await, "partial");
    }
}
