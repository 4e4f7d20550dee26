//! Local console channel: stdin lines in, replies on stdout.
//!
//! Every line is a message from one fixed chat, which makes it easy to try the
//! relay without a Telegram bot.
//!
//! stdin is read on its own OS thread and piped into the runtime, so a pending
//! read never holds up shutdown.

use std::io::BufRead;
use std::sync::Arc;

use async_trait::async_trait;
use chatrelay_agent::ChatRelay;
use chatrelay_core::{ChatId, InboundEvent, ReplySink};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream,
};
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::ChannelAdapter;

pub struct ConsoleAdapter {
    chat_id: ChatId,
}

impl ConsoleAdapter {
    pub fn new(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: chat_id.into(),
        }
    }

    /// Feed lines from `input` into the relay and write replies to `output`.
    pub async fn serve<R, W>(
        &self,
        input: R,
        output: W,
        relay: &ChatRelay,
        shutdown: &CancellationToken,
    ) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send,
    {
        let sink = ConsoleSink::new(output);
        let mut lines = input.lines();

        loop {
            let line = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                line = lines.next_line() => line?,
            };
            let Some(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }

            let event = InboundEvent::from_text(self.chat_id.clone(), line);
            if let Err(e) = relay.handle_event(&sink, &event).await {
                error!(chat_id = %self.chat_id, error = %e, "Failed to handle console message");
                sink.write_line(&format!("[error] {e}")).await?;
            }
        }

        info!("Console input closed");
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for ConsoleAdapter {
    fn name(&self) -> &str {
        "console"
    }

    async fn run(&self, relay: Arc<ChatRelay>, shutdown: CancellationToken) -> anyhow::Result<()> {
        info!(chat_id = %self.chat_id, "Starting console adapter");
        let (writer, reader) = tokio::io::duplex(STDIN_PIPE_CAPACITY);
        spawn_stdin_reader(writer)?;
        self.serve(BufReader::new(reader), tokio::io::stdout(), &relay, &shutdown)
            .await
    }
}

const STDIN_PIPE_CAPACITY: usize = 64 * 1024;

/// Copy stdin lines into `pipe` from a plain thread until EOF or the reader
/// side goes away.
fn spawn_stdin_reader(pipe: DuplexStream) -> std::io::Result<()> {
    let handle = Handle::current();
    std::thread::Builder::new()
        .name("console-stdin".into())
        .spawn(move || forward_lines(std::io::stdin().lock(), pipe, &handle))?;
    Ok(())
}

fn forward_lines(input: impl BufRead, mut pipe: DuplexStream, handle: &Handle) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        let written = handle.block_on(async {
            pipe.write_all(line.as_bytes()).await?;
            pipe.write_all(b"\n").await
        });
        if written.is_err() {
            break;
        }
    }
}

/// Writes each reply as a `bot> ` prefixed block.
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl<W: AsyncWrite + Unpin + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ReplySink for ConsoleSink<W> {
    async fn send_text(&self, _chat_id: &ChatId, text: &str) -> anyhow::Result<()> {
        self.write_line(&format!("bot> {text}")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_agent::GREETING;
    use chatrelay_memory::HistoryStore;
    use chatrelay_providers::{CompletionGateway, MockProvider};

    fn relay(provider: MockProvider) -> ChatRelay {
        ChatRelay::new(
            HistoryStore::new(),
            CompletionGateway::new(Arc::new(provider), "mock-model"),
        )
    }

    #[tokio::test]
    async fn relays_lines_until_eof() {
        let relay = relay(MockProvider::new("mock"));
        let adapter = ConsoleAdapter::new("local");
        let input: &[u8] = b"/start\nhi\n\n   \nhow are you\n";
        let mut output = Vec::new();

        adapter
            .serve(input, &mut output, &relay, &CancellationToken::new())
            .await
            .unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(
            printed,
            format!("bot> {GREETING}\nbot> You said: hi\nbot> You said: how are you\n")
        );
        assert_eq!(
            relay.history().history(&ChatId::from("local")),
            vec!["hi", "how are you"]
        );
    }

    #[tokio::test]
    async fn gateway_errors_are_printed_and_input_continues() {
        let relay = relay(MockProvider::new("groq").failing("quota exceeded"));
        let adapter = ConsoleAdapter::new("local");
        let input: &[u8] = b"one\ntwo\n";
        let mut output = Vec::new();

        adapter
            .serve(input, &mut output, &relay, &CancellationToken::new())
            .await
            .unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("[error]").count(), 2);
        assert!(printed.contains("quota exceeded"));
        assert_eq!(relay.history().len(&ChatId::from("local")), 2);
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_reading() {
        let relay = relay(MockProvider::new("mock"));
        let adapter = ConsoleAdapter::new("local");
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let (_writer, reader) = tokio::io::duplex(64);
        let mut output = Vec::new();
        adapter
            .serve(BufReader::new(reader), &mut output, &relay, &shutdown)
            .await
            .unwrap();

        assert!(output.is_empty());
        assert_eq!(relay.history().chat_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn piped_lines_reach_the_relay() {
        let relay = relay(MockProvider::new("mock"));
        let adapter = ConsoleAdapter::new("local");
        let (writer, reader) = tokio::io::duplex(STDIN_PIPE_CAPACITY);

        let handle = Handle::current();
        let thread = std::thread::spawn(move || {
            forward_lines(std::io::Cursor::new("hi\n/start\n"), writer, &handle)
        });

        let mut output = Vec::new();
        adapter
            .serve(BufReader::new(reader), &mut output, &relay, &CancellationToken::new())
            .await
            .unwrap();
        thread.join().unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed, format!("bot> You said: hi\nbot> {GREETING}\n"));
    }

    #[tokio::test]
    async fn cancellation_does_not_wait_for_input() {
        let relay = relay(MockProvider::new("mock"));
        let adapter = ConsoleAdapter::new("local");
        let shutdown = CancellationToken::new();

        // Nothing is ever written: the reader stays pending like an idle terminal.
        let (_writer, reader) = tokio::io::duplex(64);
        let canceller = tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                shutdown.cancel();
            }
        });

        let mut output = Vec::new();
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            adapter.serve(BufReader::new(reader), &mut output, &relay, &shutdown),
        )
        .await
        .expect("serve should stop on cancellation")
        .unwrap();
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn sink_output_can_be_recovered() {
        let sink = ConsoleSink::new(Vec::new());
        sink.send_text(&ChatId::from("x"), "hello").await.unwrap();
        assert_eq!(sink.into_inner(), b"bot> hello\n");
    }
}
