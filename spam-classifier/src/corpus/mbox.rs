//! MBOX format reading
//!
//! Messages are separated by `From ` lines; `>From ` escapes in bodies are
//! undone. Lines are read as bytes so invalid UTF-8 never aborts a corpus.

use std::io::{BufRead, BufReader, Read};

use crate::error::Result;

/// MBOX reader for corpus import
pub struct MboxReader<R: Read> {
    reader: BufReader<R>,
    current_line: Vec<u8>,
    message_count: u64,
    eof: bool,
    /// The From_ line of the next message is already in current_line
    has_pending_from: bool,
}

impl<R: Read> MboxReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            current_line: Vec::new(),
            message_count: 0,
            eof: false,
            has_pending_from: false,
        }
    }

    /// Read the next message
    pub fn read_message(&mut self) -> Result<Option<MboxMessage>> {
        if self.eof {
            return Ok(None);
        }

        if !self.has_pending_from {
            // Skip anything before the first From_ line
            loop {
                if !self.next_line()? {
                    self.eof = true;
                    return Ok(None);
                }

                if self.current_line.starts_with(b"From ") {
                    break;
                }
            }
        }

        self.has_pending_from = false;
        let from = parse_from_line(&self.current_line);

        let mut content = Vec::new();

        loop {
            if !self.next_line()? {
                self.eof = true;
                break;
            }

            if self.current_line.starts_with(b"From ") {
                self.has_pending_from = true;
                break;
            }

            let line = if self.current_line.starts_with(b">From ") {
                &self.current_line[1..]
            } else {
                &self.current_line[..]
            };

            content.extend_from_slice(line);
        }

        // Trailing separator lines
        while content.ends_with(b"\n\n") {
            content.pop();
        }

        self.message_count += 1;

        Ok(Some(MboxMessage { from, content }))
    }

    /// Number of messages read so far
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    fn next_line(&mut self) -> Result<bool> {
        self.current_line.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.current_line)?;
        Ok(bytes_read > 0)
    }
}

impl<R: Read> Iterator for MboxReader<R> {
    type Item = Result<MboxMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_message().transpose()
    }
}

/// Sender from a line such as `From sender@example.com Wed Dec 25 12:00:00 2024`
fn parse_from_line(line: &[u8]) -> String {
    let line = String::from_utf8_lossy(line);
    line.trim_end()
        .split(' ')
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

/// A message from an MBOX file
#[derive(Debug)]
pub struct MboxMessage {
    /// Sender from the From_ line
    pub from: String,
    /// Raw message content (headers + body)
    pub content: Vec<u8>,
}
