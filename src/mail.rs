// 📧 Mail - MIME message construction + local SMTP relay delivery
// Builds a multipart/mixed message with one attachment and hands it to a
// relay over a plain synchronous SMTP session. The attachment path is
// validated up front, before any SMTP traffic.

use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::path::Path;
use uuid::Uuid;

use crate::error::ReportError;

// ============================================================================
// MESSAGE
// ============================================================================

/// A fully assembled RFC 2822 message with one attachment
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: String,
    pub recipient: String,
    pub subject: String,

    /// Complete wire form: headers + multipart body, CRLF line endings
    raw: String,
}

impl Message {
    /// Assemble a message with a plain-text body and one attachment.
    ///
    /// Reads the attachment, infers its MIME type from the file extension,
    /// and base64-encodes it into a `multipart/mixed` body. An unreadable
    /// attachment or one whose type cannot be inferred is a `Delivery`
    /// error - the message is never half-built.
    pub fn build(
        sender: &str,
        recipient: &str,
        subject: &str,
        body: &str,
        attachment_path: &Path,
    ) -> Result<Message, ReportError> {
        let data = fs::read(attachment_path).map_err(|e| {
            ReportError::delivery(format!("attachment {}: {}", attachment_path.display(), e))
        })?;

        let filename = attachment_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ReportError::delivery(format!(
                    "attachment path has no filename: {}",
                    attachment_path.display()
                ))
            })?;

        let mime_type = guess_mime_type(attachment_path).ok_or_else(|| {
            ReportError::delivery(format!("cannot infer MIME type for {}", filename))
        })?;

        let boundary = format!("=_{}", Uuid::new_v4().simple());
        let message_id = format!("<{}@localhost>", Uuid::new_v4());
        let date = chrono::Utc::now().to_rfc2822();
        let encoded = wrap_base64(&general_purpose::STANDARD.encode(&data));

        let raw = format!(
            "From: {sender}\r\n\
             To: {recipient}\r\n\
             Subject: {subject}\r\n\
             Date: {date}\r\n\
             Message-ID: {message_id}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n\
             \r\n\
             --{boundary}\r\n\
             Content-Type: text/plain; charset=\"utf-8\"\r\n\
             Content-Transfer-Encoding: 8bit\r\n\
             \r\n\
             {body}\r\n\
             \r\n\
             --{boundary}\r\n\
             Content-Type: {mime_type}; name=\"{filename}\"\r\n\
             Content-Disposition: attachment; filename=\"{filename}\"\r\n\
             Content-Transfer-Encoding: base64\r\n\
             \r\n\
             {encoded}\r\n\
             --{boundary}--\r\n",
        );

        Ok(Message {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            raw,
        })
    }

    /// Wire form of the message
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Infer a MIME type from the file extension
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some("text/html"),
        "txt" => Some("text/plain"),
        "json" => Some("application/json"),
        "csv" => Some("text/csv"),
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Fold base64 output at 76 columns (RFC 2045)
fn wrap_base64(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + 2 * (encoded.len() / 76 + 1));
    let mut column = 0;
    for c in encoded.chars() {
        if column == 76 {
            out.push_str("\r\n");
            column = 0;
        }
        out.push(c);
        column += 1;
    }
    out
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// Mail delivery seam - lets tests substitute the relay
pub trait MailTransport {
    /// Deliver one message, or fail with `Delivery`
    fn deliver(&self, message: &Message) -> Result<(), ReportError>;
}

/// SmtpRelay - minimal synchronous SMTP submission
///
/// Speaks just enough of the protocol for a trusting local relay:
/// HELO, MAIL FROM, RCPT TO, DATA, QUIT. No auth, no TLS.
pub struct SmtpRelay {
    addr: String,
}

impl SmtpRelay {
    pub fn new(addr: impl Into<String>) -> Self {
        SmtpRelay { addr: addr.into() }
    }

    /// The conventional local relay on port 25
    pub fn localhost() -> Self {
        SmtpRelay::new("localhost:25")
    }
}

impl MailTransport for SmtpRelay {
    fn deliver(&self, message: &Message) -> Result<(), ReportError> {
        let stream = TcpStream::connect(&self.addr)
            .map_err(|e| ReportError::delivery(format!("connect {}: {}", self.addr, e)))?;

        let mut session = SmtpSession::new(stream)?;

        session.expect(220)?;
        session.command("HELO localhost", 250)?;
        session.command(&format!("MAIL FROM:<{}>", message.sender), 250)?;
        session.command(&format!("RCPT TO:<{}>", message.recipient), 250)?;
        session.command("DATA", 354)?;
        session.send_data(message.raw())?;

        // best-effort goodbye; the message is already accepted
        let _ = session.command("QUIT", 221);

        Ok(())
    }
}

/// One open SMTP session
struct SmtpSession {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl SmtpSession {
    fn new(stream: TcpStream) -> Result<Self, ReportError> {
        let writer = stream
            .try_clone()
            .map_err(|e| ReportError::delivery(format!("relay socket: {}", e)))?;
        Ok(SmtpSession {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Read one reply, skipping "250-" continuation lines, and return its code
    fn read_reply(&mut self) -> Result<u16, ReportError> {
        loop {
            let mut line = String::new();
            let n = self
                .reader
                .read_line(&mut line)
                .map_err(|e| ReportError::delivery(format!("relay read: {}", e)))?;

            if n == 0 {
                return Err(ReportError::delivery("relay closed the connection"));
            }
            if line.len() < 4 {
                return Err(ReportError::delivery(format!("short reply: {:?}", line)));
            }

            if line.as_bytes()[3] == b' ' {
                return line[..3]
                    .parse()
                    .map_err(|_| ReportError::delivery(format!("bad reply: {:?}", line)));
            }
        }
    }

    fn expect(&mut self, code: u16) -> Result<(), ReportError> {
        let got = self.read_reply()?;
        if got == code {
            Ok(())
        } else {
            Err(ReportError::delivery(format!(
                "relay replied {} (expected {})",
                got, code
            )))
        }
    }

    fn command(&mut self, cmd: &str, expected: u16) -> Result<(), ReportError> {
        self.write_line(cmd)?;
        self.expect(expected)
    }

    /// Send the DATA payload with dot-stuffing and the terminating "."
    fn send_data(&mut self, raw: &str) -> Result<(), ReportError> {
        for line in raw.lines() {
            if line.starts_with('.') {
                self.write_bytes(b".")?;
            }
            self.write_line(line)?;
        }
        self.write_line(".")?;
        self.expect(250)
    }

    fn write_line(&mut self, line: &str) -> Result<(), ReportError> {
        self.write_bytes(line.as_bytes())?;
        self.write_bytes(b"\r\n")
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ReportError> {
        self.writer
            .write_all(bytes)
            .map_err(|e| ReportError::delivery(format!("relay write: {}", e)))
    }
}
