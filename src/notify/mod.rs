//! Alert delivery.
//!
//! Alerts go out as a small HTML mail handed to a local sendmail-compatible
//! program (`sendmail -t -oi`), which reads recipients from the headers.
//! Delivery failures are returned to the caller, who reports them without
//! failing the scan.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::NotifyError;
use crate::store::diff::Alert;

pub const ALERT_SUBJECT: &str = "Security Alert: New or Modified Scripts";
pub const ALERT_HEADLINE: &str = "New or modified script in the following records:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub html_body: String,
}

impl Message {
    pub fn for_alerts(alerts: &[Alert]) -> Self {
        let mut html_body = format!("<p>{ALERT_HEADLINE}</p>\n");
        for alert in alerts {
            html_body.push_str(&format!("<p>{}</p>\n", escape_html(&alert.to_string())));
        }

        Message {
            subject: ALERT_SUBJECT.to_string(),
            html_body,
        }
    }
}

pub trait Notifier {
    fn send(&self, message: &Message) -> Result<(), NotifyError>;
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Splits "a@x, b@y" style recipient lists, dropping blanks.
pub fn parse_recipients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct SendmailNotifier {
    pub program: String,
    pub from_name: String,
    pub from_email: String,
    pub recipients: Vec<String>,
}

impl SendmailNotifier {
    fn from_header(&self) -> String {
        let name = self.from_name.replace(['"', '\r', '\n'], "");
        if name.is_empty() {
            self.from_email.clone()
        } else {
            format!("\"{name}\" <{}>", self.from_email)
        }
    }

    pub fn render(&self, message: &Message) -> String {
        let date = chrono::Local::now().to_rfc2822();
        let subject = message.subject.replace(['\r', '\n'], " ");

        let mut out = String::new();
        out.push_str(&format!("From: {}\r\n", self.from_header()));
        out.push_str(&format!("To: {}\r\n", self.recipients.join(", ")));
        out.push_str(&format!("Subject: {subject}\r\n"));
        out.push_str(&format!("Date: {date}\r\n"));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str("Content-Type: text/html; charset=utf-8\r\n");
        out.push_str("\r\n");
        out.push_str(&message.html_body.replace('\n', "\r\n"));
        out
    }
}

impl Notifier for SendmailNotifier {
    fn send(&self, message: &Message) -> Result<(), NotifyError> {
        if self.recipients.is_empty() {
            return Err(NotifyError::NoRecipients);
        }

        let mut child = Command::new(&self.program)
            .args(["-t", "-oi"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| NotifyError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let io_err = |source| NotifyError::Io {
            program: self.program.clone(),
            source,
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(self.render(message).as_bytes()) {
                drop(stdin);
                let _ = child.wait();
                return Err(io_err(e));
            }
        }

        let status = child.wait().map_err(io_err)?;
        if !status.success() {
            return Err(NotifyError::Rejected {
                program: self.program.clone(),
                status,
            });
        }

        log::info!("alert mail handed to {} for {} recipients", self.program, self.recipients.len());
        Ok(())
    }
}
