use std::io::{self, Write};

use extractor_core::{AppViewModel, ResultPanel, SessionStatus, NOT_FOUND_TEXT, PLACEHOLDER_TEXT};
use extractor_engine::describe_data_uri;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub severity: Severity,
    pub text: String,
}

impl RenderLine {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Information, text)
    }
}

pub fn render(view: &AppViewModel) -> Vec<RenderLine> {
    let status_label = match view.status {
        SessionStatus::Idle => "Idle",
        SessionStatus::Submitting => "Submitting",
        SessionStatus::Succeeded => "Succeeded",
        SessionStatus::Failed => "Failed",
    };

    let mut lines = Vec::new();

    lines.push(RenderLine::info(match &view.file {
        Some(file) => format!(
            "Status: {} | File: {} ({}, {} bytes)",
            status_label,
            file.name,
            file.media_type,
            format_with_commas(file.size)
        ),
        None => format!("Status: {status_label} | No file selected"),
    }));

    if view.file.is_some() {
        let preview_text = match view.preview.as_deref().and_then(describe_data_uri) {
            Some((media_type, len)) => format!(
                "Preview: {} data URI, {} chars",
                media_type,
                format_with_commas(len as u64)
            ),
            None => "Preview: loading...".to_string(),
        };
        lines.push(RenderLine::info(preview_text));
    }

    let mut actions = format!(
        "[{}] {}",
        view.submit_label(),
        if view.submit_enabled { "ready" } else { "disabled" }
    );
    if view.reset_visible {
        actions.push_str(" | [Reset]");
    }
    lines.push(RenderLine::info(actions));

    lines.extend(render_panel(&view.panel));
    lines
}

fn render_panel(panel: &ResultPanel) -> Vec<RenderLine> {
    match panel {
        ResultPanel::Placeholder => vec![RenderLine::info(PLACEHOLDER_TEXT)],
        ResultPanel::Found(text) => vec![
            RenderLine::new(Severity::Success, "Message Found"),
            RenderLine::new(Severity::Success, format!("  {text}")),
        ],
        ResultPanel::NotFound => vec![
            RenderLine::new(Severity::Warning, "Message Not Found"),
            RenderLine::new(Severity::Warning, format!("  {NOT_FOUND_TEXT}")),
        ],
        ResultPanel::Error(message) => vec![RenderLine::new(Severity::Error, message.clone())],
    }
}

pub fn write_lines<W: Write>(out: &mut W, lines: &[RenderLine]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}{}", severity_tag(line.severity), line.text)?;
    }
    out.flush()
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Information => "",
        Severity::Success => "[ok] ",
        Severity::Warning => "[warn] ",
        Severity::Error => "[error] ",
    }
}

pub fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
