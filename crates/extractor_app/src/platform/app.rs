use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use extractor_core::{update, AppState, Msg, SessionStatus};
use extractor_engine::ClientConfig;
use extractor_logging::{extractor_info, extractor_warn};

use super::effects::{EffectRunner, EffectSink};
use super::ui::commands::{parse_command, UiCommand};
use super::ui::render::{self, RenderLine, Severity};
use super::{logging, picker, ui};

/// Render/poll cadence; completions are picked up at least this often.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    logging::initialize_from_env();

    let config = ClientConfig::from_env().context("invalid API_BASE_URL")?;
    let endpoint = config.endpoint().to_string();
    extractor_info!("Starting with decoding endpoint {}", endpoint);

    let (input_tx, input_rx) = mpsc::channel::<UiCommand>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(parse_command(&line)).is_err() {
                break;
            }
        }
    });

    let stdout = io::stdout();
    let mut handler = AppEventHandler::new(Box::new(EffectRunner::new(config)), stdout.lock());
    handler.start(&endpoint)?;

    let mut input_open = true;
    loop {
        if input_open {
            match input_rx.recv_timeout(TICK_INTERVAL) {
                Ok(command) => {
                    if handler.handle_command(command)? == Flow::Quit {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => handler.dispatch_msg(Msg::Tick),
                Err(RecvTimeoutError::Disconnected) => {
                    extractor_info!("Input closed");
                    input_open = false;
                }
            }
        } else {
            // Piped input ended; let pending work land before leaving.
            if !handler.has_pending_work() {
                break;
            }
            thread::sleep(TICK_INTERVAL);
            handler.dispatch_msg(Msg::Tick);
        }

        handler.process_pending_messages();
        handler.flush_render()?;
    }

    extractor_info!("Exiting");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) struct AppEventHandler<W: Write> {
    state: AppState,
    effects: Box<dyn EffectSink>,
    out: W,
    needs_render: bool,
}

impl<W: Write> AppEventHandler<W> {
    pub(crate) fn new(effects: Box<dyn EffectSink>, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
            needs_render: false,
        }
    }

    fn start(&mut self, endpoint: &str) -> io::Result<()> {
        let banner: Vec<RenderLine> = ui::layout::banner(endpoint)
            .into_iter()
            .map(|line| RenderLine::new(Severity::Information, line))
            .collect();
        render::write_lines(&mut self.out, &banner)?;
        self.needs_render = true;
        self.flush_render()
    }

    pub(crate) fn handle_command(&mut self, command: UiCommand) -> io::Result<Flow> {
        match command {
            UiCommand::Select(path) => match picker::pick_image(&path) {
                Ok(file) => self.dispatch_msg(Msg::FileSelected(file)),
                Err(err) => {
                    extractor_warn!("Selection rejected: {}", err);
                    self.notice(Severity::Warning, err.to_string())?;
                }
            },
            UiCommand::Submit => {
                // The affordance is disabled while a request is in flight.
                if self.state.status() == SessionStatus::Submitting {
                    self.notice(Severity::Information, "Already processing; please wait.")?;
                } else {
                    self.dispatch_msg(Msg::SubmitClicked);
                }
            }
            UiCommand::Reset => {
                if self.state.view().reset_visible {
                    self.dispatch_msg(Msg::ResetClicked);
                } else {
                    self.notice(Severity::Information, "Nothing to reset.")?;
                }
            }
            UiCommand::Help => {
                let lines: Vec<RenderLine> = ui::layout::help_lines()
                    .into_iter()
                    .map(|line| RenderLine::new(Severity::Information, line))
                    .collect();
                render::write_lines(&mut self.out, &lines)?;
            }
            UiCommand::Quit => return Ok(Flow::Quit),
            UiCommand::Empty => {}
            UiCommand::Invalid(message) => self.notice(Severity::Warning, message)?,
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_render = true;
        }
        self.state = state;
        if !effects.is_empty() {
            self.effects.enqueue(effects);
        }
    }

    pub(crate) fn process_pending_messages(&mut self) {
        for msg in self.effects.drain() {
            self.dispatch_msg(msg);
        }
    }

    /// Renders the view if anything changed since the last render.
    pub(crate) fn flush_render(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.needs_render) {
            return Ok(());
        }
        let mut lines = vec![RenderLine::new(Severity::Information, "")];
        lines.extend(render::render(&self.state.view()));
        render::write_lines(&mut self.out, &lines)
    }

    /// Only an in-flight submission is waited for; a preview may never arrive.
    fn has_pending_work(&self) -> bool {
        self.state.status() == SessionStatus::Submitting
    }

    fn notice(&mut self, severity: Severity, text: impl Into<String>) -> io::Result<()> {
        render::write_lines(&mut self.out, &[RenderLine::new(severity, text)])
    }
}
