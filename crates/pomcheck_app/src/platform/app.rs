use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pomcheck_core::{update, AppState, Msg, RequestOutcome, SelectedFile};
use pomcheck_engine::{load_pom, write_report, ApiCall, EngineHandle};
use pomcheck_logging::{pom_info, pom_warn};

use super::cli::{CacheAction, Cli, CliCommand};
use super::config::{self, Overrides};
use super::effects::EffectRunner;
use super::logging;
use super::ui::console::ConsoleSurface;
use super::ui::prompt::{parse_form_command, FormCommand, HELP_TEXT};
use super::ui::render::render;

const WAIT_SLICE: Duration = Duration::from_millis(100);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// How a one-shot check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    Success,
    Failed,
    /// The input does not describe a POM; nothing was sent.
    InvalidInput,
}

impl From<CheckStatus> for ExitCode {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Success => ExitCode::SUCCESS,
            CheckStatus::Failed => ExitCode::FAILURE,
            CheckStatus::InvalidInput => ExitCode::from(2),
        }
    }
}

pub fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    if let Some(destination) = cli.log.destination() {
        logging::initialize(destination);
    }

    let file_config = config::load_config(cli.config.as_deref());
    let settings = config::client_settings(
        &file_config,
        &Overrides {
            endpoint: cli.endpoint.clone(),
            depth: cli.depth,
        },
    );
    pom_info!("pomcheck starting; endpoint {}", settings.base_endpoint);

    let engine = EngineHandle::new(settings).context("failed to start the request engine")?;
    let runner = EffectRunner::new(engine);

    match cli.command {
        CliCommand::Check { url, files, dest } => {
            let surface = ConsoleSurface::new(io::stdout(), io::stderr(), false);
            let mut controller = Controller::new(runner, surface);
            check_once(&mut controller, url, &files, dest.as_deref()).map(ExitCode::from)
        }
        CliCommand::Form => run_form(runner),
        CliCommand::Caches { action } => run_caches(&runner, action),
    }
}

/// Owns the form state and pushes every change through `update`.
struct Controller<O: Write, E: Write> {
    state: AppState,
    runner: EffectRunner,
    surface: ConsoleSurface<O, E>,
}

impl<O: Write, E: Write> Controller<O, E> {
    fn new(runner: EffectRunner, surface: ConsoleSurface<O, E>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            surface,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.run(effects);
        if was_dirty {
            self.surface.apply(render(&view))?;
        }
        Ok(())
    }

    /// Applies every completion that has already arrived.
    fn pump(&mut self) -> io::Result<()> {
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    /// Blocks until the current submission, if any, has an outcome.
    fn wait_until_settled(&mut self) -> Result<()> {
        while matches!(self.state.outcome(), Some(RequestOutcome::Pending)) {
            let msg = self
                .runner
                .wait(WAIT_SLICE)
                .context("no result for the pending submission")?;
            if let Some(msg) = msg {
                self.dispatch(msg)?;
            }
        }
        Ok(())
    }

    fn handle(&mut self, command: FormCommand) -> Result<()> {
        match command {
            FormCommand::Url(text) => self.dispatch(Msg::UrlChanged(text))?,
            FormCommand::File(path) => match load_selected(&path) {
                Ok(file) => self.dispatch(Msg::FilesSelected(vec![file]))?,
                Err(err) => self.surface.warn(&format!("{err:#}"))?,
            },
            FormCommand::ClearFiles => self.dispatch(Msg::FilesSelected(Vec::new()))?,
            FormCommand::Submit => {
                if self.state.submit_enabled() {
                    self.dispatch(Msg::SubmitClicked)?;
                } else {
                    self.surface.warn(
                        "submit is disabled: set a URL ending in .pom or a pom.xml/*.pom file",
                    )?;
                }
            }
            FormCommand::Reset => {
                self.dispatch(Msg::ResetClicked)?;
                self.surface.note("form reset")?;
            }
            FormCommand::Show => self.surface.show(&self.state.view())?,
            FormCommand::Help => self.surface.note(HELP_TEXT)?,
            // The prompt loop leaves before dispatching this.
            FormCommand::Quit => {}
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> (O, E) {
        self.surface.into_parts()
    }
}

fn load_selected(path: &Path) -> Result<SelectedFile> {
    let pom = load_pom(path).with_context(|| format!("cannot use {:?}", path))?;
    Ok(SelectedFile::new(pom.name, pom.content))
}

fn check_once<O: Write, E: Write>(
    controller: &mut Controller<O, E>,
    url: Option<String>,
    files: &[PathBuf],
    dest: Option<&Path>,
) -> Result<CheckStatus> {
    if let Some(url) = url {
        controller.dispatch(Msg::UrlChanged(url))?;
    }
    if !files.is_empty() {
        let selected = files
            .iter()
            .map(|path| load_selected(path))
            .collect::<Result<Vec<_>>>()?;
        controller.dispatch(Msg::FilesSelected(selected))?;
    }

    if !controller.state.submit_enabled() {
        controller
            .surface
            .warn("nothing to submit: pass --url ending in .pom or --file pom.xml/*.pom")?;
        return Ok(CheckStatus::InvalidInput);
    }

    controller.dispatch(Msg::SubmitClicked)?;
    controller.wait_until_settled()?;

    match controller.state.outcome() {
        Some(RequestOutcome::Success(_)) => {
            if let Some(dest) = dest {
                export_report(dest, &controller.state.view().result_text)?;
            }
            Ok(CheckStatus::Success)
        }
        _ => Ok(CheckStatus::Failed),
    }
}

fn export_report(dest: &Path, report: &str) -> Result<()> {
    let written = write_report(dest, report)
        .with_context(|| format!("failed to write report to {:?}", dest))?;
    pom_info!("Report written to {:?}", written);
    Ok(())
}

fn run_form(runner: EffectRunner) -> Result<ExitCode> {
    let surface = ConsoleSurface::new(io::stdout(), io::stderr(), true);
    let mut controller = Controller::new(runner, surface);
    controller.surface.note(HELP_TEXT)?;
    controller.surface.show(&controller.state.view())?;

    let lines = spawn_stdin_reader();
    loop {
        controller.pump()?;
        match lines.recv_timeout(INPUT_POLL) {
            Ok(line) => match parse_form_command(&line) {
                Ok(Some(FormCommand::Quit)) => break,
                Ok(Some(command)) => controller.handle(command)?,
                Ok(None) => {}
                Err(message) => controller.surface.warn(&message)?,
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // End of input: let a submitted request finish before leaving.
                controller.wait_until_settled()?;
                break;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run_caches(runner: &EffectRunner, action: CacheAction) -> Result<ExitCode> {
    let call = match action {
        CacheAction::Dump => ApiCall::DumpCaches,
        CacheAction::Clear => ApiCall::ClearCaches,
    };
    match runner.call_blocking(call) {
        Ok(response) => {
            let text = serde_json::to_string_pretty(&response.json)
                .unwrap_or_else(|_| response.json.to_string());
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            pom_warn!("cache call failed: {}", err);
            eprintln!("warning: {}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
