use std::io::{self, Write};

use pomcheck_core::{AppViewModel, Severity, StatusLine};

use super::render::ConsoleCommand;

/// Terminal side of the form. Remembers what it last printed per region and
/// only prints regions that changed. Warnings go to the error stream.
pub struct ConsoleSurface<O: Write, E: Write> {
    out: O,
    err: E,
    echo_form: bool,
    inputs: Option<(String, Vec<String>)>,
    submit_enabled: Option<bool>,
    status: Option<StatusLine>,
    result: String,
}

impl<O: Write, E: Write> ConsoleSurface<O, E> {
    /// With `echo_form` off only status and result are printed.
    pub fn new(out: O, err: E, echo_form: bool) -> Self {
        Self {
            out,
            err,
            echo_form,
            inputs: None,
            submit_enabled: None,
            status: None,
            result: String::new(),
        }
    }

    pub fn apply(&mut self, commands: Vec<ConsoleCommand>) -> io::Result<()> {
        for command in commands {
            match command {
                ConsoleCommand::SetInputs { url, files } => {
                    let next = Some((url, files));
                    if self.inputs != next {
                        self.inputs = next;
                        if self.echo_form {
                            self.print_inputs()?;
                        }
                    }
                }
                ConsoleCommand::SetSubmitEnabled(enabled) => {
                    if self.submit_enabled != Some(enabled) {
                        self.submit_enabled = Some(enabled);
                        if self.echo_form {
                            writeln!(self.out, "submit: {}", enabled_label(enabled))?;
                        }
                    }
                }
                ConsoleCommand::SetStatus(status) => {
                    if self.status != status {
                        if let Some(line) = &status {
                            self.print_status(line)?;
                        }
                        self.status = status;
                    }
                }
                ConsoleCommand::SetResult(text) => {
                    if self.result != text {
                        if !text.is_empty() {
                            writeln!(self.out, "{text}")?;
                        }
                        self.result = text;
                    }
                }
            }
        }
        self.out.flush()?;
        self.err.flush()
    }

    /// Prints the whole form regardless of what was shown before.
    pub fn show(&mut self, view: &AppViewModel) -> io::Result<()> {
        self.inputs = Some((view.url_text.clone(), view.file_names.clone()));
        self.submit_enabled = Some(view.submit_enabled);
        self.status = view.status.clone();
        self.result = view.result_text.clone();

        self.print_inputs()?;
        writeln!(self.out, "submit: {}", enabled_label(view.submit_enabled))?;
        match &view.status {
            Some(line) => self.print_status(line)?,
            None => writeln!(self.out, "status: (none)")?,
        }
        if view.result_text.is_empty() {
            writeln!(self.out, "result: (none)")?;
        } else {
            writeln!(self.out, "{}", view.result_text)?;
        }
        self.out.flush()?;
        self.err.flush()
    }

    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "warning: {text}")?;
        self.err.flush()
    }

    fn print_inputs(&mut self) -> io::Result<()> {
        let (url, files) = self.inputs.clone().unwrap_or_default();
        let url = if url.is_empty() { "(empty)".to_string() } else { url };
        let files = if files.is_empty() {
            "(none)".to_string()
        } else {
            files.join(", ")
        };
        writeln!(self.out, "url: {url}")?;
        writeln!(self.out, "files: {files}")
    }

    fn print_status(&mut self, line: &StatusLine) -> io::Result<()> {
        match line.severity {
            Severity::Information => writeln!(self.out, "status: {}", line.text),
            Severity::Warning => writeln!(self.err, "warning: {}", line.text),
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
