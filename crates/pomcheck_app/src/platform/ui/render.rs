use pomcheck_core::{AppViewModel, StatusLine};

/// One region of the terminal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SetInputs { url: String, files: Vec<String> },
    SetSubmitEnabled(bool),
    SetStatus(Option<StatusLine>),
    SetResult(String),
}

pub fn render(view: &AppViewModel) -> Vec<ConsoleCommand> {
    vec![
        ConsoleCommand::SetInputs {
            url: view.url_text.clone(),
            files: view.file_names.clone(),
        },
        ConsoleCommand::SetSubmitEnabled(view.submit_enabled),
        ConsoleCommand::SetStatus(view.status.clone()),
        ConsoleCommand::SetResult(view.result_text.clone()),
    ]
}
