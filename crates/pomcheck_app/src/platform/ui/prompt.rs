use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
commands:
  url <text>     set the POM URL (no text clears it)
  file <path>    select a local POM (pom.xml or *.pom)
  clear-files    drop the file selection
  submit         send the form (only when the input is a POM)
  reset          clear everything
  show           print the whole form
  help           this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Url(String),
    File(PathBuf),
    ClearFiles,
    Submit,
    Reset,
    Show,
    Help,
    Quit,
}

/// Parses one prompt line. Blank lines yield `Ok(None)`.
pub fn parse_form_command(line: &str) -> Result<Option<FormCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "url" => FormCommand::Url(rest.to_string()),
        "file" => {
            if rest.is_empty() {
                return Err("file needs a path".to_string());
            }
            FormCommand::File(PathBuf::from(rest))
        }
        "clear-files" => FormCommand::ClearFiles,
        "submit" | "run" => FormCommand::Submit,
        "reset" => FormCommand::Reset,
        "show" => FormCommand::Show,
        "help" | "?" => FormCommand::Help,
        "quit" | "exit" => FormCommand::Quit,
        other => return Err(format!("unknown command `{other}` (try `help`)")),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_keeps_text_and_allows_clearing() {
        assert_eq!(
            parse_form_command("url  http://x/y.pom "),
            Ok(Some(FormCommand::Url("http://x/y.pom".to_string())))
        );
        assert_eq!(
            parse_form_command("url"),
            Ok(Some(FormCommand::Url(String::new())))
        );
    }

    #[test]
    fn file_path_may_contain_spaces() {
        assert_eq!(
            parse_form_command("file my project/pom.xml"),
            Ok(Some(FormCommand::File(PathBuf::from("my project/pom.xml"))))
        );
        assert!(parse_form_command("file").is_err());
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_form_command("   "), Ok(None));
        assert!(parse_form_command("launch").is_err());
    }
}
