use url::Url;

/// A file picked by the user, already read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Everything the user has typed or picked; read at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub url_text: String,
    pub selected_files: Vec<SelectedFile>,
}

/// What gets sent to the license service for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseRequest {
    /// Ask the service to fetch and analyse the POM at `target`.
    ByUrl { target: String },
    /// Upload a local POM's text for analysis.
    ByPom { file_name: String, content: String },
}

impl LicenseRequest {
    /// Status text shown once the request has succeeded.
    pub fn done_message(&self) -> String {
        match self {
            LicenseRequest::ByUrl { target } => format!("GET license data from {target}"),
            LicenseRequest::ByPom { .. } => "POST license data".to_string(),
        }
    }
}

pub fn validate_input(url_text: &str, selected_files: &[SelectedFile]) -> bool {
    is_pom_url(url_text)
        || selected_files
            .first()
            .is_some_and(|file| is_pom_file_name(&file.name))
}

/// True when `text` is an absolute URL with a host whose path ends in `.pom`.
pub fn is_pom_url(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    match Url::parse(text) {
        Ok(url) => {
            url.host_str().is_some_and(|host| !host.is_empty()) && url.path().ends_with(".pom")
        }
        Err(_) => false,
    }
}

pub fn is_pom_file_name(name: &str) -> bool {
    name == "pom.xml" || name.ends_with(".pom")
}

/// The URL wins whenever it is non-empty, even if only the file validated.
pub fn build_request(form: &FormState) -> Option<LicenseRequest> {
    if !form.url_text.is_empty() {
        return Some(LicenseRequest::ByUrl {
            target: form.url_text.clone(),
        });
    }
    form.selected_files
        .first()
        .map(|file| LicenseRequest::ByPom {
            file_name: file.name.clone(),
            content: file.content.clone(),
        })
}
