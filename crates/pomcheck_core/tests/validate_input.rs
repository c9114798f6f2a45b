use pomcheck_core::{build_request, validate_input, FormState, LicenseRequest, SelectedFile};

fn files(names: &[&str]) -> Vec<SelectedFile> {
    names
        .iter()
        .map(|name| SelectedFile::new(*name, "<project/>"))
        .collect()
}

#[test]
fn url_ending_in_pom_is_valid() {
    assert!(validate_input("http://x/y.pom", &[]));
}

#[test]
fn url_with_other_extension_is_invalid() {
    assert!(!validate_input("http://x/y.txt", &[]));
}

#[test]
fn empty_input_is_invalid() {
    assert!(!validate_input("", &[]));
}

#[test]
fn pom_xml_file_is_valid() {
    assert!(validate_input("", &files(&["pom.xml"])));
}

#[test]
fn dot_pom_file_is_valid() {
    assert!(validate_input("", &files(&["foo.pom"])));
}

#[test]
fn other_file_is_invalid() {
    assert!(!validate_input("", &files(&["readme.txt"])));
}

#[test]
fn only_first_file_is_considered() {
    assert!(!validate_input("", &files(&["readme.txt", "pom.xml"])));
    assert!(validate_input("", &files(&["pom.xml", "readme.txt"])));
}

#[test]
fn valid_file_rescues_invalid_url() {
    assert!(validate_input("http://x/y.txt", &files(&["pom.xml"])));
}

#[test]
fn request_prefers_non_empty_url() {
    let form = FormState {
        url_text: "http://x/y.pom".to_string(),
        selected_files: files(&["pom.xml"]),
    };

    assert_eq!(
        build_request(&form),
        Some(LicenseRequest::ByUrl {
            target: "http://x/y.pom".to_string()
        })
    );
}

#[test]
fn request_uploads_first_file_when_url_empty() {
    let form = FormState {
        url_text: String::new(),
        selected_files: vec![
            SelectedFile::new("pom.xml", "<project>a</project>"),
            SelectedFile::new("other.pom", "<project>b</project>"),
        ],
    };

    assert_eq!(
        build_request(&form),
        Some(LicenseRequest::ByPom {
            file_name: "pom.xml".to_string(),
            content: "<project>a</project>".to_string(),
        })
    );
}

#[test]
fn empty_form_builds_no_request() {
    assert_eq!(build_request(&FormState::default()), None);
}
