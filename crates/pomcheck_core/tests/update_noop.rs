use pomcheck_core::{update, AppState, Msg, SelectedFile};

#[test]
fn same_url_is_noop() {
    let (mut state, _) = update(AppState::new(), Msg::UrlChanged("http://x/y.pom".into()));
    assert!(state.consume_dirty());

    let (mut next, effects) = update(state.clone(), Msg::UrlChanged("http://x/y.pom".into()));

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}

#[test]
fn same_file_selection_is_noop() {
    let files = vec![SelectedFile::new("pom.xml", "<project/>")];
    let (mut state, _) = update(AppState::new(), Msg::FilesSelected(files.clone()));
    assert!(state.consume_dirty());

    let (mut next, effects) = update(state, Msg::FilesSelected(files));

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
