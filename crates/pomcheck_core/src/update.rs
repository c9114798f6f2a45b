use crate::{build_request, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(text) => {
            state.set_url_text(text);
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            state.set_selected_files(files);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Disabled submit button: nothing leaves the form.
            if !state.submit_enabled() {
                return (state, Vec::new());
            }
            match build_request(state.form()) {
                Some(request) => {
                    let submission_id = state.begin_submission(request.clone());
                    vec![Effect::SendRequest {
                        submission_id,
                        request,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::ResponseReceived {
            submission_id,
            result,
        } => {
            // Stale completions (after reset or a newer submit) are dropped.
            state.complete_submission(submission_id, result);
            Vec::new()
        }
    };

    (state, effects)
}
