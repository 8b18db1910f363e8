//! Submission state machine, including the force-register override.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──▶ SuccessNavigated
//!                      │  ▲
//!                      │  └── submit (checkbox checked, forceRegister: true)
//!                      ├──▶ CompatibilityWarning
//!                      └──▶ ErrorShown ──submit──▶ Submitting
//! ```

use crate::api::ApiError;
use crate::navigation::{Navigation, Navigator};
use crate::toast::{Notify, Toast, ToastVariant};
use crate::types::{Environment, KlawApiResponse, SchemaRequestPayload};

use super::form::{FieldErrors, SchemaRequestForm};
use super::preflight::Preflight;

/// Rejection message the schema registry check produces. Matched exactly;
/// the API exposes no structured code for it.
pub const COMPATIBILITY_FAILURE_MESSAGE: &str = "failure: Schema is not compatible";
pub const SUCCESS_MESSAGE: &str = "Schema request successfully created";
pub const SUCCESS_ROUTE: &str = "/requests/schemas?status=CREATED";
pub const COMPATIBILITY_WARNING: &str = "Uploaded schema appears invalid.";

pub const SUBMIT_LABEL: &str = "Submit request";
pub const FORCE_REGISTER_SUBMIT_LABEL: &str = "Submit request to force register";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    SuccessNavigated,
    ErrorShown(String),
    CompatibilityWarning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRefused {
    /// Topic and environment have not been confirmed yet.
    PreflightIncomplete,
    InFlight,
    ForceRegisterUnconfirmed,
    Invalid(FieldErrors),
}

/// What the page must do once a request has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Created,
    CompatibilityWarning,
    Failed(String),
}

impl Completion {
    pub fn announce(&self, notify: &impl Notify, navigator: &impl Navigator) {
        if let Completion::Created = self {
            notify.toast(Toast::new(SUCCESS_MESSAGE, ToastVariant::Default));
            navigator.navigate(Navigation::To(SUCCESS_ROUTE.to_string()));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    state: SubmissionState,
    awaiting_force_register: bool,
}

impl Submission {
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Set after a compatibility rejection; the override stays offered for
    /// the rest of this form's life.
    pub fn awaiting_force_register(&self) -> bool {
        self.awaiting_force_register
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::ErrorShown(message) => Some(message),
            _ => None,
        }
    }

    /// Field completeness never disables submit; only an in-flight request
    /// or an unconfirmed override does.
    pub fn submit_enabled(&self, force_register_checked: bool) -> bool {
        !self.is_submitting() && (!self.awaiting_force_register || force_register_checked)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.awaiting_force_register {
            FORCE_REGISTER_SUBMIT_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn begin(
        &mut self,
        form: &SchemaRequestForm,
        options: &[Environment],
        preflight: &Preflight,
    ) -> Result<SchemaRequestPayload, SubmitRefused> {
        if !preflight.allows_submit() {
            return Err(SubmitRefused::PreflightIncomplete);
        }
        if self.is_submitting() {
            return Err(SubmitRefused::InFlight);
        }
        if self.awaiting_force_register && !form.values().force_register {
            return Err(SubmitRefused::ForceRegisterUnconfirmed);
        }

        let payload = form
            .payload(options, self.awaiting_force_register)
            .map_err(SubmitRefused::Invalid)?;

        log::info!(
            "Requesting schema for {} in environment {}{}",
            payload.topicname,
            payload.environment,
            if payload.force_register.is_some() { " (force register)" } else { "" }
        );
        self.state = SubmissionState::Submitting;
        Ok(payload)
    }

    /// Classify a settled request. A resolved body with `success: false` is
    /// a rejection like any error status.
    pub fn finish(&mut self, result: Result<KlawApiResponse, ApiError>) -> Completion {
        let error = match result {
            Ok(response) if response.success => {
                self.state = SubmissionState::SuccessNavigated;
                return Completion::Created;
            }
            Ok(response) => ApiError::Rejected(response.into()),
            Err(error) => error,
        };

        let rejection = error.rejection();
        log::error!("{:?}", rejection);

        if rejection.message() == COMPATIBILITY_FAILURE_MESSAGE {
            self.awaiting_force_register = true;
            self.state = SubmissionState::CompatibilityWarning;
            Completion::CompatibilityWarning
        } else {
            let message = rejection.message().to_string();
            self.state = SubmissionState::ErrorShown(message.clone());
            Completion::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_request::preflight::{environment_options, PreflightMismatch};
    use crate::schema_request::preflight::tests::{mocked_environments, TEST_TOPIC_NAME};
    use crate::toast::ToastPosition;
    use crate::types::{KlawApiError, KlawApiErrorData, SchemaType};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        toasts: RefCell<Vec<Toast>>,
        navigations: RefCell<Vec<Navigation>>,
    }

    impl Notify for Recorder {
        fn toast(&self, toast: Toast) {
            self.toasts.borrow_mut().push(toast);
        }
    }

    impl Navigator for Recorder {
        fn navigate(&self, target: Navigation) {
            self.navigations.borrow_mut().push(target);
        }
    }

    fn options() -> Vec<Environment> {
        environment_options(&mocked_environments())
    }

    fn proceed() -> Preflight {
        Preflight::Proceed {
            locked_environment: None,
        }
    }

    fn filled_form() -> SchemaRequestForm {
        let mut form = SchemaRequestForm::new(TEST_TOPIC_NAME);
        form.select_environment("1");
        form.set_schemafull("{}".to_string());
        form
    }

    fn expected_payload() -> SchemaRequestPayload {
        SchemaRequestPayload {
            environment: "1".to_string(),
            remarks: String::new(),
            schemafull: "{}".to_string(),
            topicname: TEST_TOPIC_NAME.to_string(),
            schema_type: SchemaType::Avro,
            force_register: None,
        }
    }

    fn created() -> Result<KlawApiResponse, ApiError> {
        Ok(KlawApiResponse {
            success: true,
            message: String::new(),
        })
    }

    fn rejected(message: &str) -> Result<KlawApiResponse, ApiError> {
        Err(ApiError::Rejected(KlawApiError {
            success: Some(false),
            message: Some(message.to_string()),
            ..Default::default()
        }))
    }

    fn success_toast() -> Toast {
        Toast {
            message: SUCCESS_MESSAGE.to_string(),
            position: ToastPosition::BottomLeft,
            variant: ToastVariant::Default,
        }
    }

    #[test]
    fn test_submit_enabled_regardless_of_field_completeness() {
        let mut submission = Submission::default();
        let empty = SchemaRequestForm::new(TEST_TOPIC_NAME);

        assert!(submission.submit_enabled(false));
        assert_eq!(submission.submit_label(), SUBMIT_LABEL);

        assert!(matches!(
            submission.begin(&empty, &options(), &proceed()),
            Err(SubmitRefused::Invalid(errors)) if errors.environment.is_some() && errors.schema_file.is_some()
        ));
        assert_eq!(submission.state(), &SubmissionState::Idle);
        assert!(submission.submit_enabled(false));
    }

    #[test]
    fn test_successful_submission_toasts_and_navigates() {
        let mut submission = Submission::default();
        let recorder = Recorder::default();

        let payload = submission.begin(&filled_form(), &options(), &proceed()).unwrap();
        assert_eq!(payload, expected_payload());
        assert!(submission.is_submitting());
        assert!(!submission.submit_enabled(false));

        let completion = submission.finish(created());
        completion.announce(&recorder, &recorder);

        assert_eq!(completion, Completion::Created);
        assert_eq!(submission.state(), &SubmissionState::SuccessNavigated);
        assert_eq!(*recorder.toasts.borrow(), vec![success_toast()]);
        assert_eq!(
            *recorder.navigations.borrow(),
            vec![Navigation::To(SUCCESS_ROUTE.to_string())]
        );
    }

    #[test]
    fn test_submit_refused_until_preflight_proceeds() {
        let mut submission = Submission::default();
        let form = filled_form();

        for preflight in [
            Preflight::Pending,
            Preflight::GoBack(PreflightMismatch::UnknownTopic),
            Preflight::GoBack(PreflightMismatch::UnknownEnvironment),
        ] {
            assert_eq!(
                submission.begin(&form, &options(), &preflight),
                Err(SubmitRefused::PreflightIncomplete)
            );
        }
        assert_eq!(submission.state(), &SubmissionState::Idle);
        assert!(submission.begin(&form, &options(), &proceed()).is_ok());
    }

    #[test]
    fn test_second_submit_refused_while_in_flight() {
        let mut submission = Submission::default();
        let form = filled_form();

        submission.begin(&form, &options(), &proceed()).unwrap();
        assert_eq!(submission.begin(&form, &options(), &proceed()), Err(SubmitRefused::InFlight));
    }

    #[test]
    fn test_hard_rejection_shows_message_without_navigation() {
        let mut submission = Submission::default();
        let recorder = Recorder::default();

        submission.begin(&filled_form(), &options(), &proceed()).unwrap();
        let completion = submission.finish(rejected("Oh no 😢"));
        completion.announce(&recorder, &recorder);

        assert_eq!(completion, Completion::Failed("Oh no 😢".to_string()));
        assert_eq!(submission.error_message(), Some("Oh no 😢"));
        assert!(!submission.awaiting_force_register());
        assert!(submission.submit_enabled(false));
        assert!(recorder.toasts.borrow().is_empty());
        assert!(recorder.navigations.borrow().is_empty());
    }

    #[test]
    fn test_rejection_message_from_data() {
        let mut submission = Submission::default();
        submission.begin(&filled_form(), &options(), &proceed()).unwrap();

        let completion = submission.finish(Err(ApiError::Rejected(KlawApiError {
            status: Some("400 BAD_REQUEST".to_string()),
            data: Some(KlawApiErrorData {
                message: "Error in request".to_string(),
            }),
            ..Default::default()
        })));

        assert_eq!(completion, Completion::Failed("Error in request".to_string()));
    }

    #[test]
    fn test_unsuccessful_response_is_a_rejection() {
        let mut submission = Submission::default();
        submission.begin(&filled_form(), &options(), &proceed()).unwrap();

        let completion = submission.finish(Ok(KlawApiResponse {
            success: false,
            message: "Topic does not exist".to_string(),
        }));

        assert_eq!(completion, Completion::Failed("Topic does not exist".to_string()));
    }

    #[test]
    fn test_similar_message_is_not_a_compatibility_failure() {
        let mut submission = Submission::default();
        submission.begin(&filled_form(), &options(), &proceed()).unwrap();

        let completion = submission.finish(rejected("failure: Schema is not compatible with v2"));

        assert!(matches!(completion, Completion::Failed(_)));
        assert!(!submission.awaiting_force_register());
    }

    #[test]
    fn test_force_register_flow() {
        let mut submission = Submission::default();
        let recorder = Recorder::default();
        let mut form = filled_form();

        submission.begin(&form, &options(), &proceed()).unwrap();
        let completion = submission.finish(rejected(COMPATIBILITY_FAILURE_MESSAGE));
        completion.announce(&recorder, &recorder);

        assert_eq!(completion, Completion::CompatibilityWarning);
        assert_eq!(submission.state(), &SubmissionState::CompatibilityWarning);
        assert!(submission.awaiting_force_register());
        assert_eq!(submission.submit_label(), FORCE_REGISTER_SUBMIT_LABEL);
        assert!(!submission.submit_enabled(false));
        assert!(recorder.toasts.borrow().is_empty());

        assert_eq!(
            submission.begin(&form, &options(), &proceed()),
            Err(SubmitRefused::ForceRegisterUnconfirmed)
        );

        form.set_force_register(true);
        assert!(submission.submit_enabled(form.values().force_register));

        let payload = submission.begin(&form, &options(), &proceed()).unwrap();
        assert_eq!(
            payload,
            SchemaRequestPayload {
                force_register: Some(true),
                ..expected_payload()
            }
        );

        submission.finish(created()).announce(&recorder, &recorder);
        assert_eq!(*recorder.toasts.borrow(), vec![success_toast()]);
        assert_eq!(
            *recorder.navigations.borrow(),
            vec![Navigation::To(SUCCESS_ROUTE.to_string())]
        );
    }
}
