//! Field state and client-side validation for the schema request form.

use crate::navigation::{Navigation, Navigator};
use crate::types::{Environment, SchemaRequestPayload, SchemaType};

pub const ENVIRONMENT_REQUIRED: &str = "Selection Error: Please select an environment";
pub const SCHEMA_FILE_REQUIRED: &str = "File missing: Upload the AVRO schema file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Environment,
    SchemaFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub environment: Option<String>,
    pub schemafull: Option<String>,
    pub schema_type: SchemaType,
    pub remarks: String,
    pub force_register: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub environment: Option<&'static str>,
    pub schema_file: Option<&'static str>,
}

/// Places on the page that show a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSlot {
    EnvironmentSelect,
    SchemaUpload,
    SchemaPreview,
}

impl ErrorSlot {
    pub const ALL: [ErrorSlot; 3] = [
        ErrorSlot::EnvironmentSelect,
        ErrorSlot::SchemaUpload,
        ErrorSlot::SchemaPreview,
    ];
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.environment.is_none() && self.schema_file.is_none()
    }

    /// A missing schema file is reported under the upload and the preview.
    pub fn message_for(&self, slot: ErrorSlot) -> Option<&'static str> {
        match slot {
            ErrorSlot::EnvironmentSelect => self.environment,
            ErrorSlot::SchemaUpload | ErrorSlot::SchemaPreview => self.schema_file,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelAction {
    NavigateBack,
    Confirm,
}

/// Buttons of the cancel confirmation dialog. Either one closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelDialogChoice {
    ContinueWithRequest,
    CancelRequest,
}

impl CancelDialogChoice {
    pub fn resolve(self, navigator: &impl Navigator) {
        if self == CancelDialogChoice::CancelRequest {
            navigator.navigate(Navigation::Back);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRequestForm {
    topicname: String,
    initial: FormValues,
    values: FormValues,
    environment_locked: bool,
    environment_touched: bool,
    schema_file_touched: bool,
    submitted: bool,
}

impl SchemaRequestForm {
    pub fn new(topicname: impl Into<String>) -> Self {
        Self {
            topicname: topicname.into(),
            initial: FormValues::default(),
            values: FormValues::default(),
            environment_locked: false,
            environment_touched: false,
            schema_file_touched: false,
            submitted: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Pre-select an environment that came from the URL. It becomes part of
    /// the initial values, so it does not make the form dirty.
    pub fn lock_environment(&mut self, environment_id: impl Into<String>) {
        let id = Some(environment_id.into());
        self.initial.environment = id.clone();
        self.values.environment = id;
        self.environment_locked = true;
    }

    pub fn environment_locked(&self) -> bool {
        self.environment_locked
    }

    /// Entries of the environment selector. A locked selector offers only
    /// the environment it was locked to.
    pub fn selector_options(&self, options: &[Environment]) -> Vec<Environment> {
        if !self.environment_locked {
            return options.to_vec();
        }
        options
            .iter()
            .filter(|option| self.values.environment.as_deref() == Some(option.id.as_str()))
            .cloned()
            .collect()
    }

    /// Display name shown by a locked selector.
    pub fn locked_environment_label<'a>(&self, options: &'a [Environment]) -> Option<&'a str> {
        if !self.environment_locked {
            return None;
        }
        let id = self.values.environment.as_deref()?;
        options
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.name.as_str())
    }

    pub fn select_environment(&mut self, environment_id: &str) {
        if self.environment_locked {
            return;
        }
        self.values.environment = Some(environment_id.to_string()).filter(|id| !id.is_empty());
    }

    pub fn set_schemafull(&mut self, contents: String) {
        self.values.schemafull = Some(contents);
        self.schema_file_touched = true;
    }

    pub fn set_schema_type(&mut self, schema_type: SchemaType) {
        self.values.schema_type = schema_type;
    }

    pub fn set_remarks(&mut self, remarks: String) {
        self.values.remarks = remarks;
    }

    pub fn set_force_register(&mut self, checked: bool) {
        self.values.force_register = checked;
    }

    pub fn touch(&mut self, field: Field) {
        match field {
            Field::Environment => self.environment_touched = true,
            Field::SchemaFile => self.schema_file_touched = true,
        }
    }

    /// Every field reports its errors after a submit attempt.
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    pub fn validate(&self, options: &[Environment]) -> FieldErrors {
        let environment_valid = self
            .values
            .environment
            .as_deref()
            .is_some_and(|id| options.iter().any(|option| option.id == id));

        FieldErrors {
            environment: (!environment_valid).then_some(ENVIRONMENT_REQUIRED),
            schema_file: self
                .values
                .schemafull
                .is_none()
                .then_some(SCHEMA_FILE_REQUIRED),
        }
    }

    /// Errors of fields the user has left or of all fields after submit.
    pub fn visible_errors(&self, options: &[Environment]) -> FieldErrors {
        let errors = self.validate(options);
        FieldErrors {
            environment: errors
                .environment
                .filter(|_| self.submitted || self.environment_touched),
            schema_file: errors
                .schema_file
                .filter(|_| self.submitted || self.schema_file_touched),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    pub fn cancel_action(&self) -> CancelAction {
        if self.is_dirty() {
            CancelAction::Confirm
        } else {
            CancelAction::NavigateBack
        }
    }

    /// Build the request body. `force_register` is only sent when the
    /// caller has passed the compatibility warning and the box is checked.
    pub fn payload(
        &self,
        options: &[Environment],
        force_register: bool,
    ) -> Result<SchemaRequestPayload, FieldErrors> {
        let errors = self.validate(options);
        let (Some(environment), Some(schemafull)) =
            (self.values.environment.clone(), self.values.schemafull.clone())
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SchemaRequestPayload {
            environment,
            remarks: self.values.remarks.clone(),
            schemafull,
            topicname: self.topicname.clone(),
            schema_type: self.values.schema_type,
            force_register: (force_register && self.values.force_register).then_some(true),
        })
    }
}
