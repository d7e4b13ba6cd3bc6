use super::field::{validate, validate_all, FieldKey, FormValues};

/// When a field is validated outside of submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Only on Enter or submit; typing and leaving a field never touch errors
    OnConfirm,
    /// Also when the field loses focus
    OnBlur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    pub fn policy(&self) -> ValidationPolicy {
        match self {
            FormKind::Add => ValidationPolicy::OnConfirm,
            FormKind::Edit => ValidationPolicy::OnBlur,
        }
    }

    /// Fields validated on submit. Edit keeps the stored images, so no image rule.
    pub fn fields(&self) -> &'static [FieldKey] {
        match self {
            FormKind::Add => &FieldKey::ALL,
            FormKind::Edit => &FieldKey::TEXT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: FieldKey,
    pub value: String,
    pub error: Option<String>,
}

/// Result of pressing Enter in a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Validation failed; focus stays and the error is shown
    Stay(FieldKey),
    /// Move focus to the next field
    Focus(FieldKey),
    /// Last field passed; the caller should submit
    Submit,
    /// Shift+Enter in the description, or a field outside the chain
    Ignored,
}

/// Token for one in-flight submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitGate {
    /// Validation failed; no request may be sent. Carries the first failing field.
    Rejected(FieldKey),
    /// A submission is already in flight
    Busy,
    /// Send the request, then hand the ticket back to [`FormState::settle`]
    Proceed(SubmitTicket),
}

/// Product form state machine.
///
/// Holds values and per-field errors, decides focus movement and gates
/// submission. It does no I/O: the caller sends the request after
/// [`SubmitGate::Proceed`] and reports back through [`FormState::settle`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    kind: FormKind,
    fields: Vec<FormField>,
    image_count: usize,
    image_error: Option<String>,
    submitting: bool,
    generation: u64,
    focus: Option<FieldKey>,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        let fields = FieldKey::TEXT
            .iter()
            .map(|&key| FormField {
                key,
                value: String::new(),
                error: None,
            })
            .collect();
        Self {
            kind,
            fields,
            image_count: 0,
            image_error: None,
            submitting: false,
            generation: 0,
            focus: Some(FieldKey::Name),
        }
    }

    /// Load values of a fetched record. Unlike [`FormState::on_change`] this
    /// never resets the subcategory.
    pub fn hydrate(&mut self, values: &FormValues) {
        for field in &mut self.fields {
            field.value = values.text(field.key).to_string();
            field.error = None;
        }
        self.image_count = values.image_count;
        self.image_error = None;
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn value(&self, key: FieldKey) -> &str {
        self.field(key).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn error(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::Image => self.image_error.as_deref(),
            _ => self.field(key).and_then(|f| f.error.as_deref()),
        }
    }

    pub fn has_errors(&self) -> bool {
        FieldKey::ALL.iter().any(|&k| self.error(k).is_some())
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn focus(&self) -> Option<FieldKey> {
        self.focus
    }

    pub fn values(&self) -> FormValues {
        let mut values = FormValues {
            image_count: self.image_count,
            ..Default::default()
        };
        for field in &self.fields {
            if let Some(slot) = values.text_mut(field.key) {
                slot.clone_from(&field.value);
            }
        }
        values
    }

    /// A user edit. Choosing another category clears the subcategory.
    pub fn on_change(&mut self, key: FieldKey, value: String) {
        let category_changed = key == FieldKey::Category && self.value(key) != value;
        if let Some(field) = self.field_mut(key) {
            field.value = value;
        }
        if category_changed {
            if let Some(sub) = self.field_mut(FieldKey::Subcategory) {
                sub.value.clear();
            }
        }
    }

    /// The image collection changed size
    pub fn set_image_count(&mut self, count: usize) {
        self.image_count = count;
    }

    pub fn on_focus(&mut self, key: FieldKey) {
        self.focus = Some(key);
    }

    pub fn on_blur(&mut self, key: FieldKey) {
        if self.kind.policy() == ValidationPolicy::OnBlur {
            self.check(key);
        }
    }

    pub fn on_confirm(&mut self, key: FieldKey, shift: bool) -> ConfirmOutcome {
        if key == FieldKey::Description && shift {
            return ConfirmOutcome::Ignored;
        }
        if !self.check(key) {
            self.focus = Some(key);
            return ConfirmOutcome::Stay(key);
        }
        match key {
            FieldKey::Image => ConfirmOutcome::Ignored,
            FieldKey::Subcategory => ConfirmOutcome::Submit,
            _ => match key.next_in_chain() {
                Some(next) => {
                    self.focus = Some(next);
                    ConfirmOutcome::Focus(next)
                }
                None => ConfirmOutcome::Ignored,
            },
        }
    }

    pub fn begin_submit(&mut self) -> SubmitGate {
        if self.submitting {
            return SubmitGate::Busy;
        }
        let errors = validate_all(self.kind.fields(), &self.values());
        for key in self.kind.fields() {
            self.set_error(*key, errors.get(key).map(|m| m.to_string()));
        }
        if let Some((&first, _)) = errors.iter().next() {
            self.focus = Some(first);
            return SubmitGate::Rejected(first);
        }
        self.submitting = true;
        SubmitGate::Proceed(SubmitTicket {
            generation: self.generation,
        })
    }

    /// Finish a submission. Returns `false` when the ticket is stale, i.e. the
    /// form was reset or abandoned meanwhile; the caller must then drop the outcome.
    pub fn settle(&mut self, ticket: SubmitTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.submitting = false;
        true
    }

    /// Back to an empty form; in-flight tickets become stale
    pub fn reset(&mut self) {
        let kind = self.kind;
        let generation = self.generation + 1;
        *self = Self::new(kind);
        self.generation = generation;
    }

    /// The page is going away; in-flight tickets become stale
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.submitting = false;
    }

    /// Validate one field and record the result. Returns `true` on pass.
    fn check(&mut self, key: FieldKey) -> bool {
        let error = validate(key, &self.values());
        self.set_error(key, error.map(str::to_string));
        error.is_none()
    }

    fn set_error(&mut self, key: FieldKey, error: Option<String>) {
        match key {
            FieldKey::Image => self.image_error = error,
            _ => {
                if let Some(field) = self.field_mut(key) {
                    field.error = error;
                }
            }
        }
    }

    fn field(&self, key: FieldKey) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn field_mut(&mut self, key: FieldKey) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }
}
