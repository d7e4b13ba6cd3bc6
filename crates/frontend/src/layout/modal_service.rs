use crate::shared::gateway::RemoteError;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Success,
    Error,
    Info,
}

impl ModalKind {
    fn class(&self) -> &'static str {
        match self {
            ModalKind::Success => "message-modal message-modal--success",
            ModalKind::Error => "message-modal message-modal--error",
            ModalKind::Info => "message-modal message-modal--info",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ModalKind::Success => "check",
            ModalKind::Error => "alert",
            ModalKind::Info => "alert",
        }
    }
}

/// Title and text of an outcome message
#[derive(Debug, Clone, PartialEq)]
pub struct ModalMessage {
    pub kind: ModalKind,
    pub title: String,
    pub text: String,
}

impl ModalMessage {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ModalKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ModalKind::Error,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ModalKind::Info,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Standard texts for a failed backend call
    pub fn from_error(err: &RemoteError) -> Self {
        match err {
            RemoteError::Unauthorized => {
                Self::error("Μη εξουσιοδοτημένο", "Παρακαλώ συνδεθείτε ως διαχειριστής.")
            }
            RemoteError::Server { .. } => {
                Self::error("Σφάλμα εξυπηρετητή", err.server_text().unwrap_or_default())
            }
            RemoteError::Network(_) => Self::error(
                "Σφάλμα δικτύου",
                "Το αίτημα απέτυχε. Δείτε την κονσόλα για λεπτομέρειες.",
            ),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ModalKind::Success
    }
}

/// One outcome modal for the whole app, provided through context
#[derive(Clone, Copy)]
pub struct ModalService {
    current: RwSignal<Option<ModalMessage>>,
    after_close: StoredValue<Option<Callback<()>>>,
}

impl ModalService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            after_close: StoredValue::new(None),
        }
    }

    pub fn show(&self, message: ModalMessage) {
        self.after_close.set_value(None);
        self.current.set(Some(message));
    }

    /// Show `message` and run `on_close` once it is dismissed
    pub fn show_then(&self, message: ModalMessage, on_close: Callback<()>) {
        self.after_close.set_value(Some(on_close));
        self.current.set(Some(message));
    }

    pub fn hide(&self) {
        self.current.set(None);
        if let Some(callback) = self.after_close.try_update_value(|cb| cb.take()).flatten() {
            callback.run(());
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.with(Option::is_some)
    }

    pub fn current(&self) -> Option<ModalMessage> {
        self.current.get()
    }
}

impl Default for ModalService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modal() -> ModalService {
    use_context::<ModalService>().expect("ModalService not provided in context")
}

/// Renders the current [`ModalMessage`], if any
#[component]
pub fn ModalHost() -> impl IntoView {
    let modal = use_modal();

    view! {
        {move || modal.current().map(|message| {
            view! {
                <div class="modal-overlay" on:click=move |_| modal.hide()>
                    <div class=message.kind.class() on:click=|e| e.stop_propagation()>
                        <div class="message-modal__icon">{icon(message.kind.icon())}</div>
                        <h3 class="message-modal__title">{message.title.clone()}</h3>
                        <p class="message-modal__text" style="white-space: pre-line">{message.text.clone()}</p>
                        <button class="button button--primary" on:click=move |_| modal.hide()>
                            "OK"
                        </button>
                    </div>
                </div>
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_texts() {
        let m = ModalMessage::from_error(&RemoteError::Unauthorized);
        assert_eq!(m.title, "Μη εξουσιοδοτημένο");
        assert_eq!(m.text, "Παρακαλώ συνδεθείτε ως διαχειριστής.");

        let m = ModalMessage::from_error(&RemoteError::Server {
            status: 500,
            body: "db down".into(),
        });
        assert_eq!(m.title, "Σφάλμα εξυπηρετητή");
        assert_eq!(m.text, "Server error: 500\ndb down");
        assert_eq!(m.kind, ModalKind::Error);

        let m = ModalMessage::from_error(&RemoteError::Network("offline".into()));
        assert_eq!(m.title, "Σφάλμα δικτύου");
        assert!(!m.is_success());
    }
}
