use crate::*;
use serde::Deserialize;

pub static SENDING_LABEL: &str = "Enviando...";
pub static SUBMIT_LABEL: &str = "Enviar Mensaje";
pub static SUCCESS_MESSAGE: &str = "✓ ¡Gracias por tu mensaje! Te responderemos pronto.";
pub static REJECTED_MESSAGE: &str = "✗ Oops! Hubo un problema al enviar tu formulario.";
pub static OFFLINE_MESSAGE: &str =
    "✗ Error de conexión. Por favor, verifica tu conexión a internet.";
pub static SUCCESS_COLOR: &str = "var(--primary-color)";
pub static ERROR_COLOR: &str = "#d32f2f";

/// Contact form as rendered inside the `contacto` fragment
#[async_trait(?Send)]
pub trait ContactFormView {
    /// Whether the status line is present, nothing is submitted without it
    fn has_status(&self) -> bool;
    /// Disables the submit button and shows [`SENDING_LABEL`], or restores it
    fn set_sending(&self, sending: bool);
    fn show_status(&self, status: &FormStatus);
    /// Clears the fields
    fn reset(&self);
    /// Sends the fields to the form's action with its method and `Accept: application/json`
    async fn send(&self) -> Result<Fetched>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStatus {
    pub sent: bool,
    pub message: String,
}

impl FormStatus {
    pub fn color(&self) -> &'static str {
        if self.sent {
            SUCCESS_COLOR
        } else {
            ERROR_COLOR
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            sent: false,
            message: message.into(),
        }
    }

    /// Status line for whatever the form backend answered
    pub fn from_reply(reply: &Result<Fetched>) -> Self {
        match reply {
            Ok(fetched) if fetched.status.is_success() => Self {
                sent: true,
                message: SUCCESS_MESSAGE.to_owned(),
            },
            Ok(fetched) => match backend_errors(&fetched.body) {
                Some(errors) => Self::failed(format!("✗ {errors}")),
                None => Self::failed(REJECTED_MESSAGE),
            },
            Err(_) => Self::failed(OFFLINE_MESSAGE),
        }
    }
}

#[derive(Deserialize)]
struct ErrorReply {
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Deserialize)]
struct FieldError {
    #[serde(default)]
    message: String,
}

/// Messages of `{"errors": [{"message": ..}]}` joined with commas
fn backend_errors(body: &str) -> Option<String> {
    let reply: ErrorReply = serde_json::from_str(body).ok()?;
    if reply.errors.is_empty() {
        return None;
    }
    let messages: Vec<_> = reply.errors.into_iter().map(|e| e.message).collect();
    Some(messages.join(", "))
}

/// Submits the form and reports the outcome on its status line.
/// Returns `None` when the form has no status line to report on.
pub async fn submit_contact_form<V: ContactFormView + ?Sized>(form: &V) -> Option<FormStatus> {
    if !form.has_status() {
        return None;
    }

    form.set_sending(true);
    let reply = form.send().await;
    if let Err(e) = &reply {
        error!("Error sending contact form: {e}");
    }

    let status = FormStatus::from_reply(&reply);
    form.show_status(&status);
    if status.sent {
        form.reset();
    }
    form.set_sending(false);
    Some(status)
}
