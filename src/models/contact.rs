use std::time::{Duration, Instant};

use crate::error::ShopError;

/// Confirmation shown once a message has been "sent"
pub const SENT_MESSAGE: &str = "Message sent successfully! We will get back to you soon.";

/// Field of the contact form, in tab order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    #[default]
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] =
        [ContactField::Name, ContactField::Email, ContactField::Message];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Sending { due: Instant },
}

/// Contact form with a simulated network delay on submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    state: SubmitState,
}

impl ContactForm {
    pub fn new() -> Self {
        ContactForm {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            state: SubmitState::Idle,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.to_string();
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, SubmitState::Sending { .. })
    }

    /// Start sending. Returns when the send will finish.
    pub fn submit(&mut self, now: Instant, delay: Duration) -> Result<Instant, ShopError> {
        if self.is_sending() {
            return Err(ShopError::SubmissionInFlight);
        }
        for field in ContactField::ALL {
            if self.field(field).trim().is_empty() {
                return Err(ShopError::MissingField(field.label()));
            }
        }

        let due = now + delay;
        self.state = SubmitState::Sending { due };
        log::debug!("Contact form: sending message from {}", self.email);
        Ok(due)
    }

    /// Finish a send whose delay has elapsed, resetting the form.
    /// Returns the confirmation message when that happened.
    pub fn poll(&mut self, now: Instant) -> Option<&'static str> {
        match self.state {
            SubmitState::Sending { due } if now >= due => Some(self.complete()),
            _ => None,
        }
    }

    /// Finish the send immediately, resetting the form
    pub fn complete(&mut self) -> &'static str {
        *self = ContactForm::new();
        SENT_MESSAGE
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        ContactForm::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(ContactField::Name, "Ada");
        form.set_field(ContactField::Email, "ada@example.com");
        form.set_field(ContactField::Message, "Do you ship abroad?");
        form
    }

    #[test]
    fn test_submit_requires_all_fields() {
        let mut form = filled();
        form.set_field(ContactField::Email, "  ");
        assert_eq!(
            form.submit(Instant::now(), Duration::from_millis(1500)),
            Err(ShopError::MissingField("email"))
        );
        assert!(!form.is_sending());
    }

    #[test]
    fn test_submit_then_complete_resets() {
        let now = Instant::now();
        let delay = Duration::from_millis(1500);
        let mut form = filled();

        let due = form.submit(now, delay).unwrap();
        assert!(form.is_sending());
        assert_eq!(form.poll(now), None);
        assert_eq!(form.name, "Ada");

        assert_eq!(form.poll(due), Some(SENT_MESSAGE));
        assert!(!form.is_sending());
        assert!(form.name.is_empty());
        assert!(form.message.is_empty());
    }

    #[test]
    fn test_double_submit_rejected() {
        let now = Instant::now();
        let mut form = filled();
        form.submit(now, Duration::from_secs(1)).unwrap();
        assert_eq!(
            form.submit(now, Duration::from_secs(1)),
            Err(ShopError::SubmissionInFlight)
        );
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(ContactField::Name.next(), ContactField::Email);
        assert_eq!(ContactField::Message.next(), ContactField::Name);
    }
}
