use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::model::{ListingId, User};

/// Validation failures shown to the user as a dismissible notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{field} must be a whole number, got {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Listing {0} no longer exists")]
    UnknownListing(ListingId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Any non-empty email and password are accepted. The display name is
    /// the part of the email before `@`.
    pub fn validate(&self) -> Result<User, FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        let name = self
            .email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string();
        Ok(User {
            name,
            email: self.email.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<User, FormError> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(User {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }
}

/// Contact form on the room detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryReceipt {
    pub id: Uuid,
    pub listing: ListingId,
    pub sender: String,
    pub sent_at: OffsetDateTime,
}

impl InquiryForm {
    /// Validates the form and clears it. Nothing is delivered anywhere; the
    /// receipt is all that is left of the inquiry.
    pub fn submit(&mut self, listing: ListingId) -> Result<InquiryReceipt, FormError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(FormError::MissingFields);
        }
        let receipt = InquiryReceipt {
            id: Uuid::new_v4(),
            listing,
            sender: self.email.clone(),
            sent_at: OffsetDateTime::now_utc(),
        };
        *self = InquiryForm::default();
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_derives_name_from_email() {
        let form = LoginForm {
            email: "jane.doe@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let user = form.validate().unwrap();
        assert_eq!(user.name, "jane.doe");
        assert_eq!(user.email, "jane.doe@example.com");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "jane@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_register_checks_confirmation() {
        let mut form = RegisterForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "a".to_string(),
            confirm_password: "b".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));

        form.confirm_password = "a".to_string();
        let user = form.validate().unwrap();
        assert_eq!(user.name, "Jane");

        form.name.clear();
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_inquiry_submit_resets_form() {
        let mut form = InquiryForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: String::new(),
            message: "Is it still available?".to_string(),
            date: "2026-11-01".to_string(),
        };
        let receipt = form.submit(ListingId(2)).unwrap();
        assert_eq!(receipt.listing, ListingId(2));
        assert_eq!(receipt.sender, "sam@example.com");
        assert_eq!(form, InquiryForm::default());
    }

    #[test]
    fn test_inquiry_requires_message() {
        let mut form = InquiryForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(form.submit(ListingId(2)), Err(FormError::MissingFields));
        assert_eq!(form.name, "Sam");
    }
}
