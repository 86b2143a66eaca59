// libs/booking-cell/src/services/contact.rs
use regex::Regex;
use tracing::debug;

use shared_models::UserProfile;

use crate::models::{ContactField, FieldErrors, IdentityRequirements, PatientContact};

const NATIONAL_ID_LEN: usize = 12;

/// Step-2 patient identity form. Inputs are normalized on every keystroke
/// (phone re-masked, national id reduced to digits); validation runs on
/// submit and defensively over session-filled fields too.
pub struct ContactForm {
    contact: PatientContact,
    requirements: IdentityRequirements,
    errors: FieldErrors,
    locked: bool,
}

impl ContactForm {
    pub fn new(requirements: IdentityRequirements) -> Self {
        Self {
            contact: PatientContact::default(),
            requirements,
            errors: FieldErrors::new(),
            locked: false,
        }
    }

    pub fn contact(&self) -> &PatientContact {
        &self.contact
    }

    pub fn requirements(&self) -> &IdentityRequirements {
        &self.requirements
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the fields are session-filled and rendered read-only.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Apply the authenticated patient's profile. Only fields the user has
    /// not already typed into are filled: a late-arriving profile must
    /// never clobber a more specific user edit.
    pub fn prefill(&mut self, profile: &UserProfile) {
        if self.contact.first_name.is_empty() {
            self.contact.first_name = profile.first_name.clone();
        }
        if self.contact.last_name.is_empty() {
            self.contact.last_name = profile.last_name.clone();
        }
        if phone_digits_of(&self.contact.phone).len() <= 1 {
            if let Some(phone) = &profile.phone {
                self.contact.phone = mask_phone(phone);
            }
        }

        debug!("Contact form prefilled from session profile");
        self.locked = true;
    }

    pub fn input_first_name(&mut self, value: &str) {
        if self.locked {
            return;
        }
        self.contact.first_name = value.to_string();
    }

    pub fn input_last_name(&mut self, value: &str) {
        if self.locked {
            return;
        }
        self.contact.last_name = value.to_string();
    }

    /// Re-masks on every keystroke: non-digits stripped, the country prefix
    /// normalized, separators re-inserted.
    pub fn input_phone(&mut self, raw: &str) {
        if self.locked {
            return;
        }
        self.contact.phone = mask_phone(raw);
    }

    pub fn input_national_id(&mut self, raw: &str) {
        if self.locked {
            return;
        }
        let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        digits.truncate(NATIONAL_ID_LEN);
        self.contact.national_id = Some(digits);
    }

    /// Validate against the configured field schema. Errors are kept for
    /// rendering and returned for the submit gate.
    pub fn validate(&mut self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.contact.first_name.trim().is_empty() {
            errors.insert(ContactField::FirstName, "First name is required".to_string());
        }

        if self.requirements.require_last_name && self.contact.last_name.trim().is_empty() {
            errors.insert(ContactField::LastName, "Last name is required".to_string());
        }

        let phone_regex = Regex::new(r"^\+7 \d{3} \d{3} \d{4}$").unwrap();
        if !phone_regex.is_match(&self.contact.phone) {
            errors.insert(
                ContactField::Phone,
                "Enter the phone as +7 XXX XXX XXXX".to_string(),
            );
        }

        if self.requirements.collect_national_id {
            let id_ok = self
                .contact
                .national_id
                .as_deref()
                .map(|id| id.len() == NATIONAL_ID_LEN && id.chars().all(|c| c.is_ascii_digit()))
                .unwrap_or(false);
            if !id_ok {
                errors.insert(
                    ContactField::NationalId,
                    "National ID must be exactly 12 digits".to_string(),
                );
            }
        }

        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Wire form of the phone: country code plus ten digits, no separators.
    pub fn phone_digits(&self) -> String {
        phone_digits_of(&self.contact.phone)
    }
}

/// Format any raw input as `+7 XXX XXX XXXX`, progressively for partial
/// numbers. A leading `8` or `7` is folded into the country code.
fn mask_phone(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.starts_with('7') || digits.starts_with('8') {
        digits.remove(0);
    }
    digits.truncate(10);

    let mut masked = String::from("+7");
    for (index, digit) in digits.chars().enumerate() {
        if index == 0 || index == 3 || index == 6 {
            masked.push(' ');
        }
        masked.push(digit);
    }

    masked
}

fn phone_digits_of(masked: &str) -> String {
    masked.chars().filter(char::is_ascii_digit).collect()
}
