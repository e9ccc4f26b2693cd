//! Password rules shown on the reset-password form.

/// One password requirement with its i18n keys.
#[derive(Debug, Clone, Copy)]
pub struct PasswordRule {
    /// Stable rule id.
    pub id: &'static str,
    /// Checklist label key.
    pub label_key: &'static str,
    /// Error message key.
    pub error_key: &'static str,
    /// Checklist label as shown to pt-BR readers.
    pub label: &'static str,
    /// Error message as shown to pt-BR readers.
    pub error: &'static str,
    test: fn(&str) -> bool,
}

impl PasswordRule {
    /// Whether `value` satisfies the rule.
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        (self.test)(value)
    }
}

/// Minimum password length in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Rules in display and evaluation order.
pub const PASSWORD_RULES: [PasswordRule; 4] = [
    PasswordRule {
        id: "minLength",
        label_key: "validation.password.minLength.label",
        error_key: "validation.password.minLength.error",
        label: "no mínimo 6 caracteres",
        error: "A senha precisa ter no mínimo 6 caracteres.",
        test: |value| value.chars().count() >= MIN_PASSWORD_CHARS,
    },
    PasswordRule {
        id: "uppercase",
        label_key: "validation.password.uppercase.label",
        error_key: "validation.password.uppercase.error",
        label: "uma letra maiúscula",
        error: "A senha precisa ter uma letra maiúscula.",
        test: |value| value.chars().any(|c| c.is_ascii_uppercase()),
    },
    PasswordRule {
        id: "number",
        label_key: "validation.password.number.label",
        error_key: "validation.password.number.error",
        label: "um número",
        error: "A senha precisa ter um número.",
        test: |value| value.chars().any(|c| c.is_ascii_digit()),
    },
    PasswordRule {
        id: "special",
        label_key: "validation.password.special.label",
        error_key: "validation.password.special.error",
        label: "um caractere especial",
        error: "A senha precisa ter um caractere especial.",
        test: |value| value.chars().any(|c| !c.is_ascii_alphanumeric()),
    },
];

/// Error key of the first rule `value` breaks, or `Ok` when all pass.
pub fn validate_password(value: &str) -> Result<(), &'static str> {
    PASSWORD_RULES
        .iter()
        .find(|rule| !rule.is_satisfied_by(value))
        .map_or(Ok(()), |rule| Err(rule.error_key))
}

/// Rule labels joined for the form's one-line hint, e.g. "no mínimo 6 caracteres, um número".
pub fn password_rules_hint() -> String {
    PASSWORD_RULES
        .iter()
        .map(|rule| rule.label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Displayable message for an error key returned by [`validate_password`].
pub fn password_error_message(error_key: &str) -> Option<&'static str> {
    PASSWORD_RULES
        .iter()
        .find(|rule| rule.error_key == error_key)
        .map(|rule| rule.error)
}

/// Shown when the confirmation differs from the new password.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "As senhas não coincidem.";

/// Checks a reset form: the first broken rule wins, then the confirmation must match.
///
/// # Errors
///
/// Returns the displayable message for the first problem found.
pub fn validate_password_reset(password: &str, confirmation: &str) -> Result<(), &'static str> {
    validate_password(password)
        .map_err(|error_key| password_error_message(error_key).unwrap_or(error_key))?;
    if password != confirmation {
        return Err(PASSWORD_MISMATCH_MESSAGE);
    }
    Ok(())
}
