use crate::application::error::{ApplicationError, ApplicationResult};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApplicationError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(ApplicationError::validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters long"
        )));
    }
    if password.trim() != password {
        return Err(ApplicationError::validation(
            "password cannot start or end with whitespace",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_password;

    #[test]
    fn rejects_short_and_padded_passwords() {
        assert!(validate_password("short").is_err());
        assert!(validate_password(" padded-enough ").is_err());
        assert!(validate_password("long-enough-password").is_ok());
    }
}
