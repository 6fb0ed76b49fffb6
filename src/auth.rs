use crate::error::{SiteError, SiteResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Injected authentication policy. Rendering code never sees the secret,
/// only the verdict; swapping in a real credential store touches nothing
/// else.
pub trait AuthPolicy {
    fn validate(&self, credentials: &Credentials) -> SiteResult<()>;
}

/// The shipped policy: one literal editor account. Exact match, no hashing,
/// no lockout, one error for every wrong combination.
pub struct StaticCredentials {
    username: &'static str,
    password: &'static str,
}

impl StaticCredentials {
    pub fn editor() -> StaticCredentials {
        StaticCredentials {
            username: "Joaof",
            password: "Joaofff",
        }
    }
}

impl AuthPolicy for StaticCredentials {
    fn validate(&self, credentials: &Credentials) -> SiteResult<()> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(())
        } else {
            Err(SiteError::AuthRejected)
        }
    }
}

/// In-process editor session. Nothing is persisted: a restart re-derives
/// logged-out, matching a page reload in the hosted original.
#[derive(Debug, Default)]
pub struct AdminSession {
    authenticated: bool,
    admin_mode: bool,
}

impl AdminSession {
    pub fn is_admin(&self) -> bool {
        self.admin_mode
    }

    pub fn login(&mut self, policy: &dyn AuthPolicy, credentials: &Credentials) -> SiteResult<()> {
        policy.validate(credentials)?;
        self.authenticated = true;
        self.admin_mode = true;
        Ok(())
    }

    /// Turning admin mode back on after the first successful login does not
    /// re-prompt for credentials. Returns whether admin mode is now active;
    /// `false` with no prior login means the caller must show the form.
    pub fn toggle(&mut self) -> bool {
        if self.admin_mode {
            self.admin_mode = false;
        } else if self.authenticated {
            self.admin_mode = true;
        }
        self.admin_mode
    }

    pub fn needs_login(&self) -> bool {
        !self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(user: &str, pass: &str) -> Credentials {
        Credentials {
            username: user.to_string(),
            password: pass.to_string(),
        }
    }

    #[test]
    fn only_the_exact_literal_pair_is_accepted() {
        let policy = StaticCredentials::editor();
        assert!(policy.validate(&creds("Joaof", "Joaofff")).is_ok());

        let rejected = [
            ("Joaof", "joaofff"),
            ("joaof", "Joaofff"),
            ("Joaof", "Joaofff "),
            ("Joaof", ""),
            ("", "Joaofff"),
            ("", ""),
            ("admin", "admin"),
        ];
        for (user, pass) in rejected {
            let err = policy.validate(&creds(user, pass)).unwrap_err();
            assert!(matches!(err, SiteError::AuthRejected), "{}/{}", user, pass);
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn failed_login_does_not_mutate_the_session() {
        let policy = StaticCredentials::editor();
        let mut session = AdminSession::default();

        assert!(session.login(&policy, &creds("Joaof", "errada")).is_err());
        assert!(!session.is_admin());
        assert!(session.needs_login());
    }

    #[test]
    fn toggle_after_login_skips_the_form() {
        let policy = StaticCredentials::editor();
        let mut session = AdminSession::default();

        assert!(!session.toggle(), "no admin mode before any login");
        assert!(session.needs_login());

        session.login(&policy, &creds("Joaof", "Joaofff")).unwrap();
        assert!(session.is_admin());

        assert!(!session.toggle());
        assert!(!session.is_admin());

        assert!(session.toggle(), "re-enable without re-entering credentials");
        assert!(session.is_admin());
    }
}
