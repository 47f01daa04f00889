use std::fmt;

use crate::errors::CredentialError;
use crate::services::CredentialCodec;
use crate::types::db::{identity, permission};

/// Permission name that confers elevated status. Identities holding it are
/// excluded from ordinary-user enumerations.
pub const ADMIN_PERMISSION: &str = "admin";

/// A user account hydrated from the store: unique handle, derived credential,
/// and the names of its granted permissions.
///
/// The credential field is private. It can only be changed through
/// [`Identity::set_password`], so a raw plaintext can never end up in the
/// stored slot.
#[derive(Clone, PartialEq)]
pub struct Identity {
    id: String,
    name: String,
    credential: Option<String>,
    permissions: Vec<String>,
}

impl Identity {
    pub(crate) fn from_models(
        model: identity::Model,
        permissions: Vec<permission::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            credential: model.credential,
            permissions: permissions.into_iter().map(|p| p.name).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Replace the stored credential with a fresh derivation of `plaintext`.
    ///
    /// The plaintext itself is never retained.
    pub fn set_password(
        &mut self,
        codec: &CredentialCodec,
        plaintext: &str,
    ) -> Result<(), CredentialError> {
        self.credential = Some(codec.derive(plaintext)?);
        Ok(())
    }

    /// Check `attempt` against the stored credential.
    ///
    /// Returns false when no credential has been set.
    pub fn validate_password(&self, attempt: &str) -> bool {
        match &self.credential {
            Some(stored) => CredentialCodec::verify(attempt, stored),
            None => false,
        }
    }

    /// Names of all permissions granted to this identity. Order carries no
    /// meaning.
    pub fn permission_names(&self) -> &[String] {
        &self.permissions
    }

    /// Case-sensitive exact membership test against `permission_names`.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_permission(ADMIN_PERMISSION)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("permissions", &self.permissions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_identity(permissions: &[&str]) -> Identity {
        let model = identity::Model {
            id: "id-1".to_string(),
            name: "alice".to_string(),
            credential: None,
            created_at: 0,
            updated_at: 0,
        };
        let permissions = permissions
            .iter()
            .enumerate()
            .map(|(i, name)| permission::Model {
                id: i as i32 + 1,
                identity_id: "id-1".to_string(),
                name: name.to_string(),
                created_at: 0,
            })
            .collect();
        Identity::from_models(model, permissions)
    }

    #[test]
    fn has_permission_matches_exact_name() {
        let identity = sample_identity(&["admin", "edit_posts"]);

        assert!(identity.has_permission("admin"));
        assert!(identity.has_permission("edit_posts"));
        assert!(!identity.has_permission("delete_posts"));
    }

    #[test]
    fn has_permission_is_case_sensitive() {
        let identity = sample_identity(&["admin"]);

        assert!(identity.has_permission("admin"));
        assert!(!identity.has_permission("Admin"));
        assert!(!identity.has_permission("ADMIN"));
    }

    #[test]
    fn is_admin_requires_admin_permission() {
        assert!(sample_identity(&["admin"]).is_admin());
        assert!(!sample_identity(&["edit_posts"]).is_admin());
        assert!(!sample_identity(&[]).is_admin());
    }

    #[test]
    fn permission_names_projects_all_grants() {
        let identity = sample_identity(&["a", "b", "c"]);

        assert_eq!(identity.permission_names().len(), 3);
        assert!(identity.permission_names().contains(&"b".to_string()));
    }

    #[test]
    fn validate_password_is_false_without_credential() {
        let identity = sample_identity(&[]);

        assert!(!identity.validate_password("anything"));
    }

    #[test]
    fn set_password_roundtrip() {
        let codec = CredentialCodec::default();
        let mut identity = sample_identity(&[]);

        identity
            .set_password(&codec, "hunter2")
            .expect("Failed to set password");

        assert!(identity.validate_password("hunter2"));
        assert!(!identity.validate_password("hunter3"));
    }

    #[test]
    fn display_renders_name_only() {
        let codec = CredentialCodec::default();
        let mut identity = sample_identity(&[]);
        identity
            .set_password(&codec, "supersecret")
            .expect("Failed to set password");

        assert_eq!(format!("{}", identity), "alice");
    }

    #[test]
    fn debug_redacts_credential() {
        let codec = CredentialCodec::default();
        let mut identity = sample_identity(&[]);
        identity
            .set_password(&codec, "supersecret")
            .expect("Failed to set password");

        let debug_output = format!("{:?}", identity);

        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains("pbkdf2"));
        assert!(!debug_output.contains("supersecret"));
    }
}
