use std::io::{BufRead, Write};

use crate::config::PermissionsConfig;
use crate::error::PermissionError;
use crate::permissions::{prompt, OperationType};
use crate::platform::Scope;

/// The permission gate.
///
/// Holds a shared reference to a frozen [`PermissionsConfig`]; checks have no
/// side effects except [`request_confirmation`](Checker::request_confirmation),
/// which talks to the terminal.
///
/// # Examples
///
/// ```
/// use skillsync::config::PermissionsConfig;
/// use skillsync::permissions::{Checker, OperationType};
/// use skillsync::platform::Scope;
///
/// let config = PermissionsConfig::default();
/// let checker = Checker::new(&config);
///
/// assert!(checker.check_operation(OperationType::Delete).is_ok());
/// assert!(checker.check_scope(Scope::Plugin).is_err());
/// assert!(!checker.requires_confirmation(OperationType::Overwrite));
///
/// let mut input = "yes\n".as_bytes();
/// let mut prompt = Vec::new();
/// checker
///     .check_and_confirm_with(OperationType::Delete, "old.md", &mut input, &mut prompt)
///     .unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    config: &'a PermissionsConfig,
}

impl<'a> Checker<'a> {
    pub fn new(config: &'a PermissionsConfig) -> Self {
        Checker { config }
    }

    pub fn config(&self) -> &'a PermissionsConfig {
        self.config
    }

    /// Fails if `op` is disabled in the operations map, or if the default
    /// level does not reach the level `op` requires.
    pub fn check_operation(&self, op: OperationType) -> Result<(), PermissionError> {
        if let Some(settings) = self.config.operation(op) {
            if !settings.enabled {
                return Err(PermissionError::OperationDisabled(op));
            }
        }

        let required = op.required_level();
        if !self.config.default_level.allows(required) {
            return Err(PermissionError::InsufficientLevel {
                operation: op,
                required,
                current: self.config.default_level,
            });
        }

        Ok(())
    }

    /// Fails unless `scope` may be written.
    ///
    /// Builtin and plugin scopes are always read-only. Admin follows the
    /// system flag.
    pub fn check_scope(&self, scope: Scope) -> Result<(), PermissionError> {
        let scopes = &self.config.scope_permissions;
        let allowed = match scope {
            Scope::User => scopes.allow_user_scope,
            Scope::Repo => scopes.allow_repo_scope,
            Scope::System | Scope::Admin => scopes.allow_system_scope,
            Scope::Builtin | Scope::Plugin => {
                return Err(PermissionError::ScopeAlwaysReadOnly(scope))
            }
        };

        if allowed {
            Ok(())
        } else {
            Err(PermissionError::ScopeWriteDisabled(scope))
        }
    }

    /// [`check_scope`](Self::check_scope) for a scope given by name; unknown
    /// names fail with [`PermissionError::UnknownScope`].
    pub fn check_scope_name(&self, name: &str) -> Result<Scope, PermissionError> {
        let scope: Scope = name
            .parse()
            .map_err(|_| PermissionError::UnknownScope(name.to_string()))?;
        self.check_scope(scope)?;
        Ok(scope)
    }

    /// Whether `op` must be confirmed.
    ///
    /// A per-operation override wins; delete, overwrite and backup-delete
    /// then follow the configured defaults; anything else falls back to the
    /// operation's intrinsic default.
    pub fn requires_confirmation(&self, op: OperationType) -> bool {
        if let Some(explicit) = self
            .config
            .operation(op)
            .and_then(|settings| settings.require_confirmation)
        {
            return explicit;
        }

        let defaults = &self.config.require_confirmation;
        match op {
            OperationType::Delete => defaults.delete,
            OperationType::Overwrite => defaults.overwrite,
            OperationType::BackupDelete => defaults.backup_delete,
            other => other.requires_confirmation(),
        }
    }

    /// Whether promoting a skill and removing the original needs confirmation.
    pub fn requires_promote_confirmation(&self) -> bool {
        self.config.require_confirmation.promote_with_removal
    }

    /// Prompts on stderr and reads the answer from stdin.
    ///
    /// Returns `Ok(true)` without prompting when `op` needs no confirmation.
    pub fn request_confirmation(
        &self,
        op: OperationType,
        details: &str,
    ) -> Result<bool, PermissionError> {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut writer = std::io::stderr();
        self.request_confirmation_with(op, details, &mut reader, &mut writer)
    }

    /// [`request_confirmation`](Self::request_confirmation) over arbitrary
    /// streams.
    pub fn request_confirmation_with<R: BufRead, W: Write>(
        &self,
        op: OperationType,
        details: &str,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<bool, PermissionError> {
        if !self.requires_confirmation(op) {
            return Ok(true);
        }
        prompt::ask(op, details, reader, writer)
    }

    /// [`check_operation`](Self::check_operation) followed by
    /// [`request_confirmation`](Self::request_confirmation). A declined
    /// prompt is [`PermissionError::Cancelled`].
    pub fn check_and_confirm(&self, op: OperationType, details: &str) -> Result<(), PermissionError> {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut writer = std::io::stderr();
        self.check_and_confirm_with(op, details, &mut reader, &mut writer)
    }

    pub fn check_and_confirm_with<R: BufRead, W: Write>(
        &self,
        op: OperationType,
        details: &str,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<(), PermissionError> {
        self.check_operation(op)?;
        if self.request_confirmation_with(op, details, reader, writer)? {
            Ok(())
        } else {
            Err(PermissionError::Cancelled(op))
        }
    }

    /// Full gate for an operation on `scope`: operation check, scope check
    /// for mutating operations, then confirmation.
    pub fn authorize(
        &self,
        op: OperationType,
        scope: Scope,
        details: &str,
    ) -> Result<(), PermissionError> {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut writer = std::io::stderr();
        self.authorize_with(op, scope, details, &mut reader, &mut writer)
    }

    pub fn authorize_with<R: BufRead, W: Write>(
        &self,
        op: OperationType,
        scope: Scope,
        details: &str,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<(), PermissionError> {
        self.check_operation(op)?;
        if op.is_mutating() {
            self.check_scope(scope)?;
        }
        if self.request_confirmation_with(op, details, reader, writer)? {
            tracing::debug!(%op, %scope, "operation authorized");
            Ok(())
        } else {
            Err(PermissionError::Cancelled(op))
        }
    }
}
