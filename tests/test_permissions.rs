use proptest::prelude::*;
use skillsync::config::{OperationConfig, PermissionsConfig};
use skillsync::error::PermissionError;
use skillsync::permissions::{render_prompt, Checker, OperationType, PermissionLevel};
use skillsync::platform::Scope;

fn confirm(
    checker: &Checker,
    op: OperationType,
    answer: &str,
) -> (Result<(), PermissionError>, String) {
    let mut input = answer.as_bytes();
    let mut prompt = Vec::new();
    let outcome = checker.check_and_confirm_with(op, "ok", &mut input, &mut prompt);
    (outcome, String::from_utf8(prompt).unwrap())
}

#[test]
fn delete_confirmed_with_y() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    let (outcome, prompt) = confirm(&checker, OperationType::Delete, "y\n");
    assert!(outcome.is_ok());
    assert!(prompt.contains("Delete ok?"));
    assert!(prompt.ends_with("[y/N]: "));
}

#[test]
fn delete_declined_with_n_is_cancelled() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    let (outcome, _) = confirm(&checker, OperationType::Delete, "n\n");
    assert!(matches!(
        outcome,
        Err(PermissionError::Cancelled(OperationType::Delete))
    ));
}

#[test]
fn confirmation_accepts_yes_in_any_case() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    assert!(confirm(&checker, OperationType::Delete, "  YES \n").0.is_ok());
    assert!(confirm(&checker, OperationType::Delete, "Y").0.is_ok());
    assert!(confirm(&checker, OperationType::Delete, "yep\n").0.is_err());
}

#[test]
fn closed_input_declines() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    let (outcome, prompt) = confirm(&checker, OperationType::BackupDelete, "");
    assert!(matches!(outcome, Err(PermissionError::Cancelled(_))));
    assert!(prompt.contains("Delete backup ok?"));
}

#[test]
fn no_prompt_when_confirmation_not_required() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    let mut input = "".as_bytes();
    let mut prompt = Vec::new();
    let approved = checker
        .request_confirmation_with(OperationType::Write, "review.md", &mut input, &mut prompt)
        .unwrap();
    assert!(approved);
    assert!(prompt.is_empty());
}

#[test]
fn read_only_level_rejects_write() {
    let config = PermissionsConfig {
        default_level: PermissionLevel::ReadOnly,
        ..PermissionsConfig::default()
    };
    let checker = Checker::new(&config);

    assert!(checker.check_operation(OperationType::Read).is_ok());
    let err = checker.check_operation(OperationType::Write).unwrap_err();
    assert!(matches!(
        err,
        PermissionError::InsufficientLevel {
            operation: OperationType::Write,
            required: PermissionLevel::Write,
            current: PermissionLevel::ReadOnly,
        }
    ));
}

#[test]
fn write_level_rejects_destructive_operations() {
    let config = PermissionsConfig {
        default_level: PermissionLevel::Write,
        ..PermissionsConfig::default()
    };
    let checker = Checker::new(&config);

    assert!(checker.check_operation(OperationType::Backup).is_ok());
    for op in [
        OperationType::Delete,
        OperationType::Overwrite,
        OperationType::BackupDelete,
    ] {
        assert!(checker.check_operation(op).is_err(), "{op}");
    }
}

#[test]
fn disabled_operation_is_rejected_before_level() {
    let mut config = PermissionsConfig::default();
    config.set_operation(
        OperationType::Delete,
        OperationConfig {
            enabled: false,
            require_confirmation: None,
        },
    );
    let checker = Checker::new(&config);

    assert!(matches!(
        checker.check_operation(OperationType::Delete),
        Err(PermissionError::OperationDisabled(OperationType::Delete))
    ));
    // Disabled means no prompt is ever shown.
    let (outcome, prompt) = confirm(&checker, OperationType::Delete, "y\n");
    assert!(outcome.is_err());
    assert!(prompt.is_empty());
}

#[test]
fn default_scope_rules() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    assert!(checker.check_scope(Scope::User).is_ok());
    assert!(checker.check_scope(Scope::Repo).is_ok());
    assert!(matches!(
        checker.check_scope(Scope::System),
        Err(PermissionError::ScopeWriteDisabled(Scope::System))
    ));
    assert!(matches!(
        checker.check_scope(Scope::Admin),
        Err(PermissionError::ScopeWriteDisabled(Scope::Admin))
    ));
}

#[test]
fn admin_follows_system_flag() {
    let mut config = PermissionsConfig::default();
    config.scope_permissions.allow_system_scope = true;
    let checker = Checker::new(&config);

    assert!(checker.check_scope(Scope::System).is_ok());
    assert!(checker.check_scope(Scope::Admin).is_ok());
}

#[test]
fn builtin_and_plugin_are_never_writable() {
    let mut config = PermissionsConfig::default();
    config.scope_permissions.allow_system_scope = true;
    let checker = Checker::new(&config);

    for scope in [Scope::Builtin, Scope::Plugin] {
        assert!(matches!(
            checker.check_scope(scope),
            Err(PermissionError::ScopeAlwaysReadOnly(s)) if s == scope
        ));
    }
}

#[test]
fn scope_by_name() {
    let mut config = PermissionsConfig::default();
    config.scope_permissions.allow_repo_scope = false;
    let checker = Checker::new(&config);

    assert_eq!(checker.check_scope_name("user").unwrap(), Scope::User);
    assert!(matches!(
        checker.check_scope_name("repo"),
        Err(PermissionError::ScopeWriteDisabled(Scope::Repo))
    ));
    assert!(matches!(
        checker.check_scope_name("galaxy"),
        Err(PermissionError::UnknownScope(ref name)) if name == "galaxy"
    ));
}

#[test]
fn overwrite_needs_no_confirmation_by_default() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);

    // Intrinsically confirmable, but the config default turns it off.
    assert!(OperationType::Overwrite.requires_confirmation());
    assert!(!checker.requires_confirmation(OperationType::Overwrite));
    assert!(checker.requires_confirmation(OperationType::Delete));
    assert!(checker.requires_confirmation(OperationType::BackupDelete));
    assert!(!checker.requires_confirmation(OperationType::Write));
    assert!(!checker.requires_confirmation(OperationType::Backup));
    assert!(checker.requires_promote_confirmation());
}

#[test]
fn per_operation_override_wins() {
    let mut config = PermissionsConfig::default();
    config.set_operation(
        OperationType::Overwrite,
        OperationConfig {
            enabled: true,
            require_confirmation: Some(true),
        },
    );
    config.set_operation(
        OperationType::Delete,
        OperationConfig {
            enabled: true,
            require_confirmation: Some(false),
        },
    );
    config.set_operation(OperationType::BackupDelete, OperationConfig::default());
    let checker = Checker::new(&config);

    assert!(checker.requires_confirmation(OperationType::Overwrite));
    assert!(!checker.requires_confirmation(OperationType::Delete));
    // An unset override defers to the defaults.
    assert!(checker.requires_confirmation(OperationType::BackupDelete));
}

#[test]
fn configured_defaults_apply_without_override() {
    let mut config = PermissionsConfig::default();
    config.require_confirmation.delete = false;
    config.require_confirmation.overwrite = true;
    let checker = Checker::new(&config);

    assert!(!checker.requires_confirmation(OperationType::Delete));
    assert!(checker.requires_confirmation(OperationType::Overwrite));
}

#[test]
fn authorize_checks_scope_only_for_mutations() {
    let config = PermissionsConfig::default();
    let checker = Checker::new(&config);
    let mut prompt = Vec::new();

    let mut input = "".as_bytes();
    assert!(checker
        .authorize_with(OperationType::Read, Scope::Builtin, "skills", &mut input, &mut prompt)
        .is_ok());

    let mut input = "".as_bytes();
    assert!(matches!(
        checker.authorize_with(OperationType::Write, Scope::Plugin, "skills", &mut input, &mut prompt),
        Err(PermissionError::ScopeAlwaysReadOnly(Scope::Plugin))
    ));
    assert!(prompt.is_empty());

    let mut input = "yes\n".as_bytes();
    assert!(checker
        .authorize_with(OperationType::Delete, Scope::Repo, "old.md", &mut input, &mut prompt)
        .is_ok());
    assert!(!prompt.is_empty());
}

#[test]
fn prompt_text_per_operation() {
    colored::control::set_override(false);
    assert_eq!(
        render_prompt(OperationType::Delete, "a.md"),
        "⚠ Delete a.md? This cannot be undone. [y/N]: "
    );
    assert_eq!(
        render_prompt(OperationType::Overwrite, "b.md"),
        "⚠ Overwrite b.md? The existing content will be replaced. [y/N]: "
    );
    assert_eq!(
        render_prompt(OperationType::Write, "c.md"),
        "? Proceed with write operation on c.md? [y/N]: "
    );
}

#[test]
fn operation_keys_round_trip() {
    for op in OperationType::ALL {
        assert_eq!(OperationType::from_key(op.key()), Some(op));
    }
    assert_eq!(
        OperationType::from_key("backup-delete"),
        Some(OperationType::BackupDelete)
    );
    assert_eq!(OperationType::from_key("rename"), None);
}

#[test]
fn level_names_parse() {
    assert_eq!("read-only".parse::<PermissionLevel>().unwrap(), PermissionLevel::ReadOnly);
    assert_eq!("Destructive".parse::<PermissionLevel>().unwrap(), PermissionLevel::Destructive);
    assert!("admin".parse::<PermissionLevel>().is_err());
}

fn any_level() -> impl Strategy<Value = PermissionLevel> {
    prop_oneof![
        Just(PermissionLevel::ReadOnly),
        Just(PermissionLevel::Write),
        Just(PermissionLevel::Destructive),
    ]
}

fn any_operation() -> impl Strategy<Value = OperationType> {
    proptest::sample::select(OperationType::ALL.to_vec())
}

proptest! {
    #[test]
    fn allows_matches_numeric_order(a in any_level(), b in any_level()) {
        prop_assert_eq!(a.allows(b), a.value() >= b.value());
        prop_assert_eq!(a.allows(b), a >= b);
    }

    #[test]
    fn check_operation_follows_level(level in any_level(), op in any_operation()) {
        let config = PermissionsConfig { default_level: level, ..PermissionsConfig::default() };
        let checker = Checker::new(&config);
        prop_assert_eq!(
            checker.check_operation(op).is_ok(),
            level.allows(op.required_level())
        );
    }
}

#[test]
fn aliased_operation_key_disables_operation() {
    let yaml = "operations:\n  backup-delete:\n    enabled: false\n  Delete:\n    enabled: false\n";
    let config = PermissionsConfig::from_yaml(yaml).unwrap();
    let checker = Checker::new(&config);

    assert!(matches!(
        checker.check_operation(OperationType::BackupDelete),
        Err(PermissionError::OperationDisabled(OperationType::BackupDelete))
    ));
    assert!(matches!(
        checker.check_operation(OperationType::Delete),
        Err(PermissionError::OperationDisabled(OperationType::Delete))
    ));
    assert!(checker.check_operation(OperationType::Write).is_ok());
}
