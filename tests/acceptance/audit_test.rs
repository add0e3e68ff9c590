use uuid::Uuid;

use crate::common::init_env;
use rolegate::audit::{AuditAction, AuditLogger};
use rolegate::scope::Scope;

#[test]
fn test_audit_logging() {
    init_env();

    let logger = AuditLogger::new().unwrap();
    let org_id = Uuid::new_v4();

    logger
        .log(
            AuditAction::Resolve,
            Some(Scope::Team),
            Some(org_id),
            true,
            Some(12),
        )
        .unwrap();

    let entries = logger.read_logs(Some(Scope::Team), None).unwrap();

    assert!(!entries.is_empty());

    let entry = entries
        .iter()
        .find(|e| e.org_id == Some(org_id))
        .expect("logged entry not found");
    assert_eq!(entry.action, AuditAction::Resolve);
    assert_eq!(entry.scope, Some(Scope::Team));
    assert_eq!(entry.grant_count, Some(12));
    assert!(entry.success);

    assert!(logger.verify_entry(entry).unwrap());
}

#[test]
fn test_audit_signature_verification() {
    init_env();

    let logger = AuditLogger::new().unwrap();

    logger
        .log(AuditAction::Resolve, Some(Scope::Organization), None, true, Some(3))
        .unwrap();

    let entries = logger.read_logs(Some(Scope::Organization), None).unwrap();
    assert!(!entries.is_empty());
    let entry = &entries[0];

    assert!(logger.verify_entry(entry).unwrap());

    let mut tampered = entry.clone();
    tampered.grant_count = Some(999);

    assert!(!logger.verify_entry(&tampered).unwrap());
}

#[test]
fn test_audit_limit() {
    init_env();

    let logger = AuditLogger::new().unwrap();

    for _ in 0..10 {
        logger
            .log(AuditAction::Resolve, Some(Scope::Project), None, true, None)
            .unwrap();
    }

    let entries = logger.read_logs(Some(Scope::Project), Some(5)).unwrap();

    assert_eq!(entries.len(), 5);
}
