use mindporium_session::models::{PersistedSession, Role, User};

#[test]
fn test_role_wire_format_is_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(
        serde_json::to_string(&Role::Instructor).unwrap(),
        r#""instructor""#
    );
    assert_eq!(serde_json::to_string(&Role::Student).unwrap(), r#""student""#);
}

#[test]
fn test_unknown_role_falls_back_to_student() {
    // The backend growing a new role must never break deserialization or
    // surface an unguardable identity.
    let role: Role = serde_json::from_str(r#""superuser""#).unwrap();
    assert_eq!(role, Role::Student);
}

#[test]
fn test_user_tolerates_missing_optional_fields() {
    let raw = r#"{
        "id": 7,
        "email": "a@b.com",
        "full_name": "A B",
        "role": "instructor",
        "is_active": true,
        "is_verified": false
    }"#;
    let user: User = serde_json::from_str(raw).unwrap();
    assert_eq!(user.role, Role::Instructor);
    assert!(user.photo.is_none());
    assert!(user.created_at.is_none());
}

#[test]
fn test_persisted_session_round_trip() {
    let snapshot = PersistedSession {
        access_token: "tok".to_string(),
        user: User {
            id: 1,
            email: "a@b.com".to_string(),
            full_name: "A B".to_string(),
            role: Role::Admin,
            is_active: true,
            is_verified: true,
            ..User::default()
        },
        is_authenticated: true,
    };

    let raw = snapshot.serialize().unwrap();
    let restored = PersistedSession::deserialize(&raw).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn test_persisted_session_rejects_garbage_quietly() {
    assert!(PersistedSession::deserialize("").is_none());
    assert!(PersistedSession::deserialize("not json at all").is_none());
    assert!(PersistedSession::deserialize(r#"{"access_token": 5}"#).is_none());
}
