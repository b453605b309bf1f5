use mindporium_session::storage::{
    ACCESS_TOKEN_KEY, FileSessionStorage, MemorySessionStorage, SNAPSHOT_KEY, SessionStorage,
};

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemorySessionStorage::new();
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());

        storage.set(ACCESS_TOKEN_KEY, "tok-1");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-1"));

        storage.set(ACCESS_TOKEN_KEY, "tok-2");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-2"));

        storage.remove(ACCESS_TOKEN_KEY);
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let storage = MemorySessionStorage::new();
        storage.remove("never-set");
        assert!(storage.get("never-set").is_none());
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let storage = FileSessionStorage::new(dir.path()).unwrap();
            storage.set(ACCESS_TOKEN_KEY, "persisted-token");
            storage.set(SNAPSHOT_KEY, r#"{"fake":"snapshot"}"#);
        }

        // A fresh instance over the same directory sees the same entries.
        let reopened = FileSessionStorage::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get(ACCESS_TOKEN_KEY).as_deref(),
            Some("persisted-token")
        );
        assert_eq!(
            reopened.get(SNAPSHOT_KEY).as_deref(),
            Some(r#"{"fake":"snapshot"}"#)
        );
    }

    #[test]
    fn test_remove_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let storage = FileSessionStorage::new(dir.path()).unwrap();
            storage.set(ACCESS_TOKEN_KEY, "short-lived");
            storage.remove(ACCESS_TOKEN_KEY);
        }

        let reopened = FileSessionStorage::new(dir.path()).unwrap();
        assert!(reopened.get(ACCESS_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_corrupt_file_is_discarded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), "{{{ not json").unwrap();

        let storage = FileSessionStorage::new(dir.path()).unwrap();
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());

        // And the store remains writable afterwards.
        storage.set(ACCESS_TOKEN_KEY, "recovered");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("recovered"));
    }

    #[test]
    fn test_creates_missing_state_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("state");

        let storage = FileSessionStorage::new(&nested).unwrap();
        storage.set("k", "v");
        assert!(nested.join("session.json").exists());
    }
}
