//! Property-based tests for StoreSettings serialization round-trip.

use proptest::prelude::*;
use quran_bookmarks::types::settings::{
    CorruptSlotPolicy, LoggingSettings, RecoverySettings, StorageBackend, StorageSettings,
    StoreSettings,
};

fn arb_backend() -> impl Strategy<Value = StorageBackend> {
    prop_oneof![
        Just(StorageBackend::Sqlite),
        Just(StorageBackend::File),
        Just(StorageBackend::Memory),
    ]
}

fn arb_policy() -> impl Strategy<Value = CorruptSlotPolicy> {
    prop_oneof![
        Just(CorruptSlotPolicy::Fail),
        Just(CorruptSlotPolicy::Quarantine),
    ]
}

fn arb_settings() -> impl Strategy<Value = StoreSettings> {
    (
        arb_backend(),
        "[a-zA-Z0-9/._-]{1,40}",
        "[a-zA-Z0-9/._-]{1,40}",
        arb_policy(),
        "(trace|debug|info|warn|error)",
    )
        .prop_map(
            |(backend, database_file, slot_dir, corrupt_slot_policy, filter)| StoreSettings {
                storage: StorageSettings {
                    backend,
                    database_file,
                    slot_dir,
                },
                recovery: RecoverySettings {
                    corrupt_slot_policy,
                },
                logging: LoggingSettings { filter },
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: StoreSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }
}
