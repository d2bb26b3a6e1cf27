//! Mutation registry behavior, driven through `Store::commit`.

use std::time::Duration;

use lesspass_store::{FixedClock, Mutation, State, Store};
use lesspass_types::{PasswordId, PasswordPatch, PasswordProfile, PasswordVersion, Timestamp};

use crate::common::{NOW, frozen_store, saved, stock_template};

#[test]
fn logout_then_login_is_authenticated() {
    let mut store = frozen_store();
    store.commit(Mutation::Login);
    store.commit(Mutation::Logout);
    assert!(!store.state().is_authenticated());
    assert!(store.state().is_guest());

    store.commit(Mutation::Login);
    assert!(store.state().is_authenticated());
}

#[test]
fn set_password_stores_payload() {
    let mut store = frozen_store();
    store.commit(Mutation::SetPassword {
        password: PasswordProfile {
            uppercase: true,
            version: PasswordVersion::V2,
            ..PasswordProfile::default()
        },
    });

    let active = store.state().password().unwrap();
    assert_eq!(active.version, PasswordVersion::V2);
    assert!(active.uppercase);
}

#[test]
fn set_password_sets_last_use_to_frozen_now() {
    let mut store = frozen_store();
    assert!(store.state().last_use().is_none());

    store.commit(Mutation::SetPassword {
        password: PasswordProfile::default(),
    });

    assert_eq!(store.state().last_use(), Some(Timestamp::from_millis(NOW)));
}

#[test]
fn set_password_is_not_affected_by_later_changes_to_the_payload() {
    let mut store = frozen_store();
    let mut password = stock_template();

    store.commit(Mutation::SetPassword {
        password: password.clone(),
    });
    password.version = PasswordVersion::V1;

    assert_eq!(
        store.state().password().unwrap().version,
        PasswordVersion::V2
    );
}

#[test]
fn set_default_password_merges_only_given_fields() {
    let mut store = frozen_store();
    assert_eq!(*store.state().default_password(), stock_template());

    store.commit(Mutation::SetDefaultPassword {
        password: PasswordPatch {
            symbols: Some(false),
            length: Some(30),
            ..PasswordPatch::default()
        },
    });

    let expected = PasswordProfile {
        symbols: false,
        length: 30,
        ..stock_template()
    };
    assert_eq!(*store.state().default_password(), expected);
}

#[test]
fn set_passwords_preserves_order() {
    let mut store = frozen_store();
    store.commit(Mutation::SetPasswords {
        passwords: vec![saved("1", "site1", 16), saved("2", "site2", 16)],
    });

    let sites: Vec<&str> = store
        .state()
        .passwords()
        .iter()
        .map(|profile| profile.site.as_str())
        .collect();
    assert_eq!(sites, ["site1", "site2"]);
}

#[test]
fn set_passwords_replaces_previous_list() {
    let mut store = frozen_store();
    store.commit(Mutation::SetPasswords {
        passwords: vec![saved("1", "site1", 16), saved("2", "site2", 16)],
    });
    store.commit(Mutation::SetPasswords {
        passwords: vec![saved("3", "site3", 20)],
    });

    assert_eq!(store.state().passwords(), [saved("3", "site3", 20)]);
}

#[test]
fn delete_password_removes_matching_entry() {
    let mut store = frozen_store();
    store.commit(Mutation::SetPasswords {
        passwords: vec![saved("1", "site1", 16), saved("2", "site2", 16)],
    });
    assert_eq!(store.state().passwords().len(), 2);

    store.commit(Mutation::DeletePassword {
        id: PasswordId::new("1"),
    });

    assert_eq!(store.state().passwords(), [saved("2", "site2", 16)]);
}

#[test]
fn delete_active_password_falls_back_to_default() {
    let mut store = frozen_store();
    store.commit(Mutation::SetPasswords {
        passwords: vec![saved("1", "", 30), saved("2", "", 16)],
    });
    store.commit(Mutation::SetPassword {
        password: saved("1", "", 30),
    });

    store.commit(Mutation::DeletePassword {
        id: PasswordId::new("1"),
    });

    let active = store.state().password().unwrap();
    assert_eq!(active.length, 16);
    assert_eq!(active, store.state().default_password());
    assert!(active.id.is_none());
}

#[test]
fn set_base_url_overwrites() {
    let mut store = frozen_store();
    assert_eq!(store.state().base_url(), "https://lesspass.com");

    store.commit(Mutation::SetBaseUrl {
        base_url: "https://example.org".to_owned(),
    });

    assert_eq!(store.state().base_url(), "https://example.org");
}

#[test]
fn set_version_on_existing_password() {
    let mut store = frozen_store();
    store.commit(Mutation::SetPassword {
        password: PasswordProfile {
            site: "example.org".to_owned(),
            version: PasswordVersion::V2,
            ..PasswordProfile::default()
        },
    });

    store.commit(Mutation::SetVersion {
        version: PasswordVersion::V1,
    });

    let active = store.state().password().unwrap();
    assert_eq!(active.version, PasswordVersion::V1);
    assert_eq!(active.site, "example.org");
    assert_eq!(store.state().version(), PasswordVersion::V1);
}

#[test]
fn set_version_without_password_creates_one() {
    let mut store = frozen_store();
    assert!(store.state().password().is_none());

    store.commit(Mutation::SetVersion {
        version: PasswordVersion::V2,
    });

    assert_eq!(store.state().password(), Some(&stock_template()));
}

#[test]
fn set_version_without_password_inherits_configured_template() {
    let template = PasswordProfile {
        length: 20,
        numbers: false,
        ..stock_template()
    };
    let mut store = Store::with_clock(
        State::new("https://lesspass.com", template.clone()),
        FixedClock::from_millis(NOW),
    );

    store.commit(Mutation::SetVersion {
        version: PasswordVersion::V1,
    });

    assert_eq!(
        store.state().password(),
        Some(&PasswordProfile {
            version: PasswordVersion::V1,
            ..template
        })
    );
}

/// Store whose active password was set `ago` before [`NOW`].
fn store_last_used(ago: Duration) -> Store<FixedClock> {
    let clock = FixedClock::from_millis(NOW);
    clock.rewind(ago);
    let mut store = Store::with_clock(State::default(), clock);
    store.commit(Mutation::SetPassword {
        password: PasswordProfile {
            login: "test@example.org".to_owned(),
            length: 30,
            ..PasswordProfile::default()
        },
    });
    store.clock().set(Timestamp::from_millis(NOW));
    store
}

#[test]
fn load_password_first_time_five_minutes_after_last_use() {
    let mut store = store_last_used(Duration::from_secs(5 * 60));

    store.commit(Mutation::LoadPasswordFirstTime);

    let active = store.state().password().unwrap();
    assert_eq!(active.login, "test@example.org");
    assert_eq!(active.length, 30);
}

#[test]
fn load_password_first_time_more_than_ten_minutes_after_last_use() {
    let mut store = store_last_used(Duration::from_secs(20 * 60));

    store.commit(Mutation::LoadPasswordFirstTime);

    let active = store.state().password().unwrap();
    assert_eq!(active.login, "");
    assert_eq!(active.length, 16);
}

#[test]
fn load_password_first_time_without_last_use() {
    let mut store = Store::with_clock(
        State::new(
            "https://lesspass.com",
            stock_template(),
        ),
        FixedClock::from_millis(NOW),
    );
    store.commit(Mutation::SetVersion {
        version: PasswordVersion::V1,
    });
    assert!(store.state().last_use().is_none());

    store.commit(Mutation::LoadPasswordFirstTime);

    assert_eq!(
        store.state().password().unwrap().version,
        PasswordVersion::V2
    );
}

#[test]
fn named_mutations_drive_the_store() {
    let mut store = frozen_store();
    let script = [
        ("LOGIN", None),
        (
            "SET_PASSWORDS",
            Some(serde_json::json!({ "passwords": [
                { "id": "1", "site": "site1" },
                { "id": "2", "site": "site2" }
            ]})),
        ),
        ("DELETE_PASSWORD", Some(serde_json::json!({ "id": "2" }))),
        (
            "SET_BASE_URL",
            Some(serde_json::json!({ "baseURL": "https://example.org" })),
        ),
    ];

    for (name, payload) in script {
        store.commit(Mutation::from_named(name, payload).unwrap());
    }

    let state = store.state();
    assert!(state.is_authenticated());
    assert_eq!(state.passwords().len(), 1);
    assert_eq!(state.passwords()[0].site, "site1");
    assert_eq!(state.base_url(), "https://example.org");
}
