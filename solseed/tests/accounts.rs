//! Tests for account sequencing and sessions

use std::sync::{Arc, Mutex};
use std::thread;

use solseed::crypto::keys::HARDENED_OFFSET;
use solseed::crypto::mnemonic::{mnemonic_to_seed, parse_mnemonic, MasterSeed};
use solseed::{AccountSequencer, Error, Session, WalletConfig};

const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn abandon_seed() -> MasterSeed {
    mnemonic_to_seed(&parse_mnemonic(ABANDON).unwrap(), "")
}

#[test]
fn test_nth_call_returns_index_n_minus_one() {
    let seed = abandon_seed();
    let mut sequencer = AccountSequencer::default();

    let indices: Vec<u32> = (0..50)
        .map(|_| sequencer.next_account(&seed, |i| format!("Wallet {}", i + 1)).unwrap().index)
        .collect();

    assert_eq!(indices, (0..50).collect::<Vec<u32>>());
}

#[test]
fn test_first_account_matches_known_address() {
    let mut session = Session::restore(ABANDON, &WalletConfig::default()).unwrap();
    let account = session.create_account().unwrap();

    assert_eq!(account.public_key, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
    assert_eq!(account.derivation_path, "m/44'/501'/0'/0'");
}

#[test]
fn test_serialized_calls_stay_gap_free() {
    let seed = Arc::new(abandon_seed());
    let sequencer = Arc::new(Mutex::new(AccountSequencer::default()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let seed = Arc::clone(&seed);
            let sequencer = Arc::clone(&sequencer);
            thread::spawn(move || {
                (0..8)
                    .map(|_| {
                        let mut sequencer = sequencer.lock().unwrap();
                        sequencer.next_account(&seed, |i| i.to_string()).unwrap().index
                    })
                    .collect::<Vec<u32>>()
            })
        })
        .collect();

    let mut indices: Vec<u32> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    indices.sort_unstable();

    assert_eq!(indices, (0..32).collect::<Vec<u32>>());
    assert_eq!(sequencer.lock().unwrap().next_index(), 32);
}

#[test]
fn test_exhausted_range_fails_without_wrapping() {
    let seed = abandon_seed();
    let mut sequencer = AccountSequencer::new(HARDENED_OFFSET);

    let err = sequencer.next_account(&seed, |i| i.to_string()).unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)));
}

#[test]
fn test_account_json_shape() {
    let mut session = Session::restore(ABANDON, &WalletConfig::default()).unwrap();
    let account = session.create_account().unwrap();

    let value = serde_json::to_value(&account).unwrap();
    assert_eq!(value["index"], 0);
    assert_eq!(value["display_name"], "Wallet 1");
    assert_eq!(value["balance"], 0);
    assert_eq!(value["revealed"], false);

    let restored: solseed::WalletAccount = serde_json::from_value(value).unwrap();
    assert_eq!(restored, account);
}

#[test]
fn test_session_hands_out_owned_accounts() {
    let mut session = Session::restore(ABANDON, &WalletConfig::default()).unwrap();
    let accounts: Vec<solseed::WalletAccount> =
        (0..3).map(|_| session.create_account().unwrap()).collect();

    let names: Vec<&str> = accounts.iter().map(|a| a.display_name.as_str()).collect();
    assert_eq!(names, ["Wallet 1", "Wallet 2", "Wallet 3"]);
    assert_eq!(session.created(), 3);

    // the caller's copies outlive the session that derived them
    drop(session);
    assert_eq!(accounts[0].public_key, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
    assert_eq!(&accounts[0].secret_key[..16], "37df573b3ac4ad5b");
}
