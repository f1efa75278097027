use std::sync::Arc;
use std::time::Duration;

use snippets::application::{AccountWatcher, ConditionalAwaiter, TransactionWatcher};
use snippets::domain::{AccountOnNetwork, Address, TransactionHash, TransactionStatus};
use snippets::error::{Error, NetworkError, WatcherError};
use snippets::infrastructure::config::WatcherConfig;
use snippets::port::NetworkProvider;
use snippets::testkit::config::{fast_watcher, watcher};
use snippets::testkit::domain::{account, transaction};
use snippets::testkit::provider::ScriptedProvider;

#[tokio::test(start_paused = true)]
async fn await_nonce_resolves_on_fourth_fetch() {
    let alice = Address::new("erd1alice");
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_nonces(&alice, &[5, 5, 6, 7]);

    let watcher = AccountWatcher::new(provider.clone(), alice, fast_watcher());
    let reached = watcher.await_nonce(7).await.unwrap();

    assert_eq!(reached.nonce, 7);
    assert_eq!(provider.account_fetches(), 4);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(provider.account_fetches(), 4);
}

#[tokio::test(start_paused = true)]
async fn await_nonce_times_out_after_about_three_polls() {
    let alice = Address::new("erd1alice");
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_nonces(&alice, &[5]);

    let watcher = AccountWatcher::new(provider.clone(), alice.clone(), watcher(100, 3));
    let start = tokio::time::Instant::now();
    let err = watcher.await_nonce(7).await.unwrap_err();

    assert!(start.elapsed() >= Duration::from_millis(300));
    match err {
        Error::Watcher(WatcherError::ExpectedAccountStateNotReached {
            address,
            target_nonce,
            last_nonce,
        }) => {
            assert_eq!(address, alice);
            assert_eq!(target_nonce, 7);
            assert_eq!(last_nonce, Some(5));
        }
        other => panic!("expected timeout error, got {other:?}"),
    }
    let fetches = provider.account_fetches();
    assert!((2..=4).contains(&fetches), "unexpected fetch count {fetches}");
}

#[tokio::test(start_paused = true)]
async fn transient_not_found_errors_are_swallowed() {
    let bob = Address::new("erd1bob");
    let provider = Arc::new(ScriptedProvider::new());
    provider.script_account(
        &bob,
        vec![
            Err(NetworkError::AccountNotFound { address: bob.clone() }),
            Err(NetworkError::AccountNotFound { address: bob.clone() }),
            Ok(account("erd1bob", 1, "0")),
        ],
    );

    let awaiter = ConditionalAwaiter::new(fast_watcher());
    let result = awaiter
        .await_conditionally(
            |a: &AccountOnNetwork| a.nonce >= 1,
            || provider.get_account(&bob),
            |_| {},
            |_| Error::Parse("not reached".into()),
        )
        .await;

    assert_eq!(result.unwrap().nonce, 1);
    assert_eq!(provider.account_fetches(), 3);
}

#[tokio::test(start_paused = true)]
async fn rejected_fetch_is_not_retried() {
    let hash = TransactionHash::new("dd44");
    let provider = Arc::new(ScriptedProvider::new());
    provider.script_transaction(
        &hash,
        vec![Err(NetworkError::Rejected("unknown shard".into()))],
    );

    let watcher = TransactionWatcher::new(provider.clone(), fast_watcher());
    let err = watcher.await_completed(&hash).await.unwrap_err();

    assert!(matches!(err, Error::Network(NetworkError::Rejected(_))));
    assert_eq!(provider.transaction_fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn transaction_completes_after_pending() {
    let hash = TransactionHash::new("ee55");
    let provider = Arc::new(ScriptedProvider::new());
    provider.script_transaction(
        &hash,
        vec![
            Ok(transaction("ee55", TransactionStatus::Pending)),
            Ok(transaction("ee55", TransactionStatus::Pending)),
            Ok(transaction("ee55", TransactionStatus::Success)),
        ],
    );

    let watcher = TransactionWatcher::new(
        provider.clone(),
        WatcherConfig::new(Duration::from_secs(6), Duration::from_secs(90)).unwrap(),
    );
    let tx = watcher.await_completed(&hash).await.unwrap();

    assert!(tx.status.is_successful());
    assert_eq!(provider.transaction_fetches(), 3);
}
