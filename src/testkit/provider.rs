//! Mock [`NetworkProvider`] for testing watchers and trackers.
//!
//! [`ScriptedProvider`] answers account and transaction fetches from
//! per-key scripts. Each fetch consumes the next scripted step; the last
//! step repeats forever, so a single-step script is a fixed response.
//! Unscripted accounts and transactions are reported as not found.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::{AccountOnNetwork, Address, TokenBalance, TransactionHash, TransactionOnNetwork};
use crate::error::{NetworkError, Result};
use crate::port::{ContractQuery, ContractQueryResponse, NetworkProvider};

type Step<T> = std::result::Result<T, NetworkError>;

struct Script<T> {
    steps: VecDeque<Step<T>>,
}

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Option<Step<T>> {
        if self.steps.len() > 1 {
            self.steps.pop_front()
        } else {
            self.steps.front().cloned()
        }
    }
}

/// A provider with scripted responses and fetch counters.
#[derive(Default)]
pub struct ScriptedProvider {
    accounts: Mutex<HashMap<Address, Script<AccountOnNetwork>>>,
    tokens: Mutex<HashMap<Address, Vec<TokenBalance>>>,
    transactions: Mutex<HashMap<TransactionHash, Script<TransactionOnNetwork>>>,
    queries: Mutex<VecDeque<ContractQueryResponse>>,
    sent: Mutex<Vec<Value>>,
    account_fetches: AtomicUsize,
    transaction_fetches: AtomicUsize,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the responses to `get_account(address)`.
    pub fn script_account(&self, address: &Address, steps: Vec<Step<AccountOnNetwork>>) {
        self.accounts.lock().insert(
            address.clone(),
            Script {
                steps: steps.into(),
            },
        );
    }

    /// Script `get_account(address)` to report the given nonces in order.
    pub fn push_nonces(&self, address: &Address, nonces: &[u64]) {
        let steps = nonces
            .iter()
            .map(|&nonce| Ok(AccountOnNetwork::new(address.clone(), nonce, "0")))
            .collect();
        self.script_account(address, steps);
    }

    pub fn set_tokens(&self, address: &Address, tokens: Vec<TokenBalance>) {
        self.tokens.lock().insert(address.clone(), tokens);
    }

    /// Script the responses to `get_transaction(hash)`.
    pub fn script_transaction(&self, hash: &TransactionHash, steps: Vec<Step<TransactionOnNetwork>>) {
        self.transactions.lock().insert(
            hash.clone(),
            Script {
                steps: steps.into(),
            },
        );
    }

    /// Queue a response for the next `query_contract` call.
    pub fn push_query_response(&self, response: ContractQueryResponse) {
        self.queries.lock().push_back(response);
    }

    /// Number of `get_account` calls so far.
    pub fn account_fetches(&self) -> usize {
        self.account_fetches.load(Ordering::SeqCst)
    }

    /// Number of `get_transaction` calls so far.
    pub fn transaction_fetches(&self) -> usize {
        self.transaction_fetches.load(Ordering::SeqCst)
    }

    /// Payloads passed to `send_transaction`, in order.
    pub fn sent_transactions(&self) -> Vec<Value> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl NetworkProvider for ScriptedProvider {
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork> {
        self.account_fetches.fetch_add(1, Ordering::SeqCst);
        let step = self
            .accounts
            .lock()
            .get_mut(address)
            .and_then(Script::next);
        match step {
            Some(step) => Ok(step?),
            None => Err(NetworkError::AccountNotFound {
                address: address.clone(),
            }
            .into()),
        }
    }

    async fn get_tokens(&self, address: &Address) -> Result<Vec<TokenBalance>> {
        Ok(self
            .tokens
            .lock()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_transaction(&self, signed: &Value) -> Result<TransactionHash> {
        let mut sent = self.sent.lock();
        sent.push(signed.clone());
        Ok(TransactionHash::new(format!("tx-{}", sent.len())))
    }

    async fn get_transaction(&self, hash: &TransactionHash) -> Result<TransactionOnNetwork> {
        self.transaction_fetches.fetch_add(1, Ordering::SeqCst);
        let step = self
            .transactions
            .lock()
            .get_mut(hash)
            .and_then(Script::next);
        match step {
            Some(step) => Ok(step?),
            None => Err(NetworkError::TransactionNotFound { hash: hash.clone() }.into()),
        }
    }

    async fn query_contract(&self, query: &ContractQuery) -> Result<ContractQueryResponse> {
        self.queries.lock().pop_front().ok_or_else(|| {
            NetworkError::Rejected(format!("no scripted response for {}", query.function)).into()
        })
    }
}
