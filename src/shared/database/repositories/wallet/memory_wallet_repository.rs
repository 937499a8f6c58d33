use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domains::wallet::models::{WalletRecord, WalletUpdate};
use crate::shared::database::repositories::wallet::WalletStore;
use crate::shared::errors::WalletError;

/// 메모리 기반 지갑 저장소 (테스트/로컬 실행용)
/// In-process Wallet Store with the same contract as the PostgreSQL one.
#[derive(Default)]
pub struct MemoryWalletRepository {
    wallets: RwLock<HashMap<i64, WalletRecord>>,
}

impl MemoryWalletRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.wallets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.read().is_empty()
    }
}

#[async_trait]
impl WalletStore for MemoryWalletRepository {
    async fn insert(&self, record: &WalletRecord) -> Result<(), WalletError> {
        let mut wallets = self.wallets.write();
        if wallets.contains_key(&record.user_id) {
            return Err(WalletError::AlreadyExists { user_id: record.user_id });
        }
        wallets.insert(record.user_id, record.clone());
        Ok(())
    }

    async fn get_by_user_id(&self, user_id: i64) -> Result<Option<WalletRecord>, WalletError> {
        Ok(self.wallets.read().get(&user_id).cloned())
    }

    async fn update(&self, user_id: i64, update: &WalletUpdate) -> Result<WalletRecord, WalletError> {
        let mut wallets = self.wallets.write();
        let record = wallets
            .get_mut(&user_id)
            .ok_or(WalletError::NotFound { user_id })?;
        update.apply(record);
        Ok(record.clone())
    }

    async fn delete(&self, user_id: i64) -> Result<bool, WalletError> {
        Ok(self.wallets.write().remove(&user_id).is_some())
    }
}
