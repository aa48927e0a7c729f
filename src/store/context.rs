use std::sync::Arc;

use super::notifier::Notifier;
use super::ReferralStore;
use crate::client::ReferralApi;

/// Everything a hook needs: the store, the service and the notifier.
///
/// Built once at the application root and cloned into each hook.
#[derive(Clone)]
pub struct ReferralContext {
    pub store: Arc<ReferralStore>,
    pub api: Arc<dyn ReferralApi>,
    pub notifier: Arc<dyn Notifier>,
}

impl ReferralContext {
    /// Fresh store wired to raise error notifications through `notifier`.
    pub fn new(api: Arc<dyn ReferralApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: Arc::new(ReferralStore::with_notifier(notifier.clone())),
            api,
            notifier,
        }
    }
}
