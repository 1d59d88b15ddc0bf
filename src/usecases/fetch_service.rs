//! Fetch use case: list dialogs and keep only groups, supergroups and channels.

use crate::domain::{DomainError, Entity, classify_all};
use crate::ports::TgGateway;
use crate::usecases::jobs::ProgressSender;
use std::sync::Arc;
use tracing::info;

pub struct FetchService {
    tg: Arc<dyn TgGateway>,
}

impl FetchService {
    pub fn new(tg: Arc<dyn TgGateway>) -> Self {
        Self { tg }
    }

    /// Classified entities in dialog order. Errors are `DomainError::Fetch`; nothing is retried.
    pub async fn fetch_entities(&self, progress: &ProgressSender) -> Result<Vec<Entity>, DomainError> {
        progress.status("Fetching your groups...");
        let dialogs = self.tg.list_dialogs().await?;
        let total = dialogs.len();
        let entities = classify_all(dialogs);
        info!(dialogs = total, entities = entities.len(), "classified dialogs");
        progress.status(format!("Found {} groups", entities.len()));
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, PeerHandle, RawDialog};

    struct StaticGateway(Vec<RawDialog>);

    #[async_trait::async_trait]
    impl TgGateway for StaticGateway {
        async fn list_dialogs(&self) -> Result<Vec<RawDialog>, DomainError> {
            if self.0.is_empty() {
                return Err(DomainError::Fetch("connection reset".into()));
            }
            Ok(self.0.clone())
        }

        async fn resolve(&self, _kind: EntityKind, id: i64) -> Result<PeerHandle, DomainError> {
            Ok(PeerHandle::BasicChat { chat_id: id })
        }

        async fn leave(&self, _handle: &PeerHandle) -> Result<(), DomainError> {
            Ok(())
        }

        async fn disconnect(&self) {}
    }

    #[tokio::test]
    async fn drops_private_chats_and_reports_count() {
        let gw = StaticGateway(vec![
            RawDialog {
                id: 1,
                name: "Alpha".into(),
                basic_chat_id: Some(1),
                ..Default::default()
            },
            RawDialog {
                id: 2,
                name: "Some person".into(),
                ..Default::default()
            },
            RawDialog {
                id: 3,
                name: "Beta".into(),
                broadcast: true,
                ..Default::default()
            },
        ]);
        let (progress, mut events) = ProgressSender::channel();
        let entities = FetchService::new(Arc::new(gw))
            .fetch_entities(&progress)
            .await
            .unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new(1, "Alpha", EntityKind::Group),
                Entity::new(3, "Beta", EntityKind::Channel),
            ]
        );
        drop(progress);
        let mut last = None;
        while let Some(ev) = events.recv().await {
            last = Some(ev);
        }
        assert_eq!(
            last,
            Some(crate::usecases::jobs::JobEvent::Status("Found 2 groups".into()))
        );
    }

    #[tokio::test]
    async fn listing_failure_surfaces() {
        let (progress, _events) = ProgressSender::channel();
        let err = FetchService::new(Arc::new(StaticGateway(vec![])))
            .fetch_entities(&progress)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Fetch(_)));
    }
}
