//! Fetch → keep → leave through the public API, with a scripted gateway and real files.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tg_leave::adapters::persistence::{CsvReportStore, SelectionFile};
use tg_leave::domain::{DomainError, EntityKind, KeepSet, PeerHandle, RawDialog};
use tg_leave::ports::{SelectionPort, TgGateway};
use tg_leave::usecases::{FetchService, JobRunner, LeaveService};

struct ScriptedGateway {
    dialogs: Vec<RawDialog>,
    left: Mutex<Vec<i64>>,
}

impl ScriptedGateway {
    fn alpha_beta() -> Self {
        Self {
            dialogs: vec![
                RawDialog {
                    id: 1,
                    name: "Alpha".into(),
                    basic_chat_id: Some(1),
                    ..Default::default()
                },
                RawDialog {
                    id: 2,
                    name: "Beta".into(),
                    broadcast: true,
                    ..Default::default()
                },
                RawDialog {
                    id: 3,
                    name: "A friend".into(),
                    ..Default::default()
                },
            ],
            left: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl TgGateway for ScriptedGateway {
    async fn list_dialogs(&self) -> Result<Vec<RawDialog>, DomainError> {
        Ok(self.dialogs.clone())
    }

    async fn resolve(&self, kind: EntityKind, id: i64) -> Result<PeerHandle, DomainError> {
        Ok(match kind {
            EntityKind::Group => PeerHandle::BasicChat { chat_id: id },
            EntityKind::Supergroup | EntityKind::Channel => PeerHandle::Channel {
                channel_id: id,
                access_hash: 0,
            },
        })
    }

    async fn leave(&self, handle: &PeerHandle) -> Result<(), DomainError> {
        self.left.lock().unwrap().push(handle.id());
        Ok(())
    }

    async fn disconnect(&self) {}
}

fn report_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
    csv::Reader::from_path(path)
        .unwrap()
        .records()
        .map(|r| r.unwrap())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn keeping_one_leaves_only_the_other() {
    let dir = tempfile::tempdir().unwrap();
    let gw = Arc::new(ScriptedGateway::alpha_beta());
    let tg: Arc<dyn TgGateway> = gw.clone();
    let selection = SelectionFile::new(dir.path().join("groups_to_keep.txt"));
    let fetch = Arc::new(FetchService::new(Arc::clone(&tg)));
    let leave = Arc::new(LeaveService::new(
        Arc::clone(&tg),
        Arc::new(CsvReportStore::new(dir.path())),
        Duration::from_secs(1),
    ));
    let jobs = JobRunner::new();

    let job = jobs
        .submit(move |p| async move { fetch.fetch_entities(&p).await })
        .unwrap();
    let entities = job.join().await.unwrap();
    assert_eq!(entities.len(), 2);

    let mut keep = KeepSet::new(selection.load().await);
    keep.set(1, true);
    selection.save(keep.ids()).await.unwrap();

    let to_leave = keep.to_leave(&entities);
    let job = jobs
        .submit(move |p| async move { leave.leave_all(&to_leave, &p).await })
        .unwrap();
    let run = job.join().await.unwrap();

    assert_eq!(run.rows.len(), 1);
    assert_eq!(run.rows[0].entity_id, 2);
    assert_eq!(*gw.left.lock().unwrap(), vec![2]);

    let rows = report_rows(&run.report_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "2");
    assert_eq!(&rows[0][1], "Beta");
    assert_eq!(&rows[0][2], "Success");

    let persisted: HashSet<i64> = selection.load().await;
    assert_eq!(persisted, [1].into_iter().collect());
}

#[tokio::test(start_paused = true)]
async fn no_selection_file_means_everything_can_be_left() {
    let dir = tempfile::tempdir().unwrap();
    let gw = Arc::new(ScriptedGateway::alpha_beta());
    let tg: Arc<dyn TgGateway> = gw.clone();
    let selection = SelectionFile::new(dir.path().join("missing.txt"));

    let (progress, _events) = tg_leave::usecases::ProgressSender::channel();
    let entities = FetchService::new(Arc::clone(&tg))
        .fetch_entities(&progress)
        .await
        .unwrap();

    let keep = KeepSet::new(selection.load().await);
    assert_eq!(keep.kept_count(&entities), 0);

    let to_leave = keep.to_leave(&entities);
    let run = LeaveService::new(
        tg,
        Arc::new(CsvReportStore::new(dir.path())),
        Duration::from_secs(1),
    )
    .leave_all(&to_leave, &progress)
    .await
    .unwrap();
    assert_eq!(run.succeeded(), 2);
    assert_eq!(*gw.left.lock().unwrap(), vec![1, 2]);
}
