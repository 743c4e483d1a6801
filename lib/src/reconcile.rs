//! Deletes every folder except [`GENERAL`](crate::folder::GENERAL).
//!
//! Listing is the only step allowed to abort a run. Once the folders are known,
//! each deletion is attempted and its result recorded, whatever happened to the
//! previous ones.

use crate::folder::delete::FolderDeleteCommand;
use crate::folder::list::FolderListCommand;
use crate::folder::Folder;
use crate::prelude::HttpCommand;
use crate::{Client, Error};
use futures_util::StreamExt;

/// The operations the [`Reconciler`] needs from the remote API
#[async_trait::async_trait]
pub trait FolderApi: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<Folder>, Error>;

    async fn delete_folder(&self, uid: &str) -> Result<(), Error>;
}

#[async_trait::async_trait]
impl FolderApi for Client {
    async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        FolderListCommand.execute(self).await
    }

    async fn delete_folder(&self, uid: &str) -> Result<(), Error> {
        FolderDeleteCommand::new(uid).execute(self).await
    }
}

/// Hooks called while reconciling, all of them do nothing by default.
///
/// With a concurrency above 1, `on_attempt` and `on_outcome` are called in
/// completion order. The [`BatchResult`] stays in listing order.
pub trait ReconcileObserver {
    fn on_discovered(&self, _count: usize) {}

    fn on_skipped(&self, _folder: &Folder) {}

    fn on_attempt(&self, _folder: &Folder) {}

    fn on_outcome(&self, _outcome: &Outcome) {}
}

impl ReconcileObserver for () {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Succeeded,
    Failed {
        /// HTTP status, when the API answered
        code: Option<u16>,
        detail: String,
    },
}

/// The result of a delete attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub folder: Folder,
    pub status: Status,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Status::Succeeded)
    }
}

/// The report of a run, in the order the folders were listed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of folders returned by the listing, excluded one included
    pub discovered: usize,
    pub outcomes: Vec<Outcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|item| item.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|item| !item.is_success())
    }

    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(Outcome::is_success)
    }
}

#[derive(Clone, Debug)]
pub struct Reconciler {
    concurrency: usize,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

impl Reconciler {
    /// Sets how many deletions can run at the same time, `0` is treated as `1`.
    pub fn set_concurrency(&mut self, value: usize) {
        self.concurrency = value.max(1);
    }

    pub fn with_concurrency(mut self, value: usize) -> Self {
        self.set_concurrency(value);
        self
    }

    /// Lists the folders and deletes all of them but `General`.
    ///
    /// # Errors
    ///
    /// Only a failure to list the folders is returned, no deletion is attempted then.
    /// Deletion failures are recorded in the [`BatchResult`].
    #[tracing::instrument(skip_all, fields(concurrency = self.concurrency))]
    pub async fn reconcile<A, O>(&self, api: &A, observer: &O) -> Result<BatchResult, Error>
    where
        A: FolderApi + ?Sized,
        O: ReconcileObserver + ?Sized,
    {
        let folders = api.list_folders().await.map_err(|err| {
            tracing::error!("unable to list folders: {err}");
            err
        })?;
        let discovered = folders.len();
        tracing::info!("found {discovered} folders");
        observer.on_discovered(discovered);

        let targets = folders
            .into_iter()
            .filter(|folder| {
                if folder.is_general() {
                    observer.on_skipped(folder);
                    false
                } else {
                    true
                }
            })
            .collect::<Vec<_>>();

        let outcomes = futures_util::stream::iter(targets)
            .map(|folder| delete_one(api, observer, folder))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(BatchResult {
            discovered,
            outcomes,
        })
    }
}

async fn delete_one<A, O>(api: &A, observer: &O, folder: Folder) -> Outcome
where
    A: FolderApi + ?Sized,
    O: ReconcileObserver + ?Sized,
{
    observer.on_attempt(&folder);
    let status = match api.delete_folder(&folder.uid).await {
        Ok(()) => {
            tracing::info!(uid = %folder.uid, "folder {:?} deleted", folder.title);
            Status::Succeeded
        }
        Err(err) => {
            tracing::warn!(uid = %folder.uid, "unable to delete folder {:?}: {err}", folder.title);
            Status::Failed {
                code: err.status(),
                detail: err.to_string(),
            }
        }
    };
    let outcome = Outcome { folder, status };
    observer.on_outcome(&outcome);
    outcome
}
