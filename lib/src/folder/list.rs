//! Resources needed to list the folders

use super::Folder;
use crate::prelude::HttpCommand;
use crate::{Client, Error};

/// Command to list every folder visible with the current credentials
///
/// Executing this command will return the folders in the order given by Grafana.
///
/// [More about it on the documentation](https://grafana.com/docs/grafana/latest/developers/http_api/folder/#get-all-folders).
///
/// ```no_run
/// use grafana_folders::builder::ClientBuilder;
/// use grafana_folders::folder::list::FolderListCommand;
/// use grafana_folders::prelude::HttpCommand;
///
/// # tokio_test::block_on(async {
/// let client = ClientBuilder::from_env().build().unwrap();
/// match FolderListCommand.execute(&client).await {
///   Ok(res) => println!("found {} folders", res.len()),
///   Err(err) => eprintln!("error: {:?}", err),
/// }
/// # })
/// ```
#[derive(Debug, Default)]
pub struct FolderListCommand;

#[async_trait::async_trait]
impl HttpCommand for FolderListCommand {
    type Output = Vec<Folder>;

    async fn execute(self, client: &Client) -> Result<Self::Output, Error> {
        client.get_request("api/folders").await
    }
}
