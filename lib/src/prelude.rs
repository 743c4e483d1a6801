use crate::{Client, Error};

/// A call to the Grafana API
#[async_trait::async_trait]
pub trait HttpCommand {
    type Output;

    async fn execute(self, client: &Client) -> Result<Self::Output, Error>;
}
