//! Resources needed to delete a folder

use crate::prelude::HttpCommand;
use crate::{Client, Error};
use std::borrow::Cow;

/// Command to delete a folder, with all the dashboards it contains
///
/// Only a `200 OK` answer is considered a success, a folder that is already gone
/// results in a [`Error::Remote`](crate::Error::Remote) with a `404` status.
///
/// [More about it on the documentation](https://grafana.com/docs/grafana/latest/developers/http_api/folder/#delete-folder).
#[derive(Debug)]
pub struct FolderDeleteCommand<'a> {
    uid: Cow<'a, str>,
}

impl<'a> FolderDeleteCommand<'a> {
    pub fn new<U: Into<Cow<'a, str>>>(uid: U) -> Self {
        Self { uid: uid.into() }
    }
}

#[async_trait::async_trait]
impl HttpCommand for FolderDeleteCommand<'_> {
    type Output = ();

    async fn execute(self, client: &Client) -> Result<Self::Output, Error> {
        let path = format!("api/folders/{}", self.uid);
        client
            .delete_request(&path, reqwest::StatusCode::OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::FolderDeleteCommand;
    use crate::prelude::HttpCommand;

    #[tokio::test]
    async fn success() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/folders/b2")
            .match_header("authorization", "Bearer access-token")
            .with_status(200)
            .with_body(r#"{"message":"Folder Team Dashboards deleted","id":2,"title":"Team Dashboards"}"#)
            .create_async()
            .await;
        let api = crate::tests::client(server.url());
        FolderDeleteCommand::new("b2").execute(&api).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn forbidden() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/folders/x")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;
        let api = crate::tests::client(server.url());
        let error = FolderDeleteCommand::new("x")
            .execute(&api)
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.to_string(), "403 - forbidden");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn already_deleted() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/folders/gone")
            .with_status(404)
            .with_body(r#"{"message":"folder not found"}"#)
            .create_async()
            .await;
        let api = crate::tests::client(server.url());
        let error = FolderDeleteCommand::new(String::from("gone"))
            .execute(&api)
            .await
            .unwrap_err();
        assert!(matches!(error, crate::Error::Remote { status: 404, .. }));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn accepted_is_not_success() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/folders/y")
            .with_status(202)
            .create_async()
            .await;
        let api = crate::tests::client(server.url());
        let error = FolderDeleteCommand::new("y")
            .execute(&api)
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(202));
        m.assert_async().await;
    }
}
