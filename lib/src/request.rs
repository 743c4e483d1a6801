use crate::Error;
use reqwest::StatusCode;

async fn reject(res: reqwest::Response) -> Error {
    let status = res.status();
    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => return Error::Transport(err),
    };
    tracing::debug!("rejected with status {status:?}: {body}");
    if status == StatusCode::UNAUTHORIZED {
        Error::Unauthorized {
            status: status.as_u16(),
            body,
        }
    } else {
        Error::Remote {
            status: status.as_u16(),
            body,
        }
    }
}

async fn read_response<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
    let status = res.status();
    tracing::debug!("responded with status {status:?}");
    if !status.is_success() {
        return Err(reject(res).await);
    }
    let body = res.bytes().await?;
    serde_json::from_slice(&body).map_err(Error::from)
}

impl crate::Client {
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let uri = self.build_url(path);
        tracing::debug!("calling {method} {uri}");
        let req = self
            .inner
            .request(method, uri)
            .header(reqwest::header::ACCEPT, "application/json");
        self.credentials.apply(req)
    }

    #[tracing::instrument(name = "get", skip(self))]
    pub(crate) async fn get_request<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Error> {
        let res = self.request(reqwest::Method::GET, path).send().await?;
        read_response(res).await
    }

    /// Sends a `DELETE` request, only accepting the `expected` status.
    #[tracing::instrument(name = "delete", skip(self))]
    pub(crate) async fn delete_request(
        &self,
        path: &str,
        expected: StatusCode,
    ) -> Result<(), Error> {
        let res = self.request(reqwest::Method::DELETE, path).send().await?;
        let status = res.status();
        tracing::debug!("responded with status {status:?}");
        if status == expected {
            // the deletion only counts once the whole answer is received
            let body = res.text().await?;
            tracing::debug!("deleted: {body}");
            Ok(())
        } else {
            Err(reject(res).await)
        }
    }
}
