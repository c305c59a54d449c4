use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::clock::Clock;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::source::{BorrowRemote, Remote, WireFormat};

pub const BOOKS_PATH: &str = "/books";
pub const AUTHORS_PATH: &str = "/authors";
pub const MEMBERS_PATH: &str = "/members";
pub const BORROWED_BOOKS_PATH: &str = "/borrowed-books";

pub fn build_http_client(config: &Configuration) -> LibraryResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(LibraryError::from)
}

// HttpRemote talks to one collection endpoint of the REST backend
pub struct HttpRemote<Entity> {
    client: Client,
    base_url: String,
    path: String,
    clock: Arc<dyn Clock>,
    entity: PhantomData<fn() -> Entity>,
}

impl<Entity> HttpRemote<Entity> {
    pub fn new(client: Client, base_url: &str, path: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: path.to_string(),
            clock,
            entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, self.path, id)
    }
}

// checks the status and hands back the response body for decoding
async fn ensure_success(res: Response) -> LibraryResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let url = res.url().to_string();
    let body = res.text().await.unwrap_or_default();
    Err(LibraryError::remote_status(status.as_u16(), format!("{} {}", url, body).as_str()))
}

async fn read_entity<Entity: WireFormat>(res: Response) -> LibraryResult<Entity> {
    let dto = ensure_success(res).await?.json::<Entity::Dto>().await?;
    Entity::from_wire(dto)
}

async fn read_entities<Entity: WireFormat>(res: Response) -> LibraryResult<Vec<Entity>> {
    let dtos = ensure_success(res).await?.json::<Vec<Entity::Dto>>().await?;
    dtos.into_iter().map(Entity::from_wire).collect()
}

#[async_trait]
impl<Entity> Remote<Entity> for HttpRemote<Entity>
where
    Entity: WireFormat + Identifiable + 'static,
{
    async fn list(&self) -> LibraryResult<Vec<Entity>> {
        debug!(url = self.collection_url().as_str(), "fetching collection");
        let res = self.client.get(self.collection_url()).send().await?;
        read_entities(res).await
    }

    async fn create(&self, entity: &Entity) -> LibraryResult<Entity> {
        let mut body = serde_json::to_value(entity.to_wire(self.clock.today()))?;
        // ids are assigned by the backend
        if let Value::Object(ref mut fields) = body {
            fields.remove("id");
        }
        let res = self.client.post(self.collection_url()).json(&body).send().await?;
        read_entity(res).await
    }

    async fn update(&self, entity: &Entity) -> LibraryResult<Entity> {
        let res = self.client.put(self.item_url(entity.id().as_str()))
            .json(&entity.to_wire(self.clock.today())).send().await?;
        read_entity(res).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<()> {
        let res = self.client.delete(self.item_url(id)).send().await?;
        ensure_success(res).await.map(|_| ())
    }
}

#[async_trait]
impl BorrowRemote for HttpRemote<BorrowRecord> {
    async fn return_record(&self, id: &str) -> LibraryResult<BorrowRecord> {
        let res = self.client.put(format!("{}/return", self.item_url(id))).send().await?;
        read_entity(res).await
    }

    async fn search(&self, query: &str) -> LibraryResult<Vec<BorrowRecord>> {
        let res = self.client.get(format!("{}/search", self.collection_url()))
            .query(&[("q", query)]).send().await?;
        read_entities(res).await
    }
}
