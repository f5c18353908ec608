//! Azure Blob Storage client implementation
//!
//! Wraps the Azure Storage SDK and implements the ObjectStore trait
//! from bm-core. Authentication uses a service-principal credential
//! (tenant id, client id, client secret); the token exchange itself is
//! lazy, so credential failures surface on the first store call.

use std::sync::Arc;

use async_trait::async_trait;
use azure_identity::ClientSecretCredential;
use azure_storage::StorageCredentials;
use azure_storage_blobs::blob::Blob;
use azure_storage_blobs::prelude::*;
use futures::StreamExt;
use tracing::debug;
use url::Url;

use bm_core::{Error, ObjectMeta, ObjectStore, Result, Settings};

/// Azure AD authority host for the public cloud
const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Azure blob container client wrapper
pub struct AzureBlobStore {
    container: ContainerClient,
}

impl AzureBlobStore {
    /// Create a client for the container named in `settings`
    ///
    /// Builds the service-principal credential and the container handle.
    /// No network call happens here; an invalid secret is only detected
    /// on the first list or fetch.
    pub fn connect(settings: &Settings) -> Result<Self> {
        let authority = Url::parse(AUTHORITY_HOST)
            .map_err(|e| Error::Auth(format!("invalid authority host: {e}")))?;

        let credential = Arc::new(ClientSecretCredential::new(
            azure_core::new_http_client(),
            authority,
            settings.tenant_id.clone(),
            settings.client_id.clone(),
            settings.client_secret.clone(),
        ));

        let storage_credentials = StorageCredentials::token_credential(credential);
        let service = BlobServiceClient::new(settings.account_name.clone(), storage_credentials);
        let container = service.container_client(settings.container_name.clone());

        Ok(Self { container })
    }
}

#[async_trait]
impl ObjectStore for AzureBlobStore {
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>> {
        let mut builder = self.container.list_blobs();
        if !prefix.is_empty() {
            builder = builder.prefix(prefix.to_owned());
        }

        let mut objects = Vec::new();
        let mut pages = builder.into_stream();
        while let Some(page) = pages.next().await {
            let page = page.map_err(classify_list_error)?;
            for blob in page.blobs.blobs() {
                objects.push(blob_meta(blob));
            }
        }

        debug!(count = objects.len(), prefix, "listed blobs");
        Ok(objects)
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        self.container
            .blob_client(key)
            .get_content()
            .await
            .map_err(|e| Error::download(key, e.to_string()))
    }
}

fn blob_meta(blob: &Blob) -> ObjectMeta {
    let content_type = blob.properties.content_type.clone();
    ObjectMeta {
        key: blob.name.clone(),
        size: blob.properties.content_length,
        last_modified: jiff::Timestamp::from_second(blob.properties.last_modified.unix_timestamp())
            .ok(),
        content_type: (!content_type.is_empty()).then_some(content_type),
    }
}

/// Classify a listing-stage SDK error as Auth or List
///
/// The SDK reports token-exchange failures through the same error type
/// as transport failures, so classification falls back to message
/// sniffing for the AAD error code and HTTP auth statuses.
fn classify_list_error(err: azure_core::Error) -> Error {
    classify_list_message(err.to_string())
}

fn classify_list_message(message: String) -> Error {
    if message.contains("AADSTS")
        || message.contains("status: 401")
        || message.contains("status: 403")
    {
        Error::Auth(message)
    } else {
        Error::List(message)
    }
}
