//! Product management commands.

use std::path::PathBuf;

use shopfront_client::{ClientConfig, ImageUpload, ProductDraft};
use shopfront_core::{Price, ProductId};

use super::CommandError;
use crate::output::{self, Format};

/// Product fields as given on the command line.
#[derive(Debug)]
pub struct DraftInput {
    pub title: String,
    pub description: String,
    pub price: Option<Price>,
    pub images: Vec<PathBuf>,
}

impl DraftInput {
    /// Read the image files and build the request draft.
    async fn into_draft(self) -> Result<ProductDraft, CommandError> {
        let mut draft = ProductDraft::new(self.title, self.description);
        draft.price = self.price;

        for path in self.images {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| CommandError::Image {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
            draft = draft.with_image(ImageUpload::new(file_name, bytes));
        }

        Ok(draft)
    }
}

/// List one page of products.
pub async fn list(
    config: &ClientConfig,
    page: u32,
    per_page: Option<u32>,
    format: Format,
) -> Result<(), CommandError> {
    let client = super::client(config)?;
    let per_page = per_page.unwrap_or_else(|| config.per_page.get());

    let listing = client.list_products(page, per_page).await?;
    output::listing(format, page, &listing)?;
    Ok(())
}

/// Create a product.
pub async fn create(
    config: &ClientConfig,
    input: DraftInput,
    format: Format,
) -> Result<(), CommandError> {
    let client = super::client(config)?;
    let draft = input.into_draft().await?;

    let product = client.create_product(draft).await?;
    output::product(format, "Created", &product)?;
    Ok(())
}

/// Edit a product.
pub async fn edit(
    config: &ClientConfig,
    id: ProductId,
    input: DraftInput,
    format: Format,
) -> Result<(), CommandError> {
    let client = super::client(config)?;
    let draft = input.into_draft().await?;

    let product = client.edit_product(id, draft).await?;
    output::product(format, "Updated", &product)?;
    Ok(())
}

/// Delete a product.
pub async fn delete(config: &ClientConfig, id: ProductId, format: Format) -> Result<(), CommandError> {
    let client = super::client(config)?;

    let confirmation = client.delete_product(id).await?;
    output::deleted(format, id, &confirmation)?;
    Ok(())
}
