use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::{Item, ItemForm, NewItem, UploadFile};
use crate::repository::ItemRepository;
use crate::storage::FileStore;

/// Item service
pub struct ItemService;

impl ItemService {
    /// Store the form's files and save the item.
    ///
    /// If storing the images fails, the attachment written for the same
    /// submission is removed again.
    pub async fn save_item(
        repo: &dyn ItemRepository,
        store: &FileStore,
        form: ItemForm,
    ) -> Result<Item> {
        let item_name = form.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(AppError::BadRequest("Item name is required".to_string()));
        }

        let attach_file = match form.attach_file {
            Some(payload) => store.store_one(payload).await?,
            None => None,
        };

        let image_files = match store.store_many(form.image_files).await {
            Ok(files) => files,
            Err(e) => {
                if let Some(ref attach) = attach_file {
                    store.discard(std::slice::from_ref(attach)).await;
                }
                return Err(e.into());
            }
        };

        let item = repo
            .save(NewItem {
                item_name,
                attach_file,
                image_files,
            })
            .await?;

        tracing::info!(
            "Saved item {} ({:?}) with {} image(s), attachment: {}",
            item.id,
            item.item_name,
            item.image_files.len(),
            item.attach_file.is_some()
        );
        Ok(item)
    }

    /// Get an item by id
    pub async fn get_item(repo: &dyn ItemRepository, id: u64) -> Result<Item> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }

    /// The item's attachment and where it lives on disk
    pub async fn get_attachment(
        repo: &dyn ItemRepository,
        store: &FileStore,
        item_id: u64,
    ) -> Result<(UploadFile, PathBuf)> {
        let item = Self::get_item(repo, item_id).await?;
        let attach = item
            .attach_file
            .ok_or_else(|| AppError::NotFound("Item has no attachment".to_string()))?;

        let path = store.resolve_path(&attach.stored_name);
        Ok((attach, path))
    }

    /// Path of an image requested by stored name.
    ///
    /// Only names that stay inside the storage directory and belong to a saved
    /// item are served.
    pub async fn get_image_path(
        repo: &dyn ItemRepository,
        store: &FileStore,
        stored_name: &str,
    ) -> Result<PathBuf> {
        let path = store.resolve_contained(stored_name)?;

        if !repo.references_stored_name(stored_name).await? {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadPayload;
    use crate::repository::InMemoryItemRepository;
    use tempfile::tempdir;

    fn form(attach: Option<UploadPayload>, images: Vec<UploadPayload>) -> ItemForm {
        ItemForm {
            item_name: "chair".to_string(),
            attach_file: attach,
            image_files: images,
        }
    }

    #[tokio::test]
    async fn test_save_item_stores_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let repo = InMemoryItemRepository::new();

        let item = ItemService::save_item(
            &repo,
            &store,
            form(
                Some(UploadPayload::new("invoice.pdf", &b"%PDF"[..])),
                vec![
                    UploadPayload::new("a.jpg", &b"a"[..]),
                    UploadPayload::new("b.jpg", &b"b"[..]),
                ],
            ),
        )
        .await
        .unwrap();

        assert_eq!(item.id, 1);
        assert_eq!(item.item_name, "chair");
        let attach = item.attach_file.as_ref().unwrap();
        assert_eq!(attach.original_name, "invoice.pdf");
        assert!(store.resolve_path(&attach.stored_name).exists());
        assert_eq!(item.image_files.len(), 2);
    }

    #[tokio::test]
    async fn test_save_item_without_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let repo = InMemoryItemRepository::new();

        let item = ItemService::save_item(
            &repo,
            &store,
            form(Some(UploadPayload::new("", Vec::new())), Vec::new()),
        )
        .await
        .unwrap();

        assert!(item.attach_file.is_none());
        assert!(item.image_files.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_save_item_requires_name() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let repo = InMemoryItemRepository::new();

        let mut blank = form(Some(UploadPayload::new("a.pdf", &b"x"[..])), Vec::new());
        blank.item_name = "   ".to_string();

        let err = ItemService::save_item(&repo, &store, blank).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_save_item_removes_attachment_when_images_fail() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let repo = InMemoryItemRepository::new();

        let too_long = format!("x.{}", "a".repeat(300));
        let err = ItemService::save_item(
            &repo,
            &store,
            form(
                Some(UploadPayload::new("invoice.pdf", &b"%PDF"[..])),
                vec![
                    UploadPayload::new("a.jpg", &b"a"[..]),
                    UploadPayload::new(too_long, &b"b"[..]),
                ],
            ),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Store(_)));
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_get_attachment_missing() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let repo = InMemoryItemRepository::new();

        let item = ItemService::save_item(&repo, &store, form(None, Vec::new()))
            .await
            .unwrap();

        let err = ItemService::get_attachment(&repo, &store, item.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = ItemService::get_attachment(&repo, &store, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_image_path_requires_known_name() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let repo = InMemoryItemRepository::new();

        let item = ItemService::save_item(
            &repo,
            &store,
            form(None, vec![UploadPayload::new("a.jpg", &b"a"[..])]),
        )
        .await
        .unwrap();
        let stored_name = &item.image_files[0].stored_name;

        let path = ItemService::get_image_path(&repo, &store, stored_name).await.unwrap();
        assert_eq!(path, store.resolve_path(stored_name));

        let err = ItemService::get_image_path(&repo, &store, "unknown.jpg").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = ItemService::get_image_path(&repo, &store, "../secret").await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
