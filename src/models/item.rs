use serde::{Deserialize, Serialize};

use super::{UploadFile, UploadPayload};

/// Item model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub item_name: String,
    pub attach_file: Option<UploadFile>,
    pub image_files: Vec<UploadFile>,
    pub created_at: String,
}

impl Item {
    /// Whether `stored_name` is one of this item's files
    pub fn references(&self, stored_name: &str) -> bool {
        self.attach_file
            .iter()
            .chain(self.image_files.iter())
            .any(|file| file.stored_name == stored_name)
    }
}

/// Item record before the repository assigns an id
#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_name: String,
    pub attach_file: Option<UploadFile>,
    pub image_files: Vec<UploadFile>,
}

/// Decoded `POST /items/new` submission
#[derive(Debug, Default)]
pub struct ItemForm {
    pub item_name: String,
    pub attach_file: Option<UploadPayload>,
    pub image_files: Vec<UploadPayload>,
}
