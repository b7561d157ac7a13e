use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    response::{Html, Redirect},
    Json,
};

use crate::error::{ApiResponse, AppError, Result};
use crate::models::{Item, ItemForm, UploadPayload};
use crate::services::ItemService;
use crate::AppState;

/// Render the upload form
/// GET /items/new
pub async fn new_item(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.views.item_form()?))
}

/// Store the submitted files and save the item
/// POST /items/new
pub async fn save_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut form = ItemForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to process multipart: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "itemName" => {
                form.item_name = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read item name: {}", e))
                })?;
            }
            "attachFile" => form.attach_file = Some(read_payload(field).await?),
            "imageFiles" => form.image_files.push(read_payload(field).await?),
            _ => {}
        }
    }

    let item = ItemService::save_item(state.items.as_ref(), &state.store, form).await?;
    Ok(Redirect::to(&format!("/items/{}", item.id)))
}

/// Render a saved item
/// GET /items/:id
pub async fn view_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Html<String>> {
    let item = ItemService::get_item(state.items.as_ref(), id).await?;
    Ok(Html(state.views.item_view(&item)?))
}

/// Get a saved item as JSON
/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Item>>> {
    let item = ItemService::get_item(state.items.as_ref(), id).await?;
    Ok(Json(ApiResponse::success(item)))
}

async fn read_payload(field: Field<'_>) -> Result<UploadPayload> {
    let original_name = field.file_name().unwrap_or("").to_string();
    let content = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

    Ok(UploadPayload::new(original_name, content))
}
