use crate::entities::room_entity as rooms;
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct RoomService {
    pool: DatabaseConnection,
}

impl RoomService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_rooms(&self, include_inactive: bool) -> AppResult<Vec<RoomResponse>> {
        let mut finder = rooms::Entity::find();
        if !include_inactive {
            finder = finder.filter(rooms::Column::IsActive.eq(true));
        }
        let models = finder
            .order_by_asc(rooms::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(RoomResponse::from).collect())
    }

    pub async fn create_room(&self, req: CreateRoomRequest) -> AppResult<RoomResponse> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Room name must not be empty".to_string(),
            ));
        }
        let model = rooms::ActiveModel {
            name: Set(req.name.trim().to_string()),
            kind: Set(req.kind.trim().to_lowercase()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(RoomResponse::from(model))
    }

    pub async fn update_room(&self, room_id: i64, req: UpdateRoomRequest) -> AppResult<RoomResponse> {
        let mut model = rooms::Entity::find_by_id(room_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?
            .into_active_model();
        if let Some(name) = req.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(kind) = req.kind {
            model.kind = Set(kind.trim().to_lowercase());
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;
        Ok(RoomResponse::from(updated))
    }
}
