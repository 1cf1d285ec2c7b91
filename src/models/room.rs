use crate::entities::room_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomResponse {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub is_active: bool,
}

impl From<room_entity::Model> for RoomResponse {
    fn from(room: room_entity::Model) -> Self {
        Self {
            id: room.id,
            name: room.name,
            kind: room.kind,
            is_active: room.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    #[schema(example = "Lotus Room")]
    pub name: String,
    #[schema(example = "massage")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub is_active: Option<bool>,
}
