use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a plan item points at
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, ToSchema, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PlanItemKind {
    #[sea_orm(string_value = "container")]
    Container,
    #[sea_orm(string_value = "plate")]
    Plate,
    #[sea_orm(string_value = "well")]
    Well,
    #[sea_orm(string_value = "sample")]
    Sample,
    #[sea_orm(string_value = "part")]
    Part,
    #[sea_orm(string_value = "protocol")]
    Protocol,
}

/// Reference to any inventory object a plan works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema, Serialize, Deserialize)]
pub struct PlanItem {
    pub kind: PlanItemKind,
    pub item_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plan_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub kind: PlanItemKind,
    pub item_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for PlanItem {
    fn from(model: Model) -> Self {
        Self {
            kind: model.kind,
            item_id: model.item_id,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::plans::models::Entity",
        from = "Column::PlanId",
        to = "crate::plans::models::Column::Id",
        on_delete = "Cascade"
    )]
    Plans,
}

impl Related<crate::plans::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
