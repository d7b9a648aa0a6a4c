use super::plan_items::{self, PlanItem};
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::{QueryOrder, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "executed")]
    Executed,
    #[sea_orm(string_value = "trashed")]
    Trashed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "interrupted")]
    Interrupted,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "plans")]
#[crudcrate(
    api_struct = "Plan",
    name_singular = "plan",
    name_plural = "plans",
    description = "A step of an operation. Plans nest through a parent plan and list the containers, plates, wells, samples, parts and protocols they work on. Executed plans cannot be deleted.",
    fn_get_one = get_one_plan,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    #[crudcrate(fulltext)]
    pub description: String,
    #[crudcrate(sortable, filterable, enum_field)]
    pub status: PlanStatus,
    #[crudcrate(filterable)]
    pub parent_id: Option<Uuid>,
    #[crudcrate(sortable, filterable)]
    pub operation_id: Uuid,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, update_model = false)]
    pub items: Vec<PlanItem>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "crate::operations::models::Entity",
        from = "Column::OperationId",
        to = "crate::operations::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Operations,
    #[sea_orm(has_many = "plan_items::Entity")]
    PlanItems,
}

impl Related<crate::operations::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operations.def()
    }
}

impl Related<plan_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_plan(db: &DatabaseConnection, id: Uuid) -> Result<Plan, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Plan with id '{id}' not found")))?;

    let items = plan_items::Entity::find()
        .filter(plan_items::Column::PlanId.eq(id))
        .order_by_asc(plan_items::Column::CreatedAt)
        .all(db)
        .await?;

    let mut plan: Plan = model.into();
    plan.items = items.into_iter().map(PlanItem::from).collect();
    Ok(plan)
}
