use super::order_distributions;
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::{QuerySelect, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "cart")]
    Cart,
    #[sea_orm(string_value = "awaiting_countersign")]
    AwaitingCountersign,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "received")]
    Received,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "orders")]
#[crudcrate(
    api_struct = "Order",
    name_singular = "order",
    name_plural = "orders",
    description = "A request for one or more distributions. A user has at most one open cart; checking out requires a material transfer agreement.",
    fn_get_one = get_one_order,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[crudcrate(sortable, filterable, enum_field, create_model = false, on_create = OrderStatus::Cart)]
    pub status: OrderStatus,
    #[crudcrate(sortable, filterable)]
    pub username: Option<String>,
    #[crudcrate(filterable)]
    pub mta_id: Option<Uuid>,
    #[crudcrate(list_model = false, update_model = false)]
    pub transaction: Option<serde_json::Value>,
    #[crudcrate(list_model = false, update_model = false)]
    pub label: Option<serde_json::Value>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, update_model = false)]
    pub distribution_ids: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::mtas::models::Entity",
        from = "Column::MtaId",
        to = "crate::mtas::models::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Mtas,
}

impl Related<crate::mtas::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mtas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_order(db: &DatabaseConnection, id: Uuid) -> Result<Order, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Order with id '{id}' not found")))?;

    let distribution_ids: Vec<Uuid> = order_distributions::Entity::find()
        .filter(order_distributions::Column::OrderId.eq(id))
        .select_only()
        .column(order_distributions::Column::DistributionId)
        .into_tuple()
        .all(db)
        .await?;

    let mut order: Order = model.into();
    order.distribution_ids = distribution_ids;
    Ok(order)
}
