use super::services::{distribution_plateset_ids, link_platesets};
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::{TransactionTrait, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "distributions")]
#[crudcrate(
    api_struct = "Distribution",
    name_singular = "distribution",
    name_plural = "distributions",
    description = "A shippable collection of platesets. Parts are available when a sample of the part sits on a plate of some distribution.",
    fn_get_one = get_one_distribution,
    fn_create = create_distribution,
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
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, update_model = false)]
    pub plateset_ids: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<crate::platesets::models::Entity> for Entity {
    fn to() -> RelationDef {
        super::distribution_platesets::Relation::Platesets.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::distribution_platesets::Relation::Distributions.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_distribution(db: &DatabaseConnection, id: Uuid) -> Result<Distribution, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Distribution with id '{id}' not found")))?;

    let mut distribution: Distribution = model.into();
    distribution.plateset_ids = distribution_plateset_ids(db, &[id]).await?;
    Ok(distribution)
}

async fn create_distribution(
    db: &DatabaseConnection,
    create_data: DistributionCreate,
) -> Result<Distribution, DbErr> {
    let plateset_ids = create_data.plateset_ids.clone();
    let active_model: ActiveModel = create_data.into();

    let txn = db.begin().await?;
    let inserted = active_model.insert(&txn).await?;
    link_platesets(&txn, inserted.id, &plateset_ids).await?;
    txn.commit().await?;

    get_one_distribution(db, inserted.id).await
}
