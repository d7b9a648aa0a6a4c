use super::models::{
    ActiveModel, Column, Entity, Model, Plan, PlanCreate, PlanStatus, PlanUpdate,
};
use super::plan_items::{self, PlanItem, PlanItemKind};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::tree::creates_cycle;
use crate::operations::models as operations;
use crate::{not_found, protected, validation_error};
use chrono::Utc;
use crudcrate::CRUDResource;
use crudcrate::traits::MergeIntoActiveModel;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

pub async fn ensure_exists<C>(db: &C, id: Uuid) -> BusinessResult<Model>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("plan", id))
}

async fn ensure_operation_exists<C>(db: &C, operation_id: Uuid) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    if operations::Entity::find_by_id(operation_id).one(db).await?.is_none() {
        return Err(validation_error!(
            "operation_id",
            format!("operation {operation_id} does not exist")
        ));
    }
    Ok(())
}

/// Checks that the object an item points at exists in the table of its kind
pub async fn item_exists<C>(db: &C, item: &PlanItem) -> BusinessResult<bool>
where
    C: ConnectionTrait,
{
    let id = item.item_id;
    let found = match item.kind {
        PlanItemKind::Container => crate::containers::models::Entity::find_by_id(id)
            .one(db)
            .await?
            .is_some(),
        PlanItemKind::Plate => crate::plates::models::Entity::find_by_id(id)
            .one(db)
            .await?
            .is_some(),
        PlanItemKind::Well => crate::wells::models::Entity::find_by_id(id)
            .one(db)
            .await?
            .is_some(),
        PlanItemKind::Sample => crate::samples::models::Entity::find_by_id(id)
            .one(db)
            .await?
            .is_some(),
        PlanItemKind::Part => crate::parts::models::Entity::find_by_id(id)
            .one(db)
            .await?
            .is_some(),
        PlanItemKind::Protocol => crate::protocols::models::Entity::find_by_id(id)
            .one(db)
            .await?
            .is_some(),
    };
    Ok(found)
}

/// Adds items to a plan. Items already on the plan are skipped.
pub async fn add_items<C>(db: &C, plan_id: Uuid, items: &[PlanItem]) -> BusinessResult<usize>
where
    C: ConnectionTrait,
{
    let existing: HashSet<PlanItem> = plan_items::Entity::find()
        .filter(plan_items::Column::PlanId.eq(plan_id))
        .all(db)
        .await?
        .into_iter()
        .map(PlanItem::from)
        .collect();

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    let now = Utc::now();
    for item in items {
        if existing.contains(item) || !seen.insert(*item) {
            continue;
        }
        if !item_exists(db, item).await? {
            return Err(validation_error!(
                "items",
                format!("{:?} {} does not exist", item.kind, item.item_id)
            ));
        }
        links.push(plan_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            plan_id: Set(plan_id),
            kind: Set(item.kind),
            item_id: Set(item.item_id),
            created_at: Set(now),
        });
    }

    let added = links.len();
    if added > 0 {
        plan_items::Entity::insert_many(links).exec(db).await?;
    }
    Ok(added)
}

pub async fn remove_item(
    db: &DatabaseConnection,
    plan_id: Uuid,
    item: PlanItem,
) -> BusinessResult<()> {
    let result = plan_items::Entity::delete_many()
        .filter(plan_items::Column::PlanId.eq(plan_id))
        .filter(plan_items::Column::Kind.eq(item.kind))
        .filter(plan_items::Column::ItemId.eq(item.item_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(not_found!("plan item", item.item_id));
    }
    Ok(())
}

/// Ids of every plan below `id`, breadth first
pub async fn descendant_ids<C>(db: &C, id: Uuid) -> BusinessResult<Vec<Uuid>>
where
    C: ConnectionTrait,
{
    let mut found = Vec::new();
    let mut visited = HashSet::from([id]);
    let mut queue = VecDeque::from([id]);

    while let Some(current) = queue.pop_front() {
        let children: Vec<Uuid> = Entity::find()
            .filter(Column::ParentId.eq(current))
            .select_only()
            .column(Column::Id)
            .into_tuple()
            .all(db)
            .await?;
        for child in children {
            if visited.insert(child) {
                found.push(child);
                queue.push_back(child);
            }
        }
    }
    Ok(found)
}

pub async fn create_plan(db: &DatabaseConnection, payload: PlanCreate) -> BusinessResult<Plan> {
    ensure_operation_exists(db, payload.operation_id).await?;
    if let Some(parent_id) = payload.parent_id {
        if Entity::find_by_id(parent_id).one(db).await?.is_none() {
            return Err(validation_error!(
                "parent_id",
                format!("plan {parent_id} does not exist")
            ));
        }
    }

    let items = payload.items.clone();
    let active_model: ActiveModel = payload.into();

    let txn = db.begin().await?;
    let inserted = active_model
        .insert(&txn)
        .await
        .map_err(|e| e.to_business_error("plan"))?;
    add_items(&txn, inserted.id, &items).await?;
    txn.commit().await?;

    tracing::info!("Created plan {} with {} item(s)", inserted.id, items.len());
    Ok(Plan::get_one(db, inserted.id).await?)
}

pub async fn update_plan(
    db: &DatabaseConnection,
    id: Uuid,
    payload: PlanUpdate,
) -> BusinessResult<Plan> {
    let existing = ensure_exists(db, id).await?;

    if let Some(Some(operation_id)) = payload.operation_id {
        ensure_operation_exists(db, operation_id).await?;
    }
    if let Some(Some(parent_id)) = payload.parent_id {
        if Entity::find_by_id(parent_id).one(db).await?.is_none() {
            return Err(validation_error!(
                "parent_id",
                format!("plan {parent_id} does not exist")
            ));
        }
        if creates_cycle::<Entity, _>(db, id, parent_id, Column::ParentId).await? {
            return Err(validation_error!(
                "parent_id",
                "would make the plan its own ancestor"
            ));
        }
    }

    payload
        .merge_into_activemodel(existing.into_active_model())
        .map_err(|e| e.to_business_error("plan"))?
        .update(db)
        .await
        .map_err(|e| e.to_business_error("plan"))?;

    Ok(Plan::get_one(db, id).await?)
}

/// Deletes a plan with its sub-plans. Refused when any of them was executed.
pub async fn delete_plan(db: &DatabaseConnection, id: Uuid) -> BusinessResult<()> {
    let txn = db.begin().await?;
    ensure_exists(&txn, id).await?;

    let mut subtree = vec![id];
    subtree.extend(descendant_ids(&txn, id).await?);

    let executed = Entity::find()
        .filter(Column::Id.is_in(subtree.iter().copied()))
        .filter(Column::Status.eq(PlanStatus::Executed))
        .one(&txn)
        .await?;
    if let Some(plan) = executed {
        return Err(protected!(
            "plan",
            format!("plan {} has been executed", plan.id)
        ));
    }

    // Children first
    for plan_id in subtree.iter().rev() {
        Entity::delete_by_id(*plan_id).exec(&txn).await?;
    }
    txn.commit().await?;

    tracing::info!("Deleted plan {id} and {} sub-plan(s)", subtree.len() - 1);
    Ok(())
}
