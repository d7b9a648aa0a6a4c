use super::models::{Column, ContainerType, Entity, Model};
use crate::common::errors::{BusinessError, BusinessResult, DbErrorExt};
use crate::common::tree::{creates_cycle, parent_chain};
use crate::common::validators::is_valid_container_name;
use crate::modules::models as modules;
use crate::plates::models as plates;
use crate::{not_found, protected, validation_error};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeletionSummary {
    pub deleted_containers: usize,
    pub moved_modules: u64,
    pub deleted_plates: u64,
    /// Surviving parent that received the modules
    pub modules_moved_to: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainerNode {
    pub id: Uuid,
    pub name: String,
    pub container_type: ContainerType,
    pub children: Vec<ContainerNode>,
}

pub fn validate_name(name: &str) -> BusinessResult<()> {
    if is_valid_container_name(name) {
        Ok(())
    } else {
        Err(validation_error!(
            "name",
            "must be non-empty and may not contain '/' or spaces"
        ))
    }
}

/// Only one container may be without a parent.
pub async fn ensure_no_other_root<C>(db: &C, except: Option<Uuid>) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    let mut query = Entity::find().filter(Column::ParentId.is_null());
    if let Some(id) = except {
        query = query.filter(Column::Id.ne(id));
    }
    if query.count(db).await? > 0 {
        return Err(second_root());
    }
    Ok(())
}

fn second_root() -> BusinessError {
    validation_error!(
        "parent_id",
        "a root container already exists; new containers need a parent"
    )
}

/// Concurrent writes that both pass `ensure_no_other_root` trip the unique
/// root index instead
pub fn map_container_write_error(err: DbErr) -> BusinessError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => second_root(),
        _ => err.to_business_error("container"),
    }
}

pub async fn ensure_exists<C>(db: &C, id: Uuid) -> BusinessResult<Model>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("container", id))
}

/// Rejects a parent that does not exist or that lies below `id`.
pub async fn ensure_valid_parent<C>(db: &C, id: Uuid, parent_id: Uuid) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    ensure_exists(db, parent_id)
        .await
        .map_err(|_| validation_error!("parent_id", format!("container {parent_id} does not exist")))?;
    if creates_cycle::<Entity, _>(db, id, parent_id, Column::ParentId).await? {
        return Err(validation_error!(
            "parent_id",
            "would make the container its own ancestor"
        ));
    }
    Ok(())
}

/// Every container below `id`, breadth first. `id` itself is not included.
pub async fn descendant_ids<C>(db: &C, id: Uuid) -> BusinessResult<Vec<Uuid>>
where
    C: ConnectionTrait,
{
    let mut visited = HashSet::from([id]);
    let mut queue = VecDeque::from([id]);
    let mut descendants = Vec::new();

    while let Some(current) = queue.pop_front() {
        let children = Entity::find()
            .filter(Column::ParentId.eq(current))
            .all(db)
            .await?;
        for child in children {
            if visited.insert(child.id) {
                descendants.push(child.id);
                queue.push_back(child.id);
            }
        }
    }

    Ok(descendants)
}

/// Deletes a container and everything below it. Modules anywhere in the
/// subtree are moved to the deleted container's parent, plates in the subtree
/// are deleted. The root container can never be deleted.
pub async fn delete_container(db: &DatabaseConnection, id: Uuid) -> BusinessResult<DeletionSummary> {
    let txn = db.begin().await?;

    let container = ensure_exists(&txn, id).await?;
    let Some(parent_id) = container.parent_id else {
        return Err(protected!(
            "container",
            format!("'{}' is the root container", container.name)
        ));
    };

    let mut subtree = vec![id];
    subtree.extend(descendant_ids(&txn, id).await?);

    let moved = modules::Entity::update_many()
        .col_expr(modules::Column::ContainerId, Expr::value(parent_id))
        .col_expr(modules::Column::LastUpdated, Expr::value(Utc::now()))
        .filter(modules::Column::ContainerId.is_in(subtree.clone()))
        .exec(&txn)
        .await?;

    let removed_plates = plates::Entity::delete_many()
        .filter(plates::Column::ContainerId.is_in(subtree.clone()))
        .exec(&txn)
        .await?;

    // Children go before their parents
    for container_id in subtree.iter().rev() {
        Entity::delete_by_id(*container_id).exec(&txn).await?;
    }

    txn.commit().await?;

    let summary = DeletionSummary {
        deleted_containers: subtree.len(),
        moved_modules: moved.rows_affected,
        deleted_plates: removed_plates.rows_affected,
        modules_moved_to: parent_id,
    };
    tracing::info!("Deleted container {id}: {summary:?}");
    Ok(summary)
}

/// Root-first path ending at `id`.
pub async fn breadcrumb<C>(db: &C, id: Uuid) -> BusinessResult<Vec<Model>>
where
    C: ConnectionTrait,
{
    let container = ensure_exists(db, id).await?;
    let mut ancestor_ids = parent_chain::<Entity, _>(db, id, Column::ParentId).await?;
    ancestor_ids.reverse();

    let mut by_id: HashMap<Uuid, Model> = Entity::find()
        .filter(Column::Id.is_in(ancestor_ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|model| (model.id, model))
        .collect();

    let mut path: Vec<Model> = ancestor_ids
        .iter()
        .filter_map(|ancestor| by_id.remove(ancestor))
        .collect();
    path.push(container);
    Ok(path)
}

/// The whole hierarchy nested under the root. Built bottom-up without recursion.
pub async fn tree<C>(db: &C) -> BusinessResult<ContainerNode>
where
    C: ConnectionTrait,
{
    let all = Entity::find()
        .order_by_asc(Column::Name)
        .all(db)
        .await?;

    let root = all
        .iter()
        .find(|c| c.parent_id.is_none())
        .cloned()
        .ok_or_else(|| not_found!("container", "root"))?;

    let mut children_of: HashMap<Uuid, Vec<&Model>> = HashMap::new();
    for container in &all {
        if let Some(parent) = container.parent_id {
            children_of.entry(parent).or_default().push(container);
        }
    }

    // Breadth-first order from the root, guarded against cycles
    let mut order = vec![&root];
    let mut visited = HashSet::from([root.id]);
    let mut cursor = 0;
    while cursor < order.len() {
        let current = order[cursor].id;
        if let Some(children) = children_of.get(&current) {
            for child in children {
                if visited.insert(child.id) {
                    order.push(child);
                }
            }
        }
        cursor += 1;
    }

    let mut built: HashMap<Uuid, Vec<ContainerNode>> = HashMap::new();
    for container in order.iter().rev() {
        let mut children = built.remove(&container.id).unwrap_or_default();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        let node = ContainerNode {
            id: container.id,
            name: container.name.clone(),
            container_type: container.container_type.clone(),
            children,
        };
        match container.parent_id {
            Some(parent) if container.id != root.id => {
                built.entry(parent).or_default().push(node);
            }
            _ => return Ok(node),
        }
    }

    Err(BusinessError::InternalError {
        message: "container tree could not be assembled".to_string(),
    })
}
