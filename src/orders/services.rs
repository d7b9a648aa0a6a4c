use super::models::{
    ActiveModel, Column, Entity, Model, Order, OrderCreate, OrderStatus, OrderUpdate,
};
use super::order_distributions;
use crate::common::errors::{BusinessError, BusinessResult, DbErrorExt};
use crate::distributions::models as distributions;
use crate::mtas::models as mtas;
use crate::{business_rule_violation, not_found, validation_error};
use chrono::Utc;
use crudcrate::CRUDResource;
use crudcrate::traits::MergeIntoActiveModel;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

/// Shipping payloads are stored without their billing block
pub fn strip_billing(mut payload: Value) -> Value {
    if let Some(object) = payload.as_object_mut() {
        object.remove("billing");
    }
    payload
}

pub async fn ensure_exists<C>(db: &C, id: Uuid) -> BusinessResult<Model>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("order", id))
}

async fn ensure_distributions_exist<C>(db: &C, ids: &HashSet<Uuid>) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    let found = distributions::Entity::find()
        .filter(distributions::Column::Id.is_in(ids.iter().copied()))
        .count(db)
        .await?;
    if usize::try_from(found).unwrap_or(0) != ids.len() {
        return Err(validation_error!(
            "distribution_ids",
            "one or more distributions do not exist"
        ));
    }
    Ok(())
}

async fn ensure_mta_exists<C>(db: &C, mta_id: Uuid) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    if mtas::Entity::find_by_id(mta_id).one(db).await?.is_none() {
        return Err(validation_error!(
            "mta_id",
            format!("material transfer agreement {mta_id} does not exist")
        ));
    }
    Ok(())
}

/// A user may hold only one order in `cart` status. Staff orders without a
/// username are not restricted.
async fn ensure_single_cart<C>(db: &C, username: &str, except: Option<Uuid>) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    let mut query = Entity::find()
        .filter(Column::Username.eq(username))
        .filter(Column::Status.eq(OrderStatus::Cart));
    if let Some(id) = except {
        query = query.filter(Column::Id.ne(id));
    }
    if query.count(db).await? > 0 {
        return Err(second_cart(username));
    }
    Ok(())
}

fn second_cart(username: &str) -> BusinessError {
    validation_error!(
        "username",
        format!("user {username} has a pending order, only one cart is allowed")
    )
}

/// A cart written concurrently with another one for the same user trips the
/// unique cart index instead of `ensure_single_cart`
pub(crate) fn map_cart_write_error(err: DbErr, username: Option<&str>) -> BusinessError {
    match (err.sql_err(), username) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(username)) => second_cart(username),
        _ => err.to_business_error("order"),
    }
}

async fn find_cart<C>(db: &C, username: &str) -> BusinessResult<Option<Model>>
where
    C: ConnectionTrait,
{
    Ok(Entity::find()
        .filter(Column::Username.eq(username))
        .filter(Column::Status.eq(OrderStatus::Cart))
        .one(db)
        .await?)
}

async fn link_distributions<C>(db: &C, order_id: Uuid, ids: &HashSet<Uuid>) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    let links: Vec<order_distributions::ActiveModel> = ids
        .iter()
        .map(|distribution_id| order_distributions::ActiveModel {
            order_id: Set(order_id),
            distribution_id: Set(*distribution_id),
        })
        .collect();
    if !links.is_empty() {
        order_distributions::Entity::insert_many(links).exec(db).await?;
    }
    Ok(())
}

async fn distribution_count<C>(db: &C, order_id: Uuid) -> BusinessResult<u64>
where
    C: ConnectionTrait,
{
    Ok(order_distributions::Entity::find()
        .filter(order_distributions::Column::OrderId.eq(order_id))
        .count(db)
        .await?)
}

pub async fn create_order(db: &DatabaseConnection, mut payload: OrderCreate) -> BusinessResult<Order> {
    let distribution_ids: HashSet<Uuid> = payload.distribution_ids.iter().copied().collect();
    if distribution_ids.is_empty() {
        return Err(validation_error!(
            "distribution_ids",
            "an order needs at least one distribution"
        ));
    }

    let txn = db.begin().await?;
    ensure_distributions_exist(&txn, &distribution_ids).await?;
    if let Some(mta_id) = payload.mta_id {
        ensure_mta_exists(&txn, mta_id).await?;
    }
    if let Some(username) = &payload.username {
        ensure_single_cart(&txn, username, None).await?;
    }

    payload.transaction = payload.transaction.map(strip_billing);
    payload.label = payload.label.map(strip_billing);
    let username = payload.username.clone();
    let active_model: ActiveModel = payload.into();
    let inserted = active_model
        .insert(&txn)
        .await
        .map_err(|e| map_cart_write_error(e, username.as_deref()))?;
    link_distributions(&txn, inserted.id, &distribution_ids).await?;
    txn.commit().await?;

    tracing::info!(
        "Created order {} with {} distribution(s)",
        inserted.id,
        distribution_ids.len()
    );
    Ok(Order::get_one(db, inserted.id).await?)
}

pub async fn update_order(
    db: &DatabaseConnection,
    id: Uuid,
    payload: OrderUpdate,
) -> BusinessResult<Order> {
    let existing = ensure_exists(db, id).await?;

    if let Some(Some(mta_id)) = payload.mta_id {
        ensure_mta_exists(db, mta_id).await?;
    }

    let status = payload.status.clone().flatten().unwrap_or(existing.status.clone());
    let username = match &payload.username {
        Some(username) => username.clone(),
        None => existing.username.clone(),
    };
    if status == OrderStatus::Cart {
        if let Some(username) = &username {
            ensure_single_cart(db, username, Some(id)).await?;
        }
    }

    payload
        .merge_into_activemodel(existing.into_active_model())
        .map_err(|e| e.to_business_error("order"))?
        .update(db)
        .await
        .map_err(|e| map_cart_write_error(e, username.as_deref()))?;

    Ok(Order::get_one(db, id).await?)
}

/// The order's distributions themselves are left untouched
pub async fn delete_order(db: &DatabaseConnection, id: Uuid) -> BusinessResult<()> {
    ensure_exists(db, id).await?;
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| e.to_business_error("order"))?;
    tracing::info!("Deleted order {id}");
    Ok(())
}

pub async fn get_cart(db: &DatabaseConnection, username: &str) -> BusinessResult<Order> {
    let cart = find_cart(db, username)
        .await?
        .ok_or_else(|| not_found!("cart", username))?;
    Ok(Order::get_one(db, cart.id).await?)
}

/// Adds a distribution to the user's cart, opening a cart when none exists.
/// A distribution already in the cart is left as is.
pub async fn add_to_cart(
    db: &DatabaseConnection,
    username: &str,
    distribution_id: Uuid,
) -> BusinessResult<Order> {
    let txn = db.begin().await?;
    let requested = HashSet::from([distribution_id]);
    ensure_distributions_exist(&txn, &requested).await?;

    let cart = match find_cart(&txn, username).await? {
        Some(cart) => cart,
        None => {
            let now = Utc::now();
            let cart = ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(format!("Cart of {username}")),
                notes: Set(None),
                status: Set(OrderStatus::Cart),
                username: Set(Some(username.to_string())),
                mta_id: Set(None),
                transaction: Set(None),
                label: Set(None),
                created_at: Set(now),
                last_updated: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| map_cart_write_error(e, Some(username)))?;
            tracing::info!("Opened cart {} for {username}", cart.id);
            cart
        }
    };

    let already_present = order_distributions::Entity::find_by_id((cart.id, distribution_id))
        .one(&txn)
        .await?
        .is_some();
    if !already_present {
        link_distributions(&txn, cart.id, &requested).await?;
    }
    txn.commit().await?;

    Ok(Order::get_one(db, cart.id).await?)
}

/// Removes a distribution from the user's cart. Returns `None` when the
/// cart became empty and was deleted.
pub async fn remove_from_cart(
    db: &DatabaseConnection,
    username: &str,
    distribution_id: Uuid,
) -> BusinessResult<Option<Order>> {
    let txn = db.begin().await?;
    let cart = find_cart(&txn, username)
        .await?
        .ok_or_else(|| not_found!("cart", username))?;

    let removed = order_distributions::Entity::delete_by_id((cart.id, distribution_id))
        .exec(&txn)
        .await?;
    if removed.rows_affected == 0 {
        return Err(not_found!("cart distribution", distribution_id));
    }

    let emptied = distribution_count(&txn, cart.id).await? == 0;
    if emptied {
        Entity::delete_by_id(cart.id).exec(&txn).await?;
        tracing::info!("Deleted empty cart {} of {username}", cart.id);
    }
    txn.commit().await?;

    if emptied {
        Ok(None)
    } else {
        Ok(Some(Order::get_one(db, cart.id).await?))
    }
}

/// Submits a cart. The order must still be a cart and carry an MTA.
pub async fn checkout(db: &DatabaseConnection, id: Uuid) -> BusinessResult<Order> {
    let order = ensure_exists(db, id).await?;
    if order.status != OrderStatus::Cart {
        return Err(business_rule_violation!(
            "checkout",
            "only orders in the cart can be checked out"
        ));
    }
    if order.mta_id.is_none() {
        return Err(business_rule_violation!(
            "checkout",
            "a material transfer agreement is required to check out"
        ));
    }

    let mut active = order.into_active_model();
    active.status = Set(OrderStatus::AwaitingCountersign);
    active.last_updated = Set(Utc::now());
    active.update(db).await?;

    tracing::info!("Order {id} checked out");
    Ok(Order::get_one(db, id).await?)
}

pub enum ShippingDocument {
    Label,
    Transaction,
}

/// Stores a shipping label or transaction with its billing block removed
pub async fn attach_shipping_document(
    db: &DatabaseConnection,
    id: Uuid,
    document: ShippingDocument,
    payload: Value,
) -> BusinessResult<Order> {
    let order = ensure_exists(db, id).await?;
    let cleaned = Some(strip_billing(payload));

    let mut active = order.into_active_model();
    match document {
        ShippingDocument::Label => active.label = Set(cleaned),
        ShippingDocument::Transaction => active.transaction = Set(cleaned),
    }
    active.last_updated = Set(Utc::now());
    active.update(db).await?;

    Ok(Order::get_one(db, id).await?)
}
