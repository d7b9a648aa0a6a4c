use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use crate::distributions::services::available_part_ids;
use crate::parts::models::{self as parts, PartList};
use axum::extract::{Query, State};
use axum::response::Json;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

const MAX_RESULTS: u64 = 100;

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(search_parts))
        .with_state(state.clone())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PartSearch {
    /// Case-insensitive text matched against name, description and gene id
    pub q: Option<String>,
    /// Only parts present in at least one distribution
    #[serde(default)]
    pub available: bool,
}

const LIKE_ESCAPE: char = '!';

/// `%text%` with the LIKE wildcards of `text` matched literally
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains_ignore_case(column: parts::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

#[utoipa::path(
    get,
    path = "/parts",
    params(PartSearch),
    responses((status = 200, description = "Matching parts ordered by gene id", body = Vec<PartList>)),
    tag = "search"
)]
pub async fn search_parts(
    Query(search): Query<PartSearch>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PartList>>> {
    let mut query = parts::Entity::find()
        .order_by_asc(parts::Column::GeneId)
        .limit(MAX_RESULTS);

    if let Some(text) = search.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = contains_pattern(text);
        query = query.filter(
            Condition::any()
                .add(contains_ignore_case(parts::Column::Name, &pattern))
                .add(contains_ignore_case(parts::Column::Description, &pattern))
                .add(contains_ignore_case(parts::Column::GeneId, &pattern)),
        );
    }

    if search.available {
        query = query.filter(parts::Column::Id.in_subquery(available_part_ids()));
    }

    let found = query.all(&state.db).await?;
    tracing::debug!("Part search matched {} part(s)", found.len());
    Ok(Json(found.into_iter().map(PartList::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(contains_pattern("GFP"), "%gfp%");
        assert_eq!(contains_pattern("100%"), "%100!%%");
        assert_eq!(contains_pattern("bba_k!"), "%bba!_k!!%");
    }
}
